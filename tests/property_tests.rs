//! Property-based tests for railyard
//!
//! These tests verify:
//! - Enum string round-trips (parse -> to_string -> parse)
//! - Text transform invariants (insertion preserves surrounding bytes,
//!   comment-out without matches is the identity)
//! - Naming helpers and URL construction

use proptest::prelude::*;
use railyard::config::parameterize;
use railyard::engine::text::{self, COMMENT_MARKER, Pattern, SubstituteMode};
use railyard::fetch::RemoteSource;
use railyard::recipe::rails::{BundlerGroup, GemOptions, gem_line};
use strum::IntoEnumIterator;

// =============================================================================
// Enum Property Tests
// =============================================================================

fn bundler_group_strategy() -> impl Strategy<Value = BundlerGroup> {
    proptest::sample::select(BundlerGroup::iter().collect::<Vec<_>>())
}

fn substitute_mode_strategy() -> impl Strategy<Value = SubstituteMode> {
    prop_oneof![Just(SubstituteMode::First), Just(SubstituteMode::All)]
}

proptest! {
    /// BundlerGroup: to_string -> parse round-trip is identity
    #[test]
    fn bundler_group_roundtrip(group in bundler_group_strategy()) {
        let parsed: BundlerGroup = group.to_string().parse().expect("Should parse");
        prop_assert_eq!(group, parsed);
        prop_assert_eq!(group.symbol(), format!(":{}", group));
    }

    /// SubstituteMode: to_string -> parse round-trip is identity
    #[test]
    fn substitute_mode_roundtrip(mode in substitute_mode_strategy()) {
        let parsed: SubstituteMode = mode.to_string().parse().expect("Should parse");
        prop_assert_eq!(mode, parsed);
    }
}

// =============================================================================
// Text Transform Property Tests
// =============================================================================

/// Multi-line text made of characters that never contain `@`
fn text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z #=\t]{0,20}", 0..8).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// comment_out with a pattern that cannot match leaves the bytes untouched
    #[test]
    fn comment_out_without_match_is_identity(haystack in text_strategy()) {
        let (out, count) = text::comment_out(&haystack, &Pattern::literal("@@"));
        prop_assert_eq!(count, 0);
        prop_assert_eq!(out, haystack);
    }

    /// comment_out marks exactly the matching lines and keeps the line count
    #[test]
    fn comment_out_marks_matching_lines(haystack in text_strategy()) {
        let pattern = Pattern::literal("=");
        let (out, count) = text::comment_out(&haystack, &pattern);

        let expected = haystack.lines().filter(|l| l.contains('=')).count();
        prop_assert_eq!(count, expected);
        prop_assert_eq!(out.lines().count(), haystack.lines().count());
        prop_assert_eq!(out.len(), haystack.len() + count * COMMENT_MARKER.len());
    }

    /// insert_after keeps everything before and after the insertion point
    #[test]
    fn insert_after_preserves_surrounding_bytes(
        before in "[a-z\n]{0,30}",
        after in "[a-z\n]{0,30}",
        insertion in "[A-Z\n]{0,10}",
    ) {
        let haystack = format!("{before}@anchor@{after}");
        let out = text::insert_after(&haystack, &Pattern::literal("@anchor@"), &insertion)
            .expect("anchor is present");
        prop_assert_eq!(out, format!("{before}@anchor@{insertion}{after}"));
    }

    /// insert_before puts the insertion immediately ahead of the first match
    #[test]
    fn insert_before_uses_first_match(
        before in "[a-z]{0,20}",
        between in "[a-z]{0,20}",
        insertion in "[A-Z]{1,10}",
    ) {
        let haystack = format!("{before}@{between}@");
        let out = text::insert_before(&haystack, &Pattern::literal("@"), &insertion)
            .expect("anchor is present");
        prop_assert_eq!(out, format!("{before}{insertion}@{between}@"));
    }

    /// Insertion with an absent anchor never produces output
    #[test]
    fn insert_without_anchor_is_none(haystack in text_strategy()) {
        let anchor = Pattern::literal("@");
        prop_assert!(text::insert_after(&haystack, &anchor, "x").is_none());
        prop_assert!(text::insert_before(&haystack, &anchor, "x").is_none());
    }

    /// Substituting all matches leaves none behind
    #[test]
    fn substitute_all_removes_every_match(haystack in text_strategy()) {
        let (out, count) = text::substitute(&haystack, &Pattern::literal("="), "", SubstituteMode::All);
        prop_assert!(!out.contains('='));
        prop_assert_eq!(count, haystack.matches('=').count());
    }
}

// =============================================================================
// Naming And URL Property Tests
// =============================================================================

proptest! {
    /// parameterize yields a clean, idempotent slug
    #[test]
    fn parameterize_is_a_clean_slug(name in "\\PC{0,40}") {
        let slug = parameterize(&name);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert_eq!(parameterize(&slug), slug);
    }

    /// url_for never doubles the separating slashes
    #[test]
    fn url_for_joins_with_single_slashes(
        host_slashes in 0usize..3,
        branch in "[a-z]{1,10}",
        branch_slashes in 0usize..3,
        path in "[a-z]{1,10}(/[a-z]{1,10}){0,2}",
        path_slashes in 0usize..3,
    ) {
        let source = RemoteSource {
            host: format!("https://example.com/repo{}", "/".repeat(host_slashes)),
            branch: format!("{}{}{}", "/".repeat(branch_slashes), branch, "/".repeat(branch_slashes)),
        };
        let url = source.url_for(&format!("{}{}", "/".repeat(path_slashes), path));
        prop_assert_eq!(url, format!("https://example.com/repo/{branch}/{path}"));
    }

    /// Every Gemfile line is a fresh `gem` declaration naming the gem first
    #[test]
    fn gem_line_starts_new_declaration(
        name in "[a-z][a-z0-9_-]{0,15}",
        group in proptest::option::of(bundler_group_strategy()),
    ) {
        let mut options = GemOptions::new();
        if let Some(group) = group {
            options = options.group(group);
        }
        let line = gem_line(&name, &options);
        let expected_prefix = format!("\ngem '{name}'");
        prop_assert!(line.starts_with(&expected_prefix));
        prop_assert_eq!(line.matches('\n').count(), 1);
    }
}
