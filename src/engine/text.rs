//! Pure text transforms behind the file mutation operations.
//!
//! Every function here takes the current file content as `&str` and returns
//! the new content. Nothing touches the filesystem, so the matching rules
//! (first anchor only, first/all substitution, per-line comment-out) are
//! tested in isolation from I/O.
//!
//! Files are opaque text: no function parses the syntax of the file it edits.

use regex::{NoExpand, Regex};
use std::fmt;
use strum::{Display, EnumString};

/// Marker inserted in front of commented-out lines.
pub const COMMENT_MARKER: &str = "# ";

/// A location pattern: either literal text or a regular expression.
///
/// Literal patterns may contain newlines. Regex patterns may carry inline
/// flags such as `(?m)` or `(?s)` so an anchor can span or end at a line
/// boundary.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    /// Literal text pattern
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regular expression pattern
    pub fn regex(expr: &str) -> Result<Self, regex::Error> {
        Ok(Self::Regex(Regex::new(expr)?))
    }

    /// Source text of the pattern, used in error messages and plans
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex(re) => re.as_str(),
        }
    }

    /// Byte range of the first match in `haystack`
    pub fn find(&self, haystack: &str) -> Option<(usize, usize)> {
        match self {
            Self::Literal(text) if text.is_empty() => None,
            Self::Literal(text) => haystack
                .find(text.as_str())
                .map(|start| (start, start + text.len())),
            Self::Regex(re) => re.find(haystack).map(|m| (m.start(), m.end())),
        }
    }

    /// True if the pattern matches anywhere in `haystack`
    pub fn is_match(&self, haystack: &str) -> bool {
        self.find(haystack).is_some()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{:?}", text),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// How many matches a substitution rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SubstituteMode {
    /// Only the first match
    First,
    /// Every non-overlapping match
    All,
}

/// Insert `insertion` immediately after the first match of `anchor`.
///
/// Returns `None` when the anchor does not occur.
pub fn insert_after(haystack: &str, anchor: &Pattern, insertion: &str) -> Option<String> {
    let (_, end) = anchor.find(haystack)?;
    Some(splice(haystack, end, insertion))
}

/// Insert `insertion` immediately before the first match of `anchor`.
///
/// Returns `None` when the anchor does not occur.
pub fn insert_before(haystack: &str, anchor: &Pattern, insertion: &str) -> Option<String> {
    let (start, _) = anchor.find(haystack)?;
    Some(splice(haystack, start, insertion))
}

fn splice(haystack: &str, at: usize, insertion: &str) -> String {
    let mut out = String::with_capacity(haystack.len() + insertion.len());
    out.push_str(&haystack[..at]);
    out.push_str(insertion);
    out.push_str(&haystack[at..]);
    out
}

/// Replace matches of `pattern` with the literal `replacement`.
///
/// Returns the new text and the number of matches rewritten. `$` in the
/// replacement is not expanded.
pub fn substitute(
    haystack: &str,
    pattern: &Pattern,
    replacement: &str,
    mode: SubstituteMode,
) -> (String, usize) {
    let limit = match mode {
        SubstituteMode::First => 1,
        SubstituteMode::All => 0,
    };

    match pattern {
        Pattern::Literal(text) if text.is_empty() => (haystack.to_string(), 0),
        Pattern::Literal(text) => {
            let found = haystack.matches(text.as_str()).count();
            let count = if limit == 1 { found.min(1) } else { found };
            let out = if limit == 1 {
                haystack.replacen(text.as_str(), replacement, 1)
            } else {
                haystack.replace(text.as_str(), replacement)
            };
            (out, count)
        }
        Pattern::Regex(re) => {
            let found = re.find_iter(haystack).count();
            let count = if limit == 1 { found.min(1) } else { found };
            let out = re.replacen(haystack, limit, NoExpand(replacement));
            (out.into_owned(), count)
        }
    }
}

/// Comment out every line on which `pattern` matches.
///
/// The marker goes after the line's leading indentation, so
/// `    config.assets.debug = true` becomes `    # config.assets.debug = true`.
/// Returns the new text and the number of lines commented. With zero
/// matches the output is byte-for-byte the input.
pub fn comment_out(haystack: &str, pattern: &Pattern) -> (String, usize) {
    let mut out = String::with_capacity(haystack.len());
    let mut count = 0;

    for line in haystack.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        if pattern.is_match(body) {
            let indent_len = body.len() - body.trim_start_matches([' ', '\t']).len();
            out.push_str(&line[..indent_len]);
            out.push_str(COMMENT_MARKER);
            out.push_str(&line[indent_len..]);
            count += 1;
        } else {
            out.push_str(line);
        }
    }

    (out, count)
}
