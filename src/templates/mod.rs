//! Generated file content.
//!
//! Every function here is pure: it takes the values it interpolates and
//! returns the text. Writing that text is the recipe's job. Large static
//! files live under `templates/` at the crate root and are embedded at
//! compile time; `{{name}}` placeholders are filled in with [`render`].

pub mod monitoring;
pub mod project;
pub mod provisioning;
pub mod quality;
pub mod testing;

/// Placeholder names shared by the templates
pub struct TemplateVars;

impl TemplateVars {
    pub const APP_NAME: &'static str = "app_name";
    pub const APP_CLASS: &'static str = "app_class";
    pub const DB_PREFIX: &'static str = "db_prefix";
    pub const KEY: &'static str = "key";
}

/// Replace every `{{key}}` in `template` with its value.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_all_occurrences() {
        let out = render(
            "{{app_name}} and {{app_name}} ({{missing}})",
            &[(TemplateVars::APP_NAME, "shop")],
        );
        assert_eq!(out, "shop and shop ({{missing}})");
    }
}
