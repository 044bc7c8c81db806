use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// Supports an optional fallback via `{{ env.VAR | default("fallback") }}`.
/// A placeholder without a default whose variable is unset is an error, so a
/// missing credential fails configuration load instead of producing a config
/// with an empty secret.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: variable name, group 2: optional default value
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut missing = None;

    let expanded = re().replace_all(input, |captures: &Captures<'_>| {
        let var_name = &captures[1];

        match std::env::var(var_name) {
            Ok(value) => value,
            Err(_) => match captures.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    if missing.is_none() {
                        missing = Some(format!("environment variable not found: `{var_name}`"));
                    }
                    String::new()
                }
            },
        }
    });

    match missing {
        Some(error) => Err(error),
        None => Ok(expanded.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_placeholders() {
        let input = "key = \"value\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn single_env_var() {
        temp_env::with_var("ORATR_TEST_VAR", Some("hello"), || {
            let result = expand_env("key = \"{{ env.ORATR_TEST_VAR }}\"").unwrap();
            assert_eq!(result, "key = \"hello\"");
        });
    }

    #[test]
    fn multiple_env_vars() {
        let vars = [("ORATR_FOO", Some("foo")), ("ORATR_BAR", Some("bar"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("a = \"{{ env.ORATR_FOO }}\"\nb = \"{{ env.ORATR_BAR }}\"").unwrap();
            assert_eq!(result, "a = \"foo\"\nb = \"bar\"");
        });
    }

    #[test]
    fn missing_env_var() {
        temp_env::with_var_unset("ORATR_MISSING_VAR", || {
            let err = expand_env("key = \"{{ env.ORATR_MISSING_VAR }}\"").unwrap_err();
            assert!(err.contains("ORATR_MISSING_VAR"));
        });
    }

    #[test]
    fn default_used_when_var_missing() {
        temp_env::with_var_unset("ORATR_OPTIONAL_VAR", || {
            let result = expand_env("key = \"{{ env.ORATR_OPTIONAL_VAR | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"fallback\"");
        });
    }

    #[test]
    fn default_not_used_when_var_present() {
        temp_env::with_var("ORATR_OPTIONAL_VAR", Some("actual"), || {
            let result = expand_env("key = \"{{ env.ORATR_OPTIONAL_VAR | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"actual\"");
        });
    }

    #[test]
    fn missing_var_without_default_still_errors() {
        temp_env::with_var_unset("ORATR_REQUIRED_VAR", || {
            let err = expand_env("key = \"{{ env.ORATR_REQUIRED_VAR }}\"").unwrap_err();
            assert!(err.contains("ORATR_REQUIRED_VAR"));
        });
    }
}
