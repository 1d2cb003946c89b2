//! Environment variable expansion for `book.toml` strings.
//!
//! Only the braced forms are recognised:
//! - `${VAR}` - value of VAR, error if unset
//! - `${VAR:-default}` - value of VAR, or `default` when unset

use crate::ConfigError;

/// Expand `${VAR}` references in a configuration value.
///
/// `field` is the dotted config key, used in the error message.
/// Strings without `${` are returned untouched, so bare `$VAR` stays literal.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

/// Variable referenced without a default and missing from the environment.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("QUIRE_TEST_TITLE", "Handbook");
        }
        let result = expand_env("${QUIRE_TEST_TITLE}", "book.title").unwrap();
        assert_eq!(result, "Handbook");
        unsafe {
            std::env::remove_var("QUIRE_TEST_TITLE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("QUIRE_TEST_UNSET_AUTHOR");
        }
        let result = expand_env("${QUIRE_TEST_UNSET_AUTHOR:-Anonymous}", "book.author").unwrap();
        assert_eq!(result, "Anonymous");
    }

    #[test]
    fn test_expand_embedded_in_text() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("QUIRE_TEST_VERSION", "2.1");
        }
        let result = expand_env("Manual v${QUIRE_TEST_VERSION}", "book.title").unwrap();
        assert_eq!(result, "Manual v2.1");
        unsafe {
            std::env::remove_var("QUIRE_TEST_VERSION");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("QUIRE_TEST_MISSING");
        }
        let err = expand_env("${QUIRE_TEST_MISSING}", "book.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("QUIRE_TEST_MISSING"));
        assert!(msg.contains("book.title"));
    }

    #[test]
    fn test_bare_dollar_kept() {
        let result = expand_env("Costs $5", "book.title").unwrap();
        assert_eq!(result, "Costs $5");
    }
}
