//! `${VAR}` expansion for string settings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left as is. An unset variable without a default fails with
/// [`ConfigError::EnvVar`] naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that had no value.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("INLAY_EXPAND_AGENT", "bot/2");
        }
        let result = expand_env("${INLAY_EXPAND_AGENT}", "resolver.user_agent").unwrap();
        assert_eq!(result, "bot/2");
        unsafe {
            std::env::remove_var("INLAY_EXPAND_AGENT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("INLAY_EXPAND_UNSET");
        }
        let result = expand_env("${INLAY_EXPAND_UNSET:-fallback}", "field").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_embedded_in_text() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("INLAY_EXPAND_HOST", "notes.local");
        }
        let result = expand_env("inlay (+https://${INLAY_EXPAND_HOST})", "field").unwrap();
        assert_eq!(result, "inlay (+https://notes.local)");
        unsafe {
            std::env::remove_var("INLAY_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("INLAY_EXPAND_MISSING");
        }
        let err = expand_env("${INLAY_EXPAND_MISSING}", "resolver.user_agent").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("INLAY_EXPAND_MISSING"));
        assert!(message.contains("resolver.user_agent"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("inlay/0.1", "field").unwrap(), "inlay/0.1");
        assert_eq!(expand_env("cost $5", "field").unwrap(), "cost $5");
    }
}
