//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognised; a bare `$VAR` is left as written.
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced without a default but is unset.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDTERM_TEST_PAGER", "most");
        }
        assert_eq!(expand_env("${MDTERM_TEST_PAGER}", "pager.command").unwrap(), "most");
        unsafe {
            std::env::remove_var("MDTERM_TEST_PAGER");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDTERM_TEST_UNSET_THEME");
        }
        let result = expand_env("${MDTERM_TEST_UNSET_THEME:-Solarized (dark)}", "highlight.theme");
        assert_eq!(result.unwrap(), "Solarized (dark)");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDTERM_TEST_MISSING");
        }
        let err = expand_env("${MDTERM_TEST_MISSING}", "pager.command").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("MDTERM_TEST_MISSING"));
        assert!(message.contains("pager.command"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDTERM_TEST_PREFIX", "/opt/bin");
        }
        let result = expand_env("${MDTERM_TEST_PREFIX}/less", "pager.command").unwrap();
        assert_eq!(result, "/opt/bin/less");
        unsafe {
            std::env::remove_var("MDTERM_TEST_PREFIX");
        }
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("less", "pager.command").unwrap(), "less");
        assert_eq!(expand_env("$HOME/less", "pager.command").unwrap(), "$HOME/less");
    }
}
