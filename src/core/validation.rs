//! Input validation for the declared environment.
//!
//! Runs at configuration-load time, before any entry is classified or any
//! template is touched.

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::constants::LEAKING_PREFIX;
use crate::error::{ConfigError, Result, ValidationError};

/// Reject literal values that would be replaced in place by a secret.
///
/// The host substitutes `${ssm:/...}` variables with the parameter's
/// plaintext before the template is compiled, so such a value would land in
/// the secret as a plain literal and in the host's environment mirror
/// verbatim. Secrets must be declared as `{ SecretValue: ... }` instead.
///
/// # Errors
///
/// Returns `ConfigError::LeakingSecrets` naming every offending key, in
/// declaration order.
pub fn check_leaks(raw: &Map<String, Value>) -> Result<()> {
    let leaking: Vec<String> = raw
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if s.starts_with(LEAKING_PREFIX) => Some(key.clone()),
            _ => None,
        })
        .collect();

    if leaking.is_empty() {
        debug!(entries = raw.len(), "no leaking environment values");
        return Ok(());
    }

    Err(ConfigError::LeakingSecrets { keys: leaking }.into())
}

/// Validate an environment variable name.
///
/// Keys must be usable as Lambda environment variable names:
/// - Only ASCII letters, digits, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!(
                "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                ch,
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

/// Validate a secret value.
///
/// An empty secret cannot be supplied as a deployment parameter. The value
/// is spliced into the stored JSON by a `Ref` that CloudFormation does not
/// escape, so characters that must be escaped inside a JSON string are
/// rejected.
///
/// # Errors
///
/// Returns `ValidationError::EmptySecretValue` if the value is empty, or
/// `ValidationError::InvalidSecretValue` naming the first unescapable
/// character.
pub fn validate_secret_value(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptySecretValue(key.to_string()).into());
    }

    if let Some((i, ch)) = value
        .chars()
        .enumerate()
        .find(|(_, ch)| *ch == '"' || *ch == '\\' || ch.is_control())
    {
        return Err(ValidationError::InvalidSecretValue {
            key: key.to_string(),
            reason: format!(
                "character {:?} at position {} cannot be embedded in the secret document",
                ch,
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_no_leaks() {
        let raw = map(json!({
            "A": "plain",
            "B": { "SecretValue": "y" },
            "C": { "Ref": "Bucket" },
            "D": "prefix ${ssm:/not-at-start}",
        }));
        assert!(check_leaks(&raw).is_ok());
    }

    #[test]
    fn test_leaks_lists_every_key() {
        let raw = map(json!({
            "DB_PASSWORD": "${ssm:/app/db/password}",
            "PLAIN": "ok",
            "API_TOKEN": "${ssm:/app/api/token~true}",
        }));

        let err = check_leaks(&raw).unwrap_err();
        match &err {
            Error::Config(ConfigError::LeakingSecrets { keys }) => {
                assert_eq!(keys, &["DB_PASSWORD", "API_TOKEN"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("DB_PASSWORD, API_TOKEN"));
    }

    #[test]
    fn test_leak_check_ignores_secret_objects() {
        let raw = map(json!({ "B": { "SecretValue": "${ssm:/app/b}" } }));
        assert!(check_leaks(&raw).is_ok());
    }

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("DATABASE_URL").is_ok());
        assert!(validate_key("apiKey").is_ok());
        assert!(validate_key("_PRIVATE").is_ok());
        assert!(validate_key("A1").is_ok());
    }

    #[test]
    fn test_invalid_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("1KEY").is_err());
        assert!(validate_key("API-KEY").is_err());
        assert!(validate_key("API KEY").is_err());
        assert!(validate_key("API.KEY").is_err());
    }

    #[test]
    fn test_secret_values() {
        assert!(validate_secret_value("KEY", "value").is_ok());
        assert!(validate_secret_value("KEY", "p@ss word/with:$ymbols").is_ok());
        assert!(validate_secret_value("KEY", "").is_err());
    }

    #[test]
    fn test_secret_values_reject_unescapable_characters() {
        for value in ["p\"wd", "p\\wd", "line\nbreak", "tab\there", "nul\u{0}"] {
            let err = validate_secret_value("DB_PASSWORD", value).unwrap_err();
            assert!(
                matches!(
                    &err,
                    Error::Validation(ValidationError::InvalidSecretValue { key, .. }) if key == "DB_PASSWORD"
                ),
                "{:?} should be rejected",
                value
            );
        }

        let err = validate_secret_value("DB_PASSWORD", "p\"wd").unwrap_err();
        assert!(err.to_string().contains("DB_PASSWORD"));
        assert!(err.to_string().contains("'\"'"));
    }
}
