//! Environment type.
//!
//! The declared `custom.environment` map, classified entry by entry.

use serde_json::{Map, Value};
use std::fmt;
use zeroize::Zeroizing;

use crate::core::constants::{SECRET_NAME_VAR, SECRET_VALUE_FIELD};
use crate::core::types::EnvKey;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// A plaintext secret value. Wiped on drop, redacted in `Debug`.
#[derive(Clone)]
pub struct SecretValue(Zeroizing<String>);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue([redacted])")
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SecretValue {}

/// How an environment value is supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    /// Plain string stored as-is.
    Literal(String),
    /// `{ SecretValue: ... }`, carried as a `NoEcho` parameter.
    Secret(SecretValue),
    /// An intrinsic function (`Ref`, `Fn::*`) passed through unchanged.
    Deferred(Value),
}

impl EnvValue {
    /// Classify a raw configuration value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for any shape other than a
    /// string, a single-field `SecretValue` object, or an intrinsic
    /// function object. The runtime marker key only accepts a string.
    pub fn classify(key: &str, raw: &Value) -> Result<Self> {
        let invalid = |reason: &str| -> crate::error::Error {
            ConfigError::InvalidValue {
                field: format!("custom.environment.{}", key),
                reason: reason.to_string(),
            }
            .into()
        };

        if key == SECRET_NAME_VAR && !raw.is_string() {
            return Err(invalid("the secret name must be a literal string"));
        }

        match raw {
            Value::String(s) => Ok(Self::Literal(s.clone())),
            Value::Object(obj) if obj.contains_key(SECRET_VALUE_FIELD) => {
                if obj.len() != 1 {
                    return Err(invalid("SecretValue objects cannot have other fields"));
                }
                match &obj[SECRET_VALUE_FIELD] {
                    Value::String(s) => {
                        validation::validate_secret_value(key, s)?;
                        Ok(Self::Secret(SecretValue::new(s.as_str())))
                    }
                    _ => Err(invalid("SecretValue must be a string")),
                }
            }
            Value::Object(obj) if !obj.is_empty() && obj.keys().all(|k| is_intrinsic(k)) => {
                Ok(Self::Deferred(raw.clone()))
            }
            Value::Object(_) => Err(invalid(
                "objects must be { SecretValue: string } or an intrinsic function (Ref, Fn::*)",
            )),
            _ => Err(invalid("expected a string or an object")),
        }
    }
}

fn is_intrinsic(key: &str) -> bool {
    key == "Ref" || key.starts_with("Fn::")
}

/// One declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentEntry {
    pub key: EnvKey,
    pub value: EnvValue,
}

/// The declared environment, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    entries: Vec<EnvironmentEntry>,
}

impl Environment {
    /// Classify every entry of a raw `custom.environment` map.
    ///
    /// Does not run the leak check; callers run
    /// [`validation::check_leaks`] on the raw map first.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid keys or unsupported value shapes.
    pub fn from_map(raw: &Map<String, Value>) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            validation::validate_key(key)?;
            entries.push(EnvironmentEntry {
                key: key.clone(),
                value: EnvValue::classify(key, value)?,
            });
        }
        Ok(Self { entries })
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[EnvironmentEntry] {
        &self.entries
    }

    /// Entries stored inside the secret (everything but the runtime marker).
    pub fn stored_entries(&self) -> impl Iterator<Item = &EnvironmentEntry> {
        self.entries.iter().filter(|e| e.key != SECRET_NAME_VAR)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Literal override for the secret name, if declared.
    pub fn secret_name_override(&self) -> Option<&str> {
        match self.get(SECRET_NAME_VAR) {
            Some(EnvValue::Literal(name)) => Some(name.as_str()),
            _ => None,
        }
    }
}
