//! Secret definition collection.
//!
//! Splits the declared environment into the entries stored as literals and
//! the ones that travel as deployment parameters.

use tracing::debug;

use crate::core::domain::{EnvValue, Environment, ParameterDeclaration, SecretDefinition};
use crate::core::types::{EnvKey, TemplateObject};

/// Secret definitions and their parameter declarations, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub definitions: Vec<SecretDefinition>,
    pub declarations: Vec<(EnvKey, ParameterDeclaration)>,
}

impl Collected {
    /// Declarations as a `Parameters` block fragment.
    pub fn declarations_object(&self) -> TemplateObject {
        self.declarations
            .iter()
            .map(|(key, decl)| (key.clone(), decl.to_template()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Collect one definition and one `NoEcho` declaration per secret entry.
///
/// Literal and deferred entries produce nothing. Keys are unique in the
/// source map, so no entry yields more than one definition.
pub fn collect(env: &Environment) -> Collected {
    let mut collected = Collected::default();

    for entry in env.entries() {
        if let EnvValue::Secret(value) = &entry.value {
            collected
                .definitions
                .push(SecretDefinition::new(entry.key.clone(), value.clone()));
            collected
                .declarations
                .push((entry.key.clone(), ParameterDeclaration));
        }
    }

    debug!(
        entries = env.len(),
        secrets = collected.definitions.len(),
        "collected secret definitions"
    );

    collected
}
