//! Domain types.
//!
//! Models for the declared environment and the secret definitions derived
//! from it.

pub mod environment;
pub mod secret;

pub use environment::{EnvValue, Environment, EnvironmentEntry, SecretValue};
pub use secret::{ParameterDeclaration, SecretDefinition};
