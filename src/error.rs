//! Error types for envsecret.
//!
//! Errors are grouped by the stage of the pipeline that raises them so the
//! CLI can attach a hint to the ones a user can act on.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Problems with the declared service configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "invalid custom.environment configuration. the following variables will leak secret values: {}",
        .keys.join(", ")
    )]
    LeakingSecrets { keys: Vec<String> },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("unsupported config format: {0} (expected .yml, .yaml, .json or .toml)")]
    UnsupportedFormat(String),
}

/// Invalid environment keys or values.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("environment key cannot be empty")]
    EmptyKey,

    #[error("invalid environment key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("secret value for '{0}' is empty")]
    EmptySecretValue(String),

    #[error("invalid secret value for '{key}': {reason}")]
    InvalidSecretValue { key: String, reason: String },
}

/// The compiled template does not have the shape the augmenter expects.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template root is not an object")]
    NotAnObject,

    #[error("template section '{0}' is not an object")]
    InvalidSection(&'static str),

    #[error("execution role resource '{0}' not found in template")]
    MissingExecutionRole(String),

    #[error("no policy named '{expected}' on the execution role")]
    MissingPolicy { expected: String },

    #[error("{count} policies named '{expected}' on the execution role")]
    AmbiguousPolicy { expected: String, count: usize },

    #[error("policy '{0}' has no PolicyDocument.Statement list")]
    MissingStatementList(String),
}

/// Phase dispatch errors.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("unknown lifecycle hook: {0}")]
    UnknownHook(String),

    #[error("no handler registered for lifecycle hook: {0}")]
    MissingHook(String),

    #[error("lifecycle hook {0} needs a compiled template")]
    MissingTemplate(&'static str),
}

/// Errors on the workload side of the secret.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("{0} is not set")]
    MissingSecretName(&'static str),

    #[error("failed to fetch secret '{name}': {reason}")]
    Fetch { name: String, reason: String },

    #[error("secret '{name}' is not a flat JSON object of strings: {reason}")]
    Decode { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
