//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An environment variable name (e.g., DATABASE_URL, API_KEY).
///
/// Doubles as the CloudFormation parameter key for secret entries.
pub type EnvKey = String;

/// A CloudFormation JSON object (`Parameters`, `Resources`, ...).
pub type TemplateObject = serde_json::Map<String, serde_json::Value>;

/// The host's environment mirror (`provider.environment`).
pub type EnvironmentMirror = serde_json::Map<String, serde_json::Value>;
