//! Service configuration.
//!
//! The subset of the host's service configuration the core reads: service
//! name, stage, stack name, the provider environment mirror, the deployment
//! parameter list, and `custom.environment`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::core::constants::DEFAULT_STAGE;
use crate::core::types::EnvironmentMirror;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Service configuration as declared by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub service: String,
    /// Provider section
    #[serde(default)]
    pub provider: Provider,
    /// Plugin-owned custom section
    #[serde(default)]
    pub custom: Custom,
}

/// `provider` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Deployment stage, `dev` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Explicit stack name, `{service}-{stage}` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    /// Environment declared for every function
    #[serde(default)]
    pub environment: EnvironmentMirror,
    /// Parameters handed to the deployment executor
    #[serde(default)]
    pub stack_parameters: Vec<Value>,
}

/// `custom` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Custom {
    /// Environment to materialize as a secret
    #[serde(default)]
    pub environment: Map<String, Value>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }
}

impl ServiceConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` for unreadable
    /// files, and `ConfigError::LeakingSecrets` if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading service config");

        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&contents, format, &path.display().to_string())
    }

    /// Parse and validate configuration contents.
    ///
    /// `origin` names the source in error messages.
    pub fn parse(contents: &str, format: Format, origin: &str) -> Result<Self> {
        let parse_err = |reason: String| ConfigError::Parse {
            path: origin.to_string(),
            reason,
        };

        let config: Self = match format {
            Format::Yaml => serde_yaml::from_str(contents).map_err(|e| parse_err(e.to_string()))?,
            Format::Json => serde_json::from_str(contents).map_err(|e| parse_err(e.to_string()))?,
            Format::Toml => toml::from_str(contents).map_err(|e| parse_err(e.to_string()))?,
        };

        debug!(
            service = %config.service,
            entries = config.custom.environment.len(),
            "service config loaded"
        );

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration before any templating happens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty service name and
    /// `ConfigError::LeakingSecrets` for leaking environment values.
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "service" }.into());
        }
        validation::check_leaks(&self.custom.environment)
    }

    /// Override the stage, as the host's `--stage` option does.
    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        if let Some(stage) = stage {
            self.provider.stage = Some(stage);
        }
        self
    }

    /// Deployment stage
    pub fn stage(&self) -> &str {
        self.provider.stage.as_deref().unwrap_or(DEFAULT_STAGE)
    }

    /// Name of the main stack
    pub fn stack_name(&self) -> String {
        self.provider
            .stack_name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.service, self.stage()))
    }
}
