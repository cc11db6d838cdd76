//! Lifecycle phases.
//!
//! The host calls into the core at a fixed set of named points. Each phase
//! maps statically to one handler; the host context is passed in by value
//! and handed back, so every phase's inputs and outputs are explicit.
//!
//! ```text
//! initialize ─┬─> before:offline:start / before:invoke:local:loadEnvVars   (local)
//!             └─> before:package:finalize ─> [bootstrap deploy] ─> after:aws:deploy:deploy:createStack
//! ```

use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::core::config::ServiceConfig;
use crate::core::constants::SECRET_NAME_VAR;
use crate::core::domain::Environment;
use crate::core::env::{Memory, ProcessEnv};
use crate::core::local;
use crate::core::naming::Naming;
use crate::core::secrets::{self, Collected};
use crate::core::template::{self, Template};
use crate::core::types::EnvironmentMirror;
use crate::error::{LifecycleError, Result};

/// A point in the host's lifecycle where the core runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Entry classification and runtime marker injection.
    Initialize,
    /// Offline emulator start.
    OfflineStart,
    /// Local invocation, before environment variables are loaded.
    InvokeLocal,
    /// Before the compiled template is finalized for packaging.
    PackageFinalize,
    /// After the parameterless bootstrap stack has been deployed.
    AfterBootstrapDeploy,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Initialize,
        Phase::OfflineStart,
        Phase::InvokeLocal,
        Phase::PackageFinalize,
        Phase::AfterBootstrapDeploy,
    ];

    /// The host's hook name for this phase.
    pub fn hook(self) -> &'static str {
        match self {
            Phase::Initialize => "initialize",
            Phase::OfflineStart => "before:offline:start",
            Phase::InvokeLocal => "before:invoke:local:loadEnvVars",
            Phase::PackageFinalize => "before:package:finalize",
            Phase::AfterBootstrapDeploy => "after:aws:deploy:deploy:createStack",
        }
    }

    /// Parse a host hook name.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnknownHook` for names outside the phase set.
    pub fn from_hook(name: &str) -> Result<Self> {
        Phase::ALL
            .into_iter()
            .find(|p| p.hook() == name)
            .ok_or_else(|| LifecycleError::UnknownHook(name.to_string()).into())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook())
    }
}

/// Host-owned state the phases read and write.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    /// `provider.environment`
    pub environment: EnvironmentMirror,
    /// `provider.stackParameters`
    pub stack_parameters: Vec<Value>,
    /// The compiled template, present from packaging on.
    pub template: Option<Template>,
}

impl HostContext {
    /// Context seeded from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            environment: config.provider.environment.clone(),
            stack_parameters: config.provider.stack_parameters.clone(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }
}

type Handler = fn(&Session, HostContext, &mut dyn ProcessEnv) -> Result<HostContext>;

const HANDLERS: &[(Phase, Handler)] = &[
    (Phase::Initialize, inject_marker),
    (Phase::OfflineStart, expand_local),
    (Phase::InvokeLocal, expand_local),
    (Phase::PackageFinalize, update_template),
    (Phase::AfterBootstrapDeploy, relay_parameters),
];

fn handler(phase: Phase) -> Result<Handler> {
    HANDLERS
        .iter()
        .find(|(p, _)| *p == phase)
        .map(|(_, h)| *h)
        .ok_or_else(|| LifecycleError::MissingHook(phase.hook().to_string()).into())
}

/// Check that every phase has a handler.
///
/// # Errors
///
/// Returns `LifecycleError::MissingHook` naming the first phase without one.
pub fn validate_handlers() -> Result<()> {
    for phase in Phase::ALL {
        handler(phase)?;
    }
    Ok(())
}

/// Classified environment and derived names for one host invocation.
#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
    collected: Collected,
    naming: Naming,
}

impl Session {
    /// Validate and classify the declared environment, then run the
    /// `initialize` phase.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` or `ValidationError` for invalid declarations.
    pub fn initialize(config: &ServiceConfig, host: HostContext) -> Result<(Self, HostContext)> {
        validate_handlers()?;
        config.validate()?;

        let env = Environment::from_map(&config.custom.environment)?;
        let collected = secrets::collect(&env);
        let naming = Naming::new(config, &env);

        let session = Self {
            env,
            collected,
            naming,
        };
        let host = session.run(Phase::Initialize, host, &mut Memory::new())?;

        Ok((session, host))
    }

    /// Run one phase.
    pub fn run(
        &self,
        phase: Phase,
        host: HostContext,
        process: &mut dyn ProcessEnv,
    ) -> Result<HostContext> {
        debug!(phase = %phase, "running lifecycle hook");
        handler(phase)?(self, host, process)
    }

    /// Run the phase for a host hook name.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnknownHook` for unrecognized names.
    pub fn run_hook(
        &self,
        hook: &str,
        host: HostContext,
        process: &mut dyn ProcessEnv,
    ) -> Result<HostContext> {
        self.run(Phase::from_hook(hook)?, host, process)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn collected(&self) -> &Collected {
        &self.collected
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }
}

/// Declare the runtime marker in the host's environment mirror.
fn inject_marker(
    session: &Session,
    mut host: HostContext,
    _: &mut dyn ProcessEnv,
) -> Result<HostContext> {
    host.environment.insert(
        SECRET_NAME_VAR.to_string(),
        Value::String(session.naming.secret_name.clone()),
    );
    Ok(host)
}

fn expand_local(
    session: &Session,
    mut host: HostContext,
    process: &mut dyn ProcessEnv,
) -> Result<HostContext> {
    local::expand(
        &session.env,
        &session.collected,
        process,
        &mut host.environment,
    );
    Ok(host)
}

fn update_template(
    session: &Session,
    mut host: HostContext,
    _: &mut dyn ProcessEnv,
) -> Result<HostContext> {
    let compiled = host
        .template
        .take()
        .ok_or(LifecycleError::MissingTemplate(Phase::PackageFinalize.hook()))?;
    let augmented = template::augment(
        compiled,
        &session.env,
        &session.collected,
        &session.naming,
    )?;
    host.template = Some(augmented);
    Ok(host)
}

/// Hand the secret parameters to the deployment executor.
///
/// The bootstrap stack's template declares no parameters, so this only runs
/// once that deployment has completed.
fn relay_parameters(
    session: &Session,
    mut host: HostContext,
    _: &mut dyn ProcessEnv,
) -> Result<HostContext> {
    for def in &session.collected.definitions {
        host.stack_parameters.push(serde_json::to_value(def)?);
    }
    info!(
        parameters = session.collected.definitions.len(),
        "relayed secret stack parameters"
    );
    Ok(host)
}
