//! Constants used throughout envsecret.
//!
//! Centralizes the names shared with the host template and the workload.

/// Runtime marker variable holding the secret name. Also the override key
/// for a custom secret name in `custom.environment`.
pub const SECRET_NAME_VAR: &str = "SLS_ENVIRONMENT_SECRET_NAME";

/// Prefix of a host variable that resolves an SSM parameter in place.
pub const LEAKING_PREFIX: &str = "${ssm:/";

/// Field marking an environment entry as a secret value.
pub const SECRET_VALUE_FIELD: &str = "SecretValue";

/// Logical id used for both the secret resource and its output.
pub const SECRET_LOGICAL_ID: &str = "EnvironmentSecret";

/// CloudFormation type of the secret resource.
pub const SECRET_RESOURCE_TYPE: &str = "AWS::SecretsManager::Secret";

/// Logical id of the compute role the host compiles.
pub const EXECUTION_ROLE_ID: &str = "IamRoleLambdaExecution";

/// Last name-part of the execution role's main policy.
pub const POLICY_SUFFIX: &str = "lambda";

/// IAM action granted on the secret.
pub const READ_SECRET_ACTION: &str = "secretsmanager:GetSecretValue";

/// Stage used when the host config does not declare one.
pub const DEFAULT_STAGE: &str = "dev";

/// Set by the offline emulator.
pub const OFFLINE_MARKER: &str = "IS_OFFLINE";

/// Set by local invocation.
pub const LOCAL_MARKER: &str = "IS_LOCAL";

/// Variables that mark an offline/local workload.
pub const OFFLINE_MARKERS: &[&str] = &[OFFLINE_MARKER, LOCAL_MARKER];
