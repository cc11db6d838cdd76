//! Derived names.
//!
//! The secret name is used as the store entry's name, inside the IAM
//! resource pattern, and as the runtime marker's value; all three come from
//! [`Naming::secret_name`].

use crate::core::config::ServiceConfig;
use crate::core::constants::{POLICY_SUFFIX, SECRET_LOGICAL_ID};
use crate::core::domain::Environment;
use crate::core::template::PolicyName;

/// Names derived from the service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub service: String,
    pub stage: String,
    pub stack_name: String,
    pub secret_name: String,
}

impl Naming {
    /// Derive names for a service, honoring a literal secret name override
    /// declared in the environment.
    pub fn new(config: &ServiceConfig, env: &Environment) -> Self {
        let service = config.service.clone();
        let stage = config.stage().to_string();
        let secret_name = env
            .secret_name_override()
            .map(str::to_string)
            .unwrap_or_else(|| default_secret_name(&service, &stage));

        Self {
            stack_name: config.stack_name(),
            service,
            stage,
            secret_name,
        }
    }

    /// Name of the execution role's main policy.
    pub fn policy_name(&self) -> PolicyName {
        PolicyName::from_parts("-", &[&self.service, &self.stage, POLICY_SUFFIX])
    }

    /// IAM resource pattern matching every version suffix of the secret.
    pub fn secret_arn_pattern(&self) -> String {
        format!(
            "arn:${{AWS::Partition}}:secretsmanager:${{AWS::Region}}:${{AWS::AccountId}}:secret:{}-*",
            self.secret_name
        )
    }

    /// `Fn::Sub` body of the stack-scoped export name.
    pub fn export_name(&self) -> String {
        format!("${{AWS::StackName}}:{}", SECRET_LOGICAL_ID)
    }
}

/// `{stage}/{service}/environment`
pub fn default_secret_name(service: &str, stage: &str) -> String {
    format!("{}/{}/environment", stage, service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Format;

    fn naming(json: &str) -> Naming {
        let config = ServiceConfig::parse(json, Format::Json, "s.json").unwrap();
        let env = Environment::from_map(&config.custom.environment).unwrap();
        Naming::new(&config, &env)
    }

    #[test]
    fn test_default_names() {
        let n = naming(r#"{"service": "svc"}"#);
        assert_eq!(n.secret_name, "dev/svc/environment");
        assert_eq!(n.stack_name, "svc-dev");
        assert_eq!(n.policy_name().render().as_deref(), Some("svc-dev-lambda"));
        assert_eq!(
            n.secret_arn_pattern(),
            "arn:${AWS::Partition}:secretsmanager:${AWS::Region}:${AWS::AccountId}:secret:dev/svc/environment-*"
        );
        assert_eq!(n.export_name(), "${AWS::StackName}:EnvironmentSecret");
    }

    #[test]
    fn test_secret_name_override() {
        let n = naming(
            r#"{"service": "svc", "custom": {"environment": {"SLS_ENVIRONMENT_SECRET_NAME": "shared/env"}}}"#,
        );
        assert_eq!(n.secret_name, "shared/env");
        assert!(n.secret_arn_pattern().ends_with(":secret:shared/env-*"));
    }
}
