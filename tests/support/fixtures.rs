//! Test fixtures and constants.

/// The two-entry service from the README example.
pub const BASIC_CONFIG: &str = r#"
service: svc
provider:
  name: aws
  environment:
    LOG_LEVEL: info
custom:
  environment:
    A: x
    B:
      SecretValue: y
"#;

/// A service mixing every entry kind.
pub const MIXED_CONFIG: &str = r#"
service: orders
provider:
  stage: prod
custom:
  environment:
    DATABASE_HOST: db.internal
    DATABASE_PASSWORD:
      SecretValue: "p@ss word"
    QUEUE_URL:
      Ref: OrdersQueue
    API_TOKEN:
      SecretValue: tok-123
"#;

/// A service that would leak an SSM parameter into a plain variable.
pub const LEAKING_CONFIG: &str = r#"
service: svc
custom:
  environment:
    DB_PASSWORD: "${ssm:/svc/db/password}"
    API_KEY: "${ssm:/svc/api/key}"
    PLAIN: ok
"#;

/// A compiled template for `svc` at stage `dev`.
pub const COMPILED_TEMPLATE: &str = r#"{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Resources": {
    "ServerlessDeploymentBucket": { "Type": "AWS::S3::Bucket" },
    "HelloLambdaFunction": {
      "Type": "AWS::Lambda::Function",
      "Properties": {
        "Handler": "index.handler",
        "Environment": { "Variables": { "LOG_LEVEL": "info" } }
      }
    },
    "IamRoleLambdaExecution": {
      "Type": "AWS::IAM::Role",
      "Properties": {
        "Policies": [
          {
            "PolicyName": { "Fn::Join": ["-", ["svc", "dev", "lambda"]] },
            "PolicyDocument": {
              "Version": "2012-10-17",
              "Statement": [
                { "Effect": "Allow", "Action": ["logs:CreateLogStream"], "Resource": "*" }
              ]
            }
          }
        ]
      }
    }
  },
  "Outputs": {
    "ServerlessDeploymentBucketName": { "Value": { "Ref": "ServerlessDeploymentBucket" } }
  }
}"#;
