use std::env;

use aws_sdk_secretsmanager::Client as SecretsClient;

use crate::domain::model::AccessToken;
use crate::domain::ports::{ConfigProvider, TokenSource};
use crate::git::GitIdentity;
use crate::utils::error::{BootstrapError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_template_url, Validate,
};

/// Lambda configuration, read from the function's environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub organization: String,
    pub devops_project: String,
    pub template_repo: String,
    pub secret_name: String,
    pub base_path: String,
    pub template_url: Option<String>,
    pub git_user: Option<String>,
    pub git_email: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            organization: require_env("AZDO_ORG")?,
            devops_project: require_env("AZDO_PROJECT")?,
            template_repo: require_env("AZDO_INIT_IAC_REPO")?,
            secret_name: require_env("AZDO_PAT_SECRET_NAME")?,
            // /tmp is the only writable path inside the Lambda sandbox
            base_path: env::var("BASE_PATH").unwrap_or_else(|_| "/tmp".to_string()),
            template_url: env::var("TEMPLATE_URL").ok(),
            git_user: env::var("GIT_USER_NAME").ok(),
            git_email: env::var("GIT_USER_EMAIL").ok(),
        })
    }

    pub fn identity(&self) -> GitIdentity {
        match (&self.git_user, &self.git_email) {
            (Some(name), Some(email)) => GitIdentity::new().author(name, email),
            _ => GitIdentity::new(),
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| BootstrapError::MissingConfigError {
        field: name.to_string(),
    })
}

impl ConfigProvider for LambdaConfig {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn devops_project(&self) -> &str {
        &self.devops_project
    }

    fn template_repo(&self) -> &str {
        &self.template_repo
    }

    fn secret_name(&self) -> &str {
        &self.secret_name
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn template_url(&self) -> Option<&str> {
        self.template_url.as_deref()
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("organization", &self.organization)?;
        validate_non_empty_string("devops_project", &self.devops_project)?;
        validate_non_empty_string("template_repo", &self.template_repo)?;
        validate_non_empty_string("secret_name", &self.secret_name)?;
        validate_path("base_path", &self.base_path)?;
        if let Some(url) = &self.template_url {
            validate_template_url("template_url", url)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

/// Fetches the access token from AWS Secrets Manager. The secret value is a
/// JSON blob with a `token` field.
#[derive(Debug, Clone)]
pub struct SecretsManagerTokenSource {
    client: SecretsClient,
}

impl SecretsManagerTokenSource {
    pub fn new(client: SecretsClient) -> Self {
        Self { client }
    }
}

impl TokenSource for SecretsManagerTokenSource {
    async fn fetch_token(&self, secret_name: &str) -> Result<AccessToken> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| BootstrapError::SecretError {
                secret_name: secret_name.to_string(),
                message: format!("Failed to read secret: {}", e),
            })?;

        let raw = response
            .secret_string()
            .ok_or_else(|| BootstrapError::SecretError {
                secret_name: secret_name.to_string(),
                message: "Secret has no string payload".to_string(),
            })?;

        let payload: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| BootstrapError::SecretError {
                secret_name: secret_name.to_string(),
                message: format!("Secret payload is not valid JSON: {}", e),
            })?;

        let token = payload
            .get("token")
            .and_then(|value| value.as_str())
            .ok_or_else(|| BootstrapError::SecretError {
                secret_name: secret_name.to_string(),
                message: "Secret payload has no 'token' field".to_string(),
            })?;

        Ok(AccessToken::new(token))
    }
}
