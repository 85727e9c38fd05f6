use crate::config::{DEFAULT_BASE_PATH, DEFAULT_TOKEN_ENV};
use crate::domain::model::ProjectParams;
use crate::domain::ports::ConfigProvider;
use crate::git::GitIdentity;
use crate::utils::error::{BootstrapError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_path, validate_project_name,
    validate_template_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File-based configuration for the CLI, covering the same surface as the
/// individual flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub devops: DevopsConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevopsConfig {
    pub organization: String,
    pub project: String,
    pub template_repo: String,
    pub template_url: Option<String>,
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub base_path: Option<String>,
    pub git_user: Option<String>,
    pub git_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub aws_account_id: String,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub stacks: Vec<String>,
    #[serde(default)]
    pub initial_environments: Vec<String>,
    #[serde(default)]
    pub initial_stacks: Vec<String>,
    pub approver_email: String,
}

impl TomlConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: TomlConfig =
            toml::from_str(&raw).map_err(|e| BootstrapError::ConfigError {
                message: format!("Failed to parse {}: {}", path.display(), e),
            })?;
        Ok(config)
    }

    pub fn project_params(&self) -> ProjectParams {
        ProjectParams {
            aws_account_id: self.project.aws_account_id.clone(),
            project: self.project.name.clone(),
            environments: self.project.environments.clone(),
            stacks: self.project.stacks.clone(),
            initial_environments: self.project.initial_environments.clone(),
            initial_stacks: self.project.initial_stacks.clone(),
            approver_email: self.project.approver_email.clone(),
        }
    }

    pub fn identity(&self) -> GitIdentity {
        match (&self.bootstrap.git_user, &self.bootstrap.git_email) {
            (Some(name), Some(email)) => GitIdentity::new().author(name, email),
            _ => GitIdentity::new(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn organization(&self) -> &str {
        &self.devops.organization
    }

    fn devops_project(&self) -> &str {
        &self.devops.project
    }

    fn template_repo(&self) -> &str {
        &self.devops.template_repo
    }

    fn secret_name(&self) -> &str {
        self.devops.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)
    }

    fn base_path(&self) -> &str {
        self.bootstrap
            .base_path
            .as_deref()
            .unwrap_or(DEFAULT_BASE_PATH)
    }

    fn template_url(&self) -> Option<&str> {
        self.devops.template_url.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("devops.template_repo", &self.devops.template_repo)?;
        match &self.devops.template_url {
            Some(url) => validate_template_url("devops.template_url", url)?,
            None => {
                validate_non_empty_string("devops.organization", &self.devops.organization)?;
                validate_non_empty_string("devops.project", &self.devops.project)?;
            }
        }

        validate_path("bootstrap.base_path", self.base_path())?;
        validate_project_name("project.name", &self.project.name)?;
        validate_non_empty_string("project.aws_account_id", &self.project.aws_account_id)?;
        validate_email("project.approver_email", &self.project.approver_email)?;

        tracing::info!("✅ TOML configuration validation passed");
        Ok(())
    }
}
