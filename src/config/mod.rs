#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
#[cfg(feature = "cli")]
pub mod toml_config;

/// Environment variable holding the access token for local runs.
pub const DEFAULT_TOKEN_ENV: &str = "AZDO_PAT";

/// Where the template repository gets cloned when no base path is given.
pub const DEFAULT_BASE_PATH: &str = "./workspace";

#[cfg(feature = "cli")]
use crate::domain::model::ProjectParams;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::git::config::{DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME};
#[cfg(feature = "cli")]
use crate::git::GitIdentity;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_path, validate_project_name,
    validate_required_field, validate_template_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "iac-bootstrap")]
#[command(about = "Seeds a project variable file into the IaC template repository")]
pub struct CliConfig {
    /// TOML configuration file; replaces the individual flags below
    #[arg(long)]
    pub config: Option<String>,

    /// Azure DevOps organization
    #[arg(long, default_value = "")]
    pub organization: String,

    /// Azure DevOps project hosting the template repository
    #[arg(long, default_value = "")]
    pub devops_project: String,

    /// Name of the template repository
    #[arg(long, default_value = "")]
    pub template_repo: String,

    /// Explicit clone URL or local path; replaces the Azure DevOps URL
    /// derived from the flags above
    #[arg(long)]
    pub template_url: Option<String>,

    /// Environment variable the access token is read from
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Directory the template repository is cloned into
    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// Committer name for the generated commit
    #[arg(long, default_value = DEFAULT_AUTHOR_NAME)]
    pub git_user: String,

    /// Committer email for the generated commit
    #[arg(long, default_value = DEFAULT_AUTHOR_EMAIL)]
    pub git_email: String,

    /// AWS account id the new project deploys into
    #[arg(long)]
    pub aws_account_id: Option<String>,

    /// Name of the new project
    #[arg(long)]
    pub project: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub environments: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub stacks: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub initial_environments: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub initial_stacks: Vec<String>,

    /// Email of the person approving promotions for this project
    #[arg(long)]
    pub approver_email: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn project_params(&self) -> Result<ProjectParams> {
        Ok(ProjectParams {
            aws_account_id: validate_required_field("aws_account_id", &self.aws_account_id)?
                .clone(),
            project: validate_required_field("project", &self.project)?.clone(),
            environments: self.environments.clone(),
            stacks: self.stacks.clone(),
            initial_environments: self.initial_environments.clone(),
            initial_stacks: self.initial_stacks.clone(),
            approver_email: validate_required_field("approver_email", &self.approver_email)?
                .clone(),
        })
    }

    pub fn identity(&self) -> GitIdentity {
        GitIdentity::new().author(&self.git_user, &self.git_email)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
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
        &self.token_env
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn template_url(&self) -> Option<&str> {
        self.template_url.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // The destination directory is derived from the repo name, so that
        // one is required even when an explicit URL is given.
        validate_non_empty_string("template_repo", &self.template_repo)?;
        match &self.template_url {
            Some(url) => validate_template_url("template_url", url)?,
            None => {
                validate_non_empty_string("organization", &self.organization)?;
                validate_non_empty_string("devops_project", &self.devops_project)?;
            }
        }

        validate_path("base_path", &self.base_path)?;
        validate_non_empty_string("token_env", &self.token_env)?;

        if let Some(project) = &self.project {
            validate_project_name("project", project)?;
        }
        if let Some(email) = &self.approver_email {
            validate_email("approver_email", email)?;
        }

        tracing::info!("✅ CLI configuration validation passed");
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["iac-bootstrap"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_full_flag_set() {
        let config = parse(&[
            "--organization",
            "acme",
            "--devops-project",
            "platform",
            "--template-repo",
            "iac-template",
            "--aws-account-id",
            "123456789012",
            "--project",
            "demo",
            "--environments",
            "dev,prod",
            "--initial-environments",
            "dev",
            "--approver-email",
            "approver@example.com",
        ]);

        assert!(config.validate().is_ok());
        let params = config.project_params().unwrap();
        assert_eq!(params.project, "demo");
        assert_eq!(params.environments, vec!["dev", "prod"]);
        assert!(params.stacks.is_empty());
    }

    #[test]
    fn test_validation_requires_devops_coordinates_or_url() {
        let config = parse(&["--template-repo", "iac-template"]);
        assert!(config.validate().is_err());

        let config = parse(&[
            "--template-repo",
            "iac-template",
            "--template-url",
            "/srv/git/template.git",
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_params_require_identifiers() {
        let config = parse(&["--template-repo", "iac-template"]);
        assert!(config.project_params().is_err());
    }

    #[test]
    fn test_rejects_uppercase_project_name() {
        let config = parse(&[
            "--template-repo",
            "iac-template",
            "--template-url",
            "/srv/git/template.git",
            "--project",
            "Demo",
        ]);
        assert!(config.validate().is_err());
    }
}
