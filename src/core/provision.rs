use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::tfvars;
use crate::domain::model::{AccessToken, ProjectParams};
use crate::domain::ports::{ConfigProvider, Provision, TokenSource};
use crate::git::{GitClient, GitIdentity};
use crate::utils::error::Result;

/// The real create action: secret lookup, clone, variable-file write,
/// commit and push. Every step logs before and after, and logs again on
/// failure before propagating the error unchanged.
pub struct RepoBootstrap<T: TokenSource, C: ConfigProvider> {
    tokens: T,
    config: C,
    params: ProjectParams,
    identity: GitIdentity,
}

impl<T: TokenSource, C: ConfigProvider> RepoBootstrap<T, C> {
    pub fn new(tokens: T, config: C, params: ProjectParams) -> Self {
        Self {
            tokens,
            config,
            params,
            identity: GitIdentity::new(),
        }
    }

    pub fn with_identity(mut self, identity: GitIdentity) -> Self {
        self.identity = identity;
        self
    }

    fn remote_url(&self) -> String {
        match self.config.template_url() {
            Some(url) => url.to_string(),
            None => format!(
                "https://dev.azure.com/{}/{}/_git/{}",
                self.config.organization(),
                self.config.devops_project(),
                self.config.template_repo()
            ),
        }
    }

    fn client(&self, token: &AccessToken) -> GitClient {
        GitClient::new(self.identity.clone()).with_token(token.clone())
    }
}

#[async_trait]
impl<T: TokenSource, C: ConfigProvider> Provision for RepoBootstrap<T, C> {
    async fn authenticate(&self) -> Result<AccessToken> {
        tracing::info!("Fetching access token from secret store...");
        let token = self
            .tokens
            .fetch_token(self.config.secret_name())
            .await
            .inspect_err(|e| tracing::error!("Error fetching access token: {}", e))?;
        tracing::info!("Access token retrieved successfully.");
        Ok(token)
    }

    async fn checkout(&self, token: &AccessToken) -> Result<PathBuf> {
        tracing::info!("Cloning repository...");
        let dest = Path::new(self.config.base_path()).join(self.config.template_repo());
        let client = self.client(token);
        client
            .clone_repo(&self.remote_url(), &dest)
            .inspect_err(|e| tracing::error!("Error cloning repository: {}", e))?;
        tracing::info!("Repository cloned successfully.");

        tracing::info!("Setting Git user and email...");
        client
            .configure_identity(&dest)
            .inspect_err(|e| tracing::error!("Error setting Git user and email: {}", e))?;
        tracing::info!("Git user and email set successfully.");

        Ok(dest)
    }

    async fn render(&self, workdir: &Path) -> Result<String> {
        tracing::info!("Generating .tfvars file...");
        let artifact = tfvars::relative_path(&self.params.project);
        let content = tfvars::render(&self.params, tfvars::catalog_now());

        let target = workdir.join(&artifact);
        let write = || -> Result<()> {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &content)?;
            Ok(())
        };
        write().inspect_err(|e| tracing::error!("Error generating .tfvars file: {}", e))?;

        tracing::info!("{}.tfvars file generated successfully.", self.params.project);
        Ok(artifact)
    }

    async fn publish(&self, token: &AccessToken, workdir: &Path, artifact: &str) -> Result<()> {
        tracing::info!("Committing and pushing changes...");
        let message = format!(
            "feat: Initialize IaC repository for project \"{}\"",
            self.params.project
        );

        let client = self.client(token);
        client
            .commit_file(workdir, artifact, &message)
            .inspect_err(|e| tracing::error!("Error committing changes: {}", e))?;
        client
            .push(workdir)
            .inspect_err(|e| tracing::error!("Error pushing changes: {}", e))?;

        tracing::info!("Changes committed and pushed successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubTokens;

    impl TokenSource for StubTokens {
        async fn fetch_token(&self, _secret_name: &str) -> Result<AccessToken> {
            Ok(AccessToken::new("stub"))
        }
    }

    struct StubConfig {
        template_url: Option<String>,
    }

    impl ConfigProvider for StubConfig {
        fn organization(&self) -> &str {
            "acme"
        }
        fn devops_project(&self) -> &str {
            "platform"
        }
        fn template_repo(&self) -> &str {
            "iac-template"
        }
        fn secret_name(&self) -> &str {
            "azdo-pat"
        }
        fn base_path(&self) -> &str {
            "/tmp"
        }
        fn template_url(&self) -> Option<&str> {
            self.template_url.as_deref()
        }
    }

    fn params() -> ProjectParams {
        ProjectParams {
            aws_account_id: "123456789012".to_string(),
            project: "demo".to_string(),
            environments: vec![],
            stacks: vec![],
            initial_environments: vec![],
            initial_stacks: vec![],
            approver_email: "approver@example.com".to_string(),
        }
    }

    #[test]
    fn test_remote_url_derived_from_devops_settings() {
        let bootstrap = RepoBootstrap::new(StubTokens, StubConfig { template_url: None }, params());
        assert_eq!(
            bootstrap.remote_url(),
            "https://dev.azure.com/acme/platform/_git/iac-template"
        );
    }

    #[test]
    fn test_remote_url_override_wins() {
        let bootstrap = RepoBootstrap::new(
            StubTokens,
            StubConfig {
                template_url: Some("/srv/git/template.git".to_string()),
            },
            params(),
        );
        assert_eq!(bootstrap.remote_url(), "/srv/git/template.git");
    }
}
