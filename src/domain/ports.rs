use crate::domain::model::AccessToken;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Fetch-by-name access to the external secret store.
pub trait TokenSource: Send + Sync {
    fn fetch_token(
        &self,
        secret_name: &str,
    ) -> impl std::future::Future<Output = Result<AccessToken>> + Send;
}

/// Settings shared by every entry point: where the template repository lives
/// and where to put the working copy.
pub trait ConfigProvider: Send + Sync {
    fn organization(&self) -> &str;
    fn devops_project(&self) -> &str;
    fn template_repo(&self) -> &str;
    fn secret_name(&self) -> &str;
    fn base_path(&self) -> &str;
    /// Explicit clone URL; when set it replaces the URL derived from the
    /// organization/project/repo triple.
    fn template_url(&self) -> Option<&str>;
}

/// The four steps of the create action, in invocation order.
#[async_trait]
pub trait Provision: Send + Sync {
    async fn authenticate(&self) -> Result<AccessToken>;
    async fn checkout(&self, token: &AccessToken) -> Result<PathBuf>;
    async fn render(&self, workdir: &Path) -> Result<String>;
    async fn publish(&self, token: &AccessToken, workdir: &Path, artifact: &str) -> Result<()>;
}
