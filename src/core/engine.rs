use crate::domain::ports::Provision;
use crate::utils::error::Result;

/// Drives the create action through its four steps, strictly in order. The
/// first failing step aborts the run; the error propagates to the caller
/// untouched.
pub struct BootstrapEngine<P: Provision> {
    provision: P,
}

impl<P: Provision> BootstrapEngine<P> {
    pub fn new(provision: P) -> Self {
        Self { provision }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting bootstrap...");

        let token = self.provision.authenticate().await?;
        let workdir = self.provision.checkout(&token).await?;
        let artifact = self.provision.render(&workdir).await?;
        self.provision.publish(&token, &workdir, &artifact).await?;

        tracing::info!("Bootstrap completed successfully.");
        Ok(artifact)
    }
}
