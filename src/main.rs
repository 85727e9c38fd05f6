use std::path::Path;

use clap::Parser;
use iac_bootstrap::config::toml_config::TomlConfig;
use iac_bootstrap::core::{engine::BootstrapEngine, provision::RepoBootstrap};
use iac_bootstrap::domain::model::ProjectParams;
use iac_bootstrap::domain::ports::ConfigProvider;
use iac_bootstrap::git::GitIdentity;
use iac_bootstrap::utils::{logger, validation::Validate};
use iac_bootstrap::{CliConfig, EnvTokenSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting iac-bootstrap CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(Path::new(&path)) {
            Ok(config) => {
                let identity = config.identity();
                let params = config.project_params();
                run_bootstrap(config, params, identity).await
            }
            Err(e) => Err(e),
        },
        None => {
            let identity = cli.identity();
            match cli.project_params() {
                Ok(params) => run_bootstrap(cli, params, identity).await,
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(artifact) => {
            tracing::info!("✅ Bootstrap completed successfully!");
            println!("✅ Bootstrap completed successfully!");
            println!("📁 Variable file committed at: {}", artifact);
        }
        Err(e) => {
            tracing::error!("❌ Bootstrap failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_bootstrap<C>(
    config: C,
    params: ProjectParams,
    identity: GitIdentity,
) -> iac_bootstrap::Result<String>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let provision = RepoBootstrap::new(EnvTokenSource, config, params).with_identity(identity);
    BootstrapEngine::new(provision).run().await
}
