#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_secretsmanager::Client as SecretsClient;
#[cfg(feature = "lambda")]
use iac_bootstrap::config::lambda::{LambdaConfig, SecretsManagerTokenSource};
#[cfg(feature = "lambda")]
use iac_bootstrap::core::{engine::BootstrapEngine, provision::RepoBootstrap};
#[cfg(feature = "lambda")]
use iac_bootstrap::domain::model::{CustomResourceEvent, ProjectParams};
#[cfg(feature = "lambda")]
use iac_bootstrap::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub physical_resource_id: String,
    pub message: String,
    pub artifact_path: Option<String>,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<CustomResourceEvent>) -> Result<Response, Error> {
    let payload = event.payload;

    // Only creation does work; updates and deletions acknowledge and return.
    if !payload.request_type.is_create() {
        tracing::info!("Nothing to do for {:?} request", payload.request_type);
        return Ok(Response {
            physical_resource_id: "iac-bootstrap".to_string(),
            message: format!("No-op for {:?} request", payload.request_type),
            artifact_path: None,
        });
    }

    tracing::info!("Starting script...");

    let config = LambdaConfig::from_env().map_err(boxed)?;
    config.validate().map_err(boxed)?;

    let properties = payload
        .resource_properties
        .ok_or("Create event is missing ResourceProperties")?;
    let params = ProjectParams::from_properties(&properties);
    let project = params.project.clone();
    let identity = config.identity();

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let secrets = SecretsClient::new(&aws_config);

    let provision = RepoBootstrap::new(SecretsManagerTokenSource::new(secrets), config, params)
        .with_identity(identity);
    let engine = BootstrapEngine::new(provision);
    let artifact_path = engine.run().await.map_err(boxed)?;

    tracing::info!("Script completed successfully.");
    Ok(Response {
        physical_resource_id: format!("iac-bootstrap-{}", project),
        message: format!("IaC repository initialized for project \"{}\"", project),
        artifact_path: Some(artifact_path),
    })
}

#[cfg(feature = "lambda")]
fn boxed(e: iac_bootstrap::BootstrapError) -> Error {
    Box::new(e) as Box<dyn std::error::Error + Send + Sync>
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}
