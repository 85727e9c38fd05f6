pub mod config;
pub mod core;
pub mod domain;
pub mod git;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::EnvTokenSource, CliConfig};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{LambdaConfig, SecretsManagerTokenSource};

pub use crate::core::{engine::BootstrapEngine, provision::RepoBootstrap};
pub use crate::domain::model::{AccessToken, CustomResourceEvent, ProjectParams, RequestType};
pub use crate::utils::error::{BootstrapError, Result};
