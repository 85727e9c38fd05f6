use std::env;

use crate::domain::model::AccessToken;
use crate::domain::ports::TokenSource;
use crate::utils::error::{BootstrapError, Result};

/// Token source for local runs: the "secret name" is the name of an
/// environment variable holding the access token.
#[derive(Debug, Clone, Default)]
pub struct EnvTokenSource;

impl TokenSource for EnvTokenSource {
    async fn fetch_token(&self, secret_name: &str) -> Result<AccessToken> {
        let raw = env::var(secret_name).map_err(|_| BootstrapError::SecretError {
            secret_name: secret_name.to_string(),
            message: "environment variable is not set".to_string(),
        })?;

        if raw.trim().is_empty() {
            return Err(BootstrapError::SecretError {
                secret_name: secret_name.to_string(),
                message: "environment variable is empty".to_string(),
            });
        }

        Ok(AccessToken::new(raw))
    }
}
