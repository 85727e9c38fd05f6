pub mod engine;
pub mod provision;
pub mod tfvars;

pub use crate::domain::model::{AccessToken, ProjectParams};
pub use crate::domain::ports::{ConfigProvider, Provision, TokenSource};
pub use crate::utils::error::Result;
