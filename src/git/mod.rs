//! Git operations for the bootstrap hook: clone the template repository,
//! record the committer identity, commit the generated file, push it back.

pub mod client;
pub mod config;

pub use client::GitClient;
pub use config::GitIdentity;
