use thiserror::Error;

use crate::config::errors::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No providers selected, check --only against the configured providers")]
    NoProviders,

    #[error("{0} list(s) could not be updated")]
    ListsFailed(usize),
}
