use thiserror::Error;

use crate::infra::errors::StorageError;

#[derive(Debug, Clone, Error)]
pub enum FetcherError {
    #[error("Unable to load list from {0}: {1}")]
    UnableToLoadList(String, String),

    #[error("Unable to read list file {0}: {1}")]
    UnableToReadFile(String, String),

    #[error("Malformed list from {0}: {1}")]
    MalformedList(String, String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("List {0} was not updated: {1}")]
    ListNotUpdated(String, #[source] StorageError),
}
