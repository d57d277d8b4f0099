use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Unable to read snapshot {0}: {1}")]
    UnableToRead(String, String),

    #[error("Snapshot {0} is malformed: {1}")]
    Malformed(String, String),

    #[error("Unable to write snapshot {0}: {1}")]
    UnableToWrite(String, String),
}
