use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Unable to read config file {0}: {1}")]
    UnableToRead(String, String),

    #[error("Unable to parse config file {0}: {1}")]
    UnableToParse(String, String),

    #[error("Provider {0} is defined more than once")]
    DuplicateProvider(String),

    #[error("Invalid list name {0:?}, should be a non-empty file stem")]
    InvalidListName(String),

    #[error("Native token configured for unsupported chain: {0}")]
    UnsupportedNativeChain(u64),
}
