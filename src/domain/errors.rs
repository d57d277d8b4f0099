use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvmError {
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),
}
