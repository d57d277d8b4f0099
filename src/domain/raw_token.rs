use crate::domain::token::TokenExtensions;
use serde::Deserialize;

/// How a provider identifies the chain of a record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChainRef {
    Id(u64),
    Name(String),
}

/// A token record as handed over by an adapter, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawToken {
    pub chain: ChainRef,
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub logos: Vec<String>,
    pub metadata: Option<TokenExtensions>,
}

impl Default for ChainRef {
    fn default() -> Self {
        ChainRef::Id(0)
    }
}

impl RawToken {
    pub fn new(chain: ChainRef, address: impl Into<String>) -> Self {
        Self {
            chain,
            address: address.into(),
            ..Default::default()
        }
    }
}
