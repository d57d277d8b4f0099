use crate::domain::address::checksum;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Weight given to tokens that must bypass quorum.
pub const AUTHORITATIVE_WEIGHT: u32 = u32::MAX;

/// Identity of a token: one address on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub chain_id: u64,
    pub address: Address,
}

impl TokenKey {
    pub fn new(chain_id: u64, address: Address) -> Self {
        Self { chain_id, address }
    }
}

/// Known token extensions. Keys this version does not understand are kept in `unknown`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl TokenExtensions {
    pub fn is_empty(&self) -> bool {
        self.liquidity.is_none()
            && self.platform.is_none()
            && self.tags.is_empty()
            && self.unknown.is_empty()
    }
}

/// One asset on one chain as reported by one provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalToken {
    #[serde(with = "checksum")]
    pub address: Address,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: String,
    pub chain_id: u64,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TokenExtensions>,
}

impl CanonicalToken {
    pub fn key(&self) -> TokenKey {
        TokenKey::new(self.chain_id, self.address)
    }

    /// Fills every empty field of `self` from `other`; non-empty fields are kept.
    /// Decimals of 0 count as empty.
    pub fn merge_missing(&mut self, other: &CanonicalToken) {
        fill_str(&mut self.name, &other.name);
        fill_str(&mut self.symbol, &other.symbol);
        fill_str(&mut self.logo_uri, &other.logo_uri);

        if self.decimals == 0 {
            self.decimals = other.decimals;
        }

        let missing_metadata = self.metadata.as_ref().map_or(true, TokenExtensions::is_empty);
        if missing_metadata && other.metadata.is_some() {
            self.metadata = other.metadata.clone();
        }
    }
}

fn fill_str(target: &mut String, fallback: &str) {
    if target.is_empty() {
        *target = fallback.to_string();
    }
}

/// A canonical token plus the number of distinct providers that reported it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AggregatedToken {
    #[serde(flatten)]
    pub token: CanonicalToken,
    #[serde(skip, default = "initial_occurrence")]
    pub occurrence: u32,
}

fn initial_occurrence() -> u32 {
    1
}

impl AggregatedToken {
    pub fn new(token: CanonicalToken, weight: u32) -> Self {
        Self {
            token,
            occurrence: weight.max(1),
        }
    }

    pub fn key(&self) -> TokenKey {
        self.token.key()
    }

    /// Records another provider's sighting: fills missing fields and bumps the count.
    pub fn absorb(&mut self, other: &CanonicalToken) {
        self.token.merge_missing(other);
        self.occurrence = self.occurrence.saturating_add(1);
    }

    pub fn is_authoritative(&self) -> bool {
        self.occurrence == AUTHORITATIVE_WEIGHT
    }
}
