use crate::config::errors::ConfigError;
use crate::config::native_tokens::default_native_tokens;
use crate::domain::{checksum, CanonicalToken, EvmNetwork, GenerationMethod, ProviderKind, TokenKey};
use alloy::primitives::{address, Address};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a provider's tokens come from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SourceConfig {
    /// A standard token list served over HTTP.
    Url { url: String },
    /// A standard token list on disk.
    File { path: PathBuf },
    /// A paginated API keyed by network name.
    Portals {
        base_url: String,
        #[serde(default)]
        page_size: Option<usize>,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub method: GenerationMethod,
    #[serde(default)]
    pub kind: ProviderKind,
    pub source: SourceConfig,
}

/// Descriptor of the aggregated meta-list.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateConfig {
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    pub keywords: Vec<String>,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            name: "tokenlistooor".to_string(),
            display_name: "Tokenlistooor Token List".to_string(),
            description: "A curated list of tokens from all the token lists on tokenlistooor."
                .to_string(),
            logo_uri: String::new(),
            keywords: vec!["tokenlistooor".to_string(), "aggregated".to_string()],
        }
    }
}

/// Forces a token to authoritative weight. Without `chainId` it applies on every chain.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightOverride {
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(with = "checksum")]
    pub address: Address,
}

impl WeightOverride {
    pub fn matches(&self, key: &TokenKey) -> bool {
        self.address == key.address && self.chain_id.map_or(true, |id| id == key.chain_id)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredToken {
    pub chain_id: u64,
    #[serde(with = "checksum")]
    pub address: Address,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Static, read-only tables consumed by the aggregation core.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatorConfig {
    pub supported_chains: BTreeSet<u64>,
    pub network_names: BTreeMap<String, u64>,
    pub authoritative_providers: BTreeSet<String>,
    pub weight_overrides: Vec<WeightOverride>,
    pub ignored_tokens: Vec<IgnoredToken>,
    pub native_tokens: Vec<CanonicalToken>,
    pub providers: Vec<ProviderConfig>,
    pub aggregate: AggregateConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            supported_chains: EvmNetwork::ALL.iter().map(|n| n.chain_id()).collect(),
            network_names: EvmNetwork::ALL
                .iter()
                .map(|n| (n.api_name().to_string(), n.chain_id()))
                .collect(),
            authoritative_providers: ["yearn", "smolAssets"].map(String::from).into(),
            weight_overrides: vec![WeightOverride {
                // Ajna
                chain_id: None,
                address: address!("0x9a96ec9B57Fb64FbC60B423d1f4da7691Bd35079"),
            }],
            ignored_tokens: Vec::new(),
            native_tokens: default_native_tokens(),
            providers: Vec::new(),
            aggregate: AggregateConfig::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::UnableToRead(display.clone(), err.to_string()))?;
        let config: AggregatorConfig = serde_json::from_str(&content)
            .map_err(|err| ConfigError::UnableToParse(display, err.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        names.insert(self.aggregate.name.as_str());
        check_list_name(&self.aggregate.name)?;

        for provider in &self.providers {
            check_list_name(&provider.name)?;
            if !names.insert(provider.name.as_str()) {
                return Err(ConfigError::DuplicateProvider(provider.name.clone()));
            }
        }

        if let Some(native) = self
            .native_tokens
            .iter()
            .find(|token| !self.is_chain_supported(token.chain_id))
        {
            return Err(ConfigError::UnsupportedNativeChain(native.chain_id));
        }

        Ok(())
    }

    pub fn is_chain_supported(&self, chain_id: u64) -> bool {
        self.supported_chains.contains(&chain_id)
    }

    pub fn is_authoritative(&self, provider: &str) -> bool {
        self.authoritative_providers.contains(provider)
    }

    pub fn has_weight_override(&self, key: &TokenKey) -> bool {
        self.weight_overrides.iter().any(|rule| rule.matches(key))
    }

    pub fn chain_id_by_name(&self, network: &str) -> Option<u64> {
        self.network_names.get(&network.to_lowercase()).copied()
    }

    pub fn ignored_keys(&self) -> HashSet<TokenKey> {
        self.ignored_tokens
            .iter()
            .map(|ignored| TokenKey::new(ignored.chain_id, ignored.address))
            .collect()
    }
}

fn check_list_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidListName(name.to_string()))
    }
}
