use std::collections::BTreeMap;

use reqwest::Client;

use crate::config::errors::ConfigError;
use crate::config::{AggregatorConfig, ProviderConfig, SourceConfig};
use crate::domain::ProviderInfo;
use crate::services::assembler::ListDescriptor;
use crate::services::token_sources::{LocalTokenList, PortalsApi, RemoteTokenList, TokenSource};

pub struct ProviderEntry {
    pub info: ProviderInfo,
    pub descriptor: ListDescriptor,
    pub source: Box<dyn TokenSource>,
}

/// Providers taking part in a run, keyed by name.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: BTreeMap<String, ProviderEntry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AggregatorConfig, client: &Client) -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        for provider in &config.providers {
            let source = build_source(&provider.source, client);
            registry.register(
                provider_info(provider),
                ListDescriptor::from(provider),
                source,
            )?;
        }

        Ok(registry)
    }

    pub fn register(
        &mut self,
        info: ProviderInfo,
        descriptor: ListDescriptor,
        source: Box<dyn TokenSource>,
    ) -> Result<(), ConfigError> {
        if self.entries.contains_key(&info.name) {
            return Err(ConfigError::DuplicateProvider(info.name));
        }

        self.entries.insert(
            info.name.clone(),
            ProviderEntry {
                info,
                descriptor,
                source,
            },
        );
        Ok(())
    }

    /// Keeps only the providers whose name satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|name, _| keep(name));
    }

    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn provider_info(provider: &ProviderConfig) -> ProviderInfo {
    ProviderInfo {
        name: provider.name.clone(),
        method: provider.method,
        kind: provider.kind,
    }
}

fn build_source(source: &SourceConfig, client: &Client) -> Box<dyn TokenSource> {
    match source {
        SourceConfig::Url { url } => Box::new(RemoteTokenList::new(client.clone(), url.clone())),
        SourceConfig::File { path } => Box::new(LocalTokenList::new(path.clone())),
        SourceConfig::Portals {
            base_url,
            page_size,
        } => Box::new(PortalsApi::new(client.clone(), base_url.clone(), *page_size)),
    }
}
