use crate::config::AggregatorConfig;
use crate::domain::{AggregatedToken, ListSnapshot, TokenKey, Version};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Last correctness gate before a token enters a list.
#[derive(Debug, Clone, Default)]
pub struct TokenFilter {
    supported_chains: HashSet<u64>,
    ignored: HashSet<TokenKey>,
}

impl TokenFilter {
    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self {
            supported_chains: config.supported_chains.iter().copied().collect(),
            ignored: config.ignored_keys(),
        }
    }

    pub fn accepts(&self, token: &AggregatedToken) -> bool {
        let token_data = &token.token;
        let complete = !token_data.name.is_empty() && !token_data.symbol.is_empty() && token_data.decimals > 0;

        complete
            && self.supported_chains.contains(&token_data.chain_id)
            && !self.ignored.contains(&token.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDelta {
    pub added: Vec<TokenKey>,
    pub removed: Vec<TokenKey>,
    pub modified: Vec<TokenKey>,
}

impl ListDelta {
    pub fn between(
        previous: &BTreeMap<TokenKey, AggregatedToken>,
        next: &BTreeMap<TokenKey, AggregatedToken>,
    ) -> Self {
        let mut delta = ListDelta::default();

        for (key, token) in next {
            match previous.get(key) {
                None => delta.added.push(*key),
                Some(old) if old.token != token.token => delta.modified.push(*key),
                Some(_) => {}
            }
        }

        delta.removed = previous
            .keys()
            .filter(|key| !next.contains_key(key))
            .copied()
            .collect();

        delta
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

impl Version {
    /// Removals bump major, additions bump minor, field changes bump patch.
    /// Only the highest-ranked kind of change counts.
    pub fn bump(self, delta: &ListDelta) -> Version {
        if !delta.removed.is_empty() {
            Version::new(self.major.saturating_add(1), 0, 0)
        } else if !delta.added.is_empty() {
            Version::new(self.major, self.minor.saturating_add(1), 0)
        } else if !delta.modified.is_empty() {
            Version::new(self.major, self.minor, self.patch.saturating_add(1))
        } else {
            self
        }
    }
}

/// Next state of a list, before it is wrapped with its descriptor.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub tokens: Vec<AggregatedToken>,
    pub version: Version,
    pub timestamp: String,
    pub delta: ListDelta,
    pub rejected: usize,
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Both maps of a reconciliation are built with this function so keys stay comparable.
fn keyed(tokens: impl IntoIterator<Item = AggregatedToken>) -> BTreeMap<TokenKey, AggregatedToken> {
    tokens.into_iter().map(|token| (token.key(), token)).collect()
}

pub fn reconcile(
    previous: &ListSnapshot,
    candidates: Vec<AggregatedToken>,
    filter: &TokenFilter,
    now: DateTime<Utc>,
) -> Reconciliation {
    let total = candidates.len();
    let next_tokens_map = keyed(candidates.into_iter().filter(|token| filter.accepts(token)));
    let previous_tokens_map = keyed(previous.tokens.iter().cloned());

    let delta = ListDelta::between(&previous_tokens_map, &next_tokens_map);
    let version = previous.version.bump(&delta);

    debug!(
        added = delta.added.len(),
        removed = delta.removed.len(),
        modified = delta.modified.len(),
        %version,
        "list reconciled"
    );

    Reconciliation {
        rejected: total - next_tokens_map.len(),
        tokens: next_tokens_map.into_values().collect(),
        version,
        timestamp: format_timestamp(now),
        delta,
    }
}
