use crate::config::{AggregateConfig, ProviderConfig};
use crate::domain::{ListExtensions, ListSnapshot};
use crate::services::reconciler::Reconciliation;
use std::collections::BTreeSet;

/// Presentation fields of a list. Empty fields fall back to the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDescriptor {
    pub name: String,
    pub description: String,
    pub logo_uri: String,
    pub keywords: BTreeSet<String>,
}

impl From<&ProviderConfig> for ListDescriptor {
    fn from(provider: &ProviderConfig) -> Self {
        let name = if provider.display_name.is_empty() {
            provider.name.clone()
        } else {
            provider.display_name.clone()
        };

        Self {
            name,
            description: provider.description.clone(),
            logo_uri: provider.logo_uri.clone(),
            keywords: provider.keywords.iter().cloned().collect(),
        }
    }
}

impl From<&AggregateConfig> for ListDescriptor {
    fn from(aggregate: &AggregateConfig) -> Self {
        Self {
            name: aggregate.display_name.clone(),
            description: aggregate.description.clone(),
            logo_uri: aggregate.logo_uri.clone(),
            keywords: aggregate.keywords.iter().cloned().collect(),
        }
    }
}

fn or_previous(value: &str, previous: &str) -> String {
    let chosen = if value.is_empty() { previous } else { value };
    chosen.to_string()
}

pub fn assemble(
    descriptor: &ListDescriptor,
    previous: &ListSnapshot,
    reconciliation: Reconciliation,
    metadata: Option<ListExtensions>,
) -> ListSnapshot {
    let keywords = if descriptor.keywords.is_empty() {
        previous.keywords.clone()
    } else {
        descriptor.keywords.clone()
    };

    ListSnapshot {
        name: or_previous(&descriptor.name, &previous.name),
        description: or_previous(&descriptor.description, &previous.description),
        timestamp: reconciliation.timestamp,
        version: reconciliation.version,
        logo_uri: or_previous(&descriptor.logo_uri, &previous.logo_uri),
        keywords,
        tokens: reconciliation.tokens,
        metadata: metadata.or_else(|| previous.metadata.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::fixtures::token;
    use crate::domain::{AggregatedToken, Version};
    use crate::services::reconciler::ListDelta;

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    fn reconciliation() -> Reconciliation {
        Reconciliation {
            tokens: vec![AggregatedToken::new(token(1, DAI, "Dai", "DAI", 18), 1)],
            version: Version::new(0, 2, 0),
            timestamp: "2024-03-01T12:30:00.000Z".to_string(),
            delta: ListDelta::default(),
            rejected: 0,
        }
    }

    fn previous() -> ListSnapshot {
        ListSnapshot {
            name: "Old".to_string(),
            description: "Old description".to_string(),
            logo_uri: "https://old/logo.svg".to_string(),
            keywords: BTreeSet::from(["old".to_string()]),
            ..ListSnapshot::default()
        }
    }

    #[test]
    fn descriptor_overrides_previous_values() {
        let descriptor = ListDescriptor {
            name: "Uniswap Token List".to_string(),
            description: "Tokens on Uniswap".to_string(),
            logo_uri: "https://new/logo.svg".to_string(),
            keywords: BTreeSet::from(["uniswap".to_string()]),
        };

        let list = assemble(&descriptor, &previous(), reconciliation(), None);

        assert_eq!(list.name, "Uniswap Token List");
        assert_eq!(list.logo_uri, "https://new/logo.svg");
        assert_eq!(list.keywords, BTreeSet::from(["uniswap".to_string()]));
        assert_eq!(list.version, Version::new(0, 2, 0));
        assert_eq!(list.tokens.len(), 1);
    }

    #[test]
    fn empty_descriptor_keeps_previous_values() {
        let list = assemble(&ListDescriptor::default(), &previous(), reconciliation(), None);

        assert_eq!(list.name, "Old");
        assert_eq!(list.description, "Old description");
        assert_eq!(list.keywords, BTreeSet::from(["old".to_string()]));
        assert_eq!(list.timestamp, "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn provider_display_name_falls_back_to_registry_name() {
        let provider: ProviderConfig = serde_json::from_str(
            r#"{ "name": "curve", "source": { "type": "url", "url": "https://curve.example/tokens.json" } }"#,
        )
        .unwrap();

        assert_eq!(ListDescriptor::from(&provider).name, "curve");
    }
}
