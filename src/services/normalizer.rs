use crate::config::AggregatorConfig;
use crate::domain::errors::EvmError;
use crate::domain::{parse_address, CanonicalToken, ChainRef, RawToken, UNSUPPORTED_CHAIN_ID};

/// Resolves the chain of a raw record. Unknown network names resolve to
/// [`UNSUPPORTED_CHAIN_ID`] so the chain support filter can drop them later.
pub fn resolve_chain_id(chain: &ChainRef, config: &AggregatorConfig) -> u64 {
    match chain {
        ChainRef::Id(id) => *id,
        ChainRef::Name(name) => name
            .trim()
            .parse()
            .ok()
            .or_else(|| config.chain_id_by_name(name))
            .unwrap_or(UNSUPPORTED_CHAIN_ID),
    }
}

pub fn normalize(raw: RawToken, config: &AggregatorConfig) -> Result<CanonicalToken, EvmError> {
    let address = parse_address(&raw.address)?;
    let chain_id = resolve_chain_id(&raw.chain, config);

    Ok(CanonicalToken {
        address,
        name: raw.name.unwrap_or_default(),
        symbol: raw.symbol.unwrap_or_default(),
        logo_uri: raw.logos.into_iter().next().unwrap_or_default(),
        chain_id,
        decimals: raw.decimals.unwrap_or_default(),
        metadata: raw.metadata.filter(|metadata| !metadata.is_empty()),
    })
}

/// Normalizes a whole provider batch. Malformed records are skipped; the
/// number skipped is returned for diagnostics.
pub fn normalize_all(raws: Vec<RawToken>, config: &AggregatorConfig) -> (Vec<CanonicalToken>, usize) {
    let total = raws.len();
    let tokens: Vec<CanonicalToken> = raws
        .into_iter()
        .filter_map(|raw| normalize(raw, config).ok())
        .collect();

    let skipped = total - tokens.len();
    (tokens, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenExtensions;

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    fn raw(chain: ChainRef, address: &str) -> RawToken {
        RawToken {
            name: Some("Dai Stablecoin".to_string()),
            symbol: Some("DAI".to_string()),
            decimals: Some(18),
            logos: vec!["https://logo/1.png".to_string(), "https://logo/2.png".to_string()],
            ..RawToken::new(chain, address)
        }
    }

    #[test]
    fn normalizes_network_names_and_addresses() {
        let config = AggregatorConfig::default();
        let token = normalize(raw(ChainRef::Name("ethereum".to_string()), &DAI.to_lowercase()), &config).unwrap();

        assert_eq!(token.chain_id, 1);
        assert_eq!(token.address.to_checksum(None), DAI);
        assert_eq!(token.name, "Dai Stablecoin");
        assert_eq!(token.decimals, 18);
        assert_eq!(token.logo_uri, "https://logo/1.png");
    }

    #[test]
    fn unknown_network_maps_to_unsupported_chain() {
        let config = AggregatorConfig::default();
        let token = normalize(raw(ChainRef::Name("solana".to_string()), DAI), &config).unwrap();
        assert_eq!(token.chain_id, UNSUPPORTED_CHAIN_ID);
    }

    #[test]
    fn numeric_chain_names_are_ids() {
        let config = AggregatorConfig::default();
        assert_eq!(resolve_chain_id(&ChainRef::Name("8453".to_string()), &config), 8453);
        assert_eq!(resolve_chain_id(&ChainRef::Name("Arbitrum".to_string()), &config), 42161);
    }

    #[test]
    fn missing_fields_become_empty() {
        let config = AggregatorConfig::default();
        let token = normalize(RawToken::new(ChainRef::Id(10), DAI), &config).unwrap();

        assert_eq!(token.chain_id, 10);
        assert!(token.name.is_empty());
        assert!(token.logo_uri.is_empty());
        assert_eq!(token.decimals, 0);
        assert!(token.metadata.is_none());
    }

    #[test]
    fn empty_metadata_is_dropped() {
        let config = AggregatorConfig::default();
        let mut record = raw(ChainRef::Id(1), DAI);
        record.metadata = Some(TokenExtensions::default());

        assert!(normalize(record, &config).unwrap().metadata.is_none());
    }

    #[test]
    fn malformed_addresses_are_skipped_not_fatal() {
        let config = AggregatorConfig::default();
        let batch = vec![
            raw(ChainRef::Id(1), DAI),
            raw(ChainRef::Id(1), "0xnothex"),
            raw(ChainRef::Id(1), ""),
        ];

        let (tokens, skipped) = normalize_all(batch, &config);
        assert_eq!(tokens.len(), 1);
        assert_eq!(skipped, 2);
    }
}
