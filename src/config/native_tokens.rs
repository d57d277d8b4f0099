use crate::domain::{CanonicalToken, EvmNetwork};

/// Gas tokens seeded into every aggregated list, one per network that has one.
pub fn default_native_tokens() -> Vec<CanonicalToken> {
    EvmNetwork::ALL
        .into_iter()
        .filter_map(|network| {
            let native = network.native_token()?;
            Some(CanonicalToken {
                address: network.native_token_address(),
                name: native.name.to_string(),
                symbol: native.symbol.to_string(),
                logo_uri: String::new(),
                chain_id: network.chain_id(),
                decimals: native.decimals,
                metadata: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NATIVE_ADDRESS;

    #[test]
    fn seeds_ether_on_rollups() {
        let natives = default_native_tokens();
        for chain_id in [1, 10, 324, 8453, 42161] {
            let native = natives.iter().find(|t| t.chain_id == chain_id).unwrap();
            assert_eq!(native.symbol, "ETH");
            assert_eq!(native.address, NATIVE_ADDRESS);
        }
    }

    #[test]
    fn skips_networks_without_a_native_seed() {
        let natives = default_native_tokens();
        assert!(natives.iter().all(|t| t.chain_id != EvmNetwork::Avalanche.chain_id()));
    }
}
