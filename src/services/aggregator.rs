use crate::config::constants::QUORUM_DIVISOR;
use crate::config::AggregatorConfig;
use crate::domain::{AggregatedToken, CanonicalToken, ProviderInfo, TokenKey, AUTHORITATIVE_WEIGHT};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// Normalized output of one provider for one run.
#[derive(Debug, Clone)]
pub struct ProviderList {
    pub info: ProviderInfo,
    pub tokens: Vec<CanonicalToken>,
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Quorum-filtered tokens plus native seeds, ordered by key.
    pub tokens: Vec<AggregatedToken>,
    /// Providers that reported at least one token per supported chain.
    pub contributors: BTreeMap<u64, BTreeSet<String>>,
    pub below_quorum: usize,
}

struct Candidate<'a> {
    token: AggregatedToken,
    providers: HashSet<&'a str>,
}

/// Minimum number of distinct providers a token needs on a chain with
/// `contributors` providers.
pub fn quorum(contributors: usize) -> usize {
    contributors.div_ceil(QUORUM_DIVISOR)
}

/// Collapses repeated keys within a single provider's output.
pub fn dedupe(tokens: &[CanonicalToken]) -> Vec<AggregatedToken> {
    let mut unique: BTreeMap<TokenKey, AggregatedToken> = BTreeMap::new();

    for token in tokens {
        match unique.entry(token.key()) {
            Entry::Vacant(entry) => {
                entry.insert(AggregatedToken::new(token.clone(), 1));
            }
            Entry::Occupied(mut entry) => entry.get_mut().token.merge_missing(token),
        }
    }

    unique.into_values().collect()
}

/// Merges provider lists into one quorum-filtered token set.
///
/// Membership and occurrence counts do not depend on the order of `lists`.
/// Field values do: on conflict the first non-empty value seen wins.
pub fn aggregate(lists: &[ProviderList], config: &AggregatorConfig) -> Aggregation {
    let mut contributors: BTreeMap<u64, BTreeSet<String>> = BTreeMap::new();
    let mut candidates: BTreeMap<TokenKey, Candidate> = BTreeMap::new();

    for list in lists.iter().filter(|list| list.info.feeds_aggregate()) {
        let provider = list.info.name.as_str();
        let authoritative = config.is_authoritative(provider);

        for token in &list.tokens {
            if !config.is_chain_supported(token.chain_id) {
                continue;
            }

            contributors
                .entry(token.chain_id)
                .or_default()
                .insert(provider.to_string());

            let key = token.key();
            let forced = authoritative || config.has_weight_override(&key);

            match candidates.entry(key) {
                Entry::Vacant(entry) => {
                    let weight = if forced { AUTHORITATIVE_WEIGHT } else { 1 };
                    entry.insert(Candidate {
                        token: AggregatedToken::new(token.clone(), weight),
                        providers: HashSet::from([provider]),
                    });
                }
                Entry::Occupied(mut entry) => {
                    let candidate = entry.get_mut();
                    if candidate.providers.insert(provider) {
                        candidate.token.absorb(token);
                    } else {
                        candidate.token.token.merge_missing(token);
                    }

                    if forced {
                        candidate.token.occurrence = AUTHORITATIVE_WEIGHT;
                    }
                }
            }
        }
    }

    let total = candidates.len();
    let mut selected: BTreeMap<TokenKey, AggregatedToken> = candidates
        .into_iter()
        .filter(|(key, candidate)| {
            contributors
                .get(&key.chain_id)
                .is_some_and(|providers| candidate.token.occurrence as usize >= quorum(providers.len()))
        })
        .map(|(key, candidate)| (key, candidate.token))
        .collect();
    let below_quorum = total - selected.len();

    for native in &config.native_tokens {
        if config.is_chain_supported(native.chain_id) {
            selected.insert(native.key(), AggregatedToken::new(native.clone(), AUTHORITATIVE_WEIGHT));
        }
    }

    debug!(
        candidates = total,
        below_quorum,
        selected = selected.len(),
        chains = contributors.len(),
        "aggregation complete"
    );

    Aggregation {
        tokens: selected.into_values().collect(),
        contributors,
        below_quorum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::fixtures::token;
    use crate::domain::{parse_address, ProviderKind};

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    fn config() -> AggregatorConfig {
        AggregatorConfig {
            native_tokens: Vec::new(),
            weight_overrides: Vec::new(),
            ..AggregatorConfig::default()
        }
    }

    fn list(name: &str, tokens: Vec<CanonicalToken>) -> ProviderList {
        ProviderList {
            info: ProviderInfo::new(name, ProviderKind::Token),
            tokens,
        }
    }

    fn dai() -> CanonicalToken {
        token(1, DAI, "Dai", "DAI", 18)
    }

    fn filler(chain_id: u64) -> CanonicalToken {
        token(chain_id, WETH, "Wrapped Ether", "WETH", 18)
    }

    fn keys(aggregation: &Aggregation) -> Vec<TokenKey> {
        aggregation.tokens.iter().map(AggregatedToken::key).collect()
    }

    #[test]
    fn dedupe_merges_repeats_of_one_provider() {
        let unique = dedupe(&[token(1, DAI, "", "DAI", 18), token(1, &DAI.to_lowercase(), "Dai", "XXX", 0), filler(1)]);

        assert_eq!(unique.len(), 2);
        let dai = unique.iter().find(|t| t.key() == dai().key()).unwrap();
        assert_eq!(dai.token.name, "Dai");
        assert_eq!(dai.token.symbol, "DAI");
        assert_eq!(dai.occurrence, 1);
    }

    #[test]
    fn quorum_is_half_rounded_up() {
        assert_eq!(quorum(1), 1);
        assert_eq!(quorum(2), 1);
        assert_eq!(quorum(3), 2);
        assert_eq!(quorum(4), 2);
        assert_eq!(quorum(5), 3);
    }

    #[test]
    fn single_sighting_passes_with_two_providers() {
        let lists = vec![list("a", vec![dai()]), list("b", vec![filler(1)])];
        let result = aggregate(&lists, &config());

        assert!(keys(&result).contains(&dai().key()));
    }

    #[test]
    fn single_sighting_fails_with_three_providers() {
        let lists = vec![
            list("a", vec![dai(), filler(1)]),
            list("b", vec![filler(1)]),
            list("c", vec![filler(1)]),
        ];
        let result = aggregate(&lists, &config());

        assert_eq!(keys(&result), vec![filler(1).key()]);
        assert_eq!(result.below_quorum, 1);
    }

    #[test]
    fn authoritative_provider_bypasses_quorum() {
        let lists = vec![
            list("yearn", vec![dai()]),
            list("b", vec![filler(1)]),
            list("c", vec![filler(1)]),
            list("d", vec![filler(1)]),
        ];
        let result = aggregate(&lists, &config());

        let dai = result.tokens.iter().find(|t| t.key() == dai().key()).unwrap();
        assert!(dai.is_authoritative());
    }

    #[test]
    fn authoritative_weight_does_not_depend_on_order() {
        let forward = vec![list("a", vec![dai()]), list("yearn", vec![dai()]), list("c", vec![filler(1)])];
        let mut backward = forward.clone();
        backward.reverse();

        for lists in [forward, backward] {
            let result = aggregate(&lists, &config());
            let dai = result.tokens.iter().find(|t| t.key() == dai().key()).unwrap();
            assert!(dai.is_authoritative());
        }
    }

    #[test]
    fn weight_override_forces_inclusion() {
        let mut config = config();
        config.weight_overrides = vec![crate::config::WeightOverride {
            chain_id: Some(1),
            address: parse_address(DAI).unwrap(),
        }];

        let lists = vec![
            list("a", vec![dai()]),
            list("b", vec![filler(1)]),
            list("c", vec![filler(1)]),
        ];
        assert!(keys(&aggregate(&lists, &config)).contains(&dai().key()));
    }

    #[test]
    fn merges_fields_first_non_empty_wins() {
        let a = token(1, DAI, "", "FOO", 18);
        let b = token(1, DAI, "Foo Token", "BAR", 0);
        let result = aggregate(&[list("a", vec![a]), list("b", vec![b])], &config());

        let merged = &result.tokens[0];
        assert_eq!(merged.token.name, "Foo Token");
        assert_eq!(merged.token.symbol, "FOO");
        assert_eq!(merged.token.decimals, 18);
        assert_eq!(merged.occurrence, 2);
    }

    #[test]
    fn duplicates_within_one_provider_count_once() {
        let lists = vec![
            list("a", vec![dai(), dai(), dai()]),
            list("b", vec![filler(1)]),
            list("c", vec![filler(1)]),
        ];
        let result = aggregate(&lists, &config());

        assert!(!keys(&result).contains(&dai().key()));
    }

    #[test]
    fn quorum_is_decided_per_chain() {
        let lists = vec![
            list("a", vec![token(1, USDC, "USD Coin", "USDC", 6), token(10, USDC, "USD Coin", "USDC", 6)]),
            list("b", vec![token(1, USDC, "USD Coin", "USDC", 6), filler(10)]),
            list("c", vec![token(1, USDC, "USD Coin", "USDC", 6), filler(10)]),
        ];
        let result = aggregate(&lists, &config());
        let keys = keys(&result);

        assert!(keys.contains(&TokenKey::new(1, parse_address(USDC).unwrap())));
        assert!(!keys.contains(&TokenKey::new(10, parse_address(USDC).unwrap())));
        assert_eq!(result.contributors[&10].len(), 3);
    }

    #[test]
    fn skips_unsupported_chains_and_non_token_lists() {
        let mut pools = list("pools", vec![filler(1)]);
        pools.info.kind = ProviderKind::Pool;
        let mut meta = list("tokenlistooor", vec![filler(1)]);
        meta.info.kind = ProviderKind::Aggregate;

        let lists = vec![list("a", vec![dai(), filler(0), filler(5)]), pools, meta];
        let result = aggregate(&lists, &config());

        assert_eq!(keys(&result), vec![dai().key()]);
        assert_eq!(result.contributors.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(result.contributors[&1].len(), 1);
    }

    #[test]
    fn native_seeds_are_always_included() {
        let config = AggregatorConfig {
            weight_overrides: Vec::new(),
            ..AggregatorConfig::default()
        };
        let result = aggregate(&[], &config);

        assert_eq!(result.tokens.len(), config.native_tokens.len());
        assert!(result.tokens.iter().all(AggregatedToken::is_authoritative));
    }

    #[test]
    fn membership_is_independent_of_provider_order() {
        let lists = vec![
            list("a", vec![dai(), filler(1)]),
            list("b", vec![token(1, USDC, "USD Coin", "USDC", 6)]),
            list("c", vec![dai(), token(1, USDC, "", "USDC", 6)]),
        ];
        let mut reversed = lists.clone();
        reversed.reverse();

        let forward = aggregate(&lists, &config());
        let backward = aggregate(&reversed, &config());

        assert_eq!(keys(&forward), keys(&backward));
        let occurrences = |a: &Aggregation| a.tokens.iter().map(|t| t.occurrence).collect::<Vec<_>>();
        assert_eq!(occurrences(&forward), occurrences(&backward));
    }

    #[test]
    fn empty_provider_does_not_change_other_chains() {
        let base = vec![
            list("a", vec![dai(), filler(10)]),
            list("b", vec![filler(1), filler(10)]),
        ];
        let mut with_empty = base.clone();
        with_empty.push(list("broken", Vec::new()));

        assert_eq!(keys(&aggregate(&base, &config())), keys(&aggregate(&with_empty, &config())));
    }
}
