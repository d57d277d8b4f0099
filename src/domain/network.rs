use alloy::primitives::{address, Address};

/// Chain id used for tokens whose network could not be resolved.
pub const UNSUPPORTED_CHAIN_ID: u64 = 0;

/// Placeholder address used by wallets for the gas token of a chain.
pub const NATIVE_ADDRESS: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u64)]
pub enum EvmNetwork {
    Eth = 1,
    Optimism = 10,
    Bsc = 56,
    Gnosis = 100,
    Polygon = 137,
    Fantom = 250,
    ZkSync = 324,
    PolygonZkEvm = 1101,
    Base = 8453,
    Arbitrum = 42161,
    Avalanche = 43114,
}

/// Gas token of a network, seeded into aggregated lists regardless of quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeToken {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

impl EvmNetwork {
    pub const ALL: [EvmNetwork; 11] = [
        EvmNetwork::Eth,
        EvmNetwork::Optimism,
        EvmNetwork::Bsc,
        EvmNetwork::Gnosis,
        EvmNetwork::Polygon,
        EvmNetwork::Fantom,
        EvmNetwork::ZkSync,
        EvmNetwork::PolygonZkEvm,
        EvmNetwork::Base,
        EvmNetwork::Arbitrum,
        EvmNetwork::Avalanche,
    ];

    pub fn chain_id(self) -> u64 {
        self as u64
    }

    pub fn native_token_address(self) -> Address {
        NATIVE_ADDRESS
    }

    /// Name providers use for this network in their APIs.
    pub fn api_name(self) -> &'static str {
        match self {
            EvmNetwork::Eth => "ethereum",
            EvmNetwork::Optimism => "optimism",
            EvmNetwork::Bsc => "bsc",
            EvmNetwork::Gnosis => "gnosis",
            EvmNetwork::Polygon => "polygon",
            EvmNetwork::Fantom => "fantom",
            EvmNetwork::ZkSync => "zksync",
            EvmNetwork::PolygonZkEvm => "polygon-zkevm",
            EvmNetwork::Base => "base",
            EvmNetwork::Arbitrum => "arbitrum",
            EvmNetwork::Avalanche => "avalanche",
        }
    }

    pub fn native_token(self) -> Option<NativeToken> {
        let ether = NativeToken {
            name: "Ether",
            symbol: "ETH",
            decimals: 18,
        };

        match self {
            EvmNetwork::Eth
            | EvmNetwork::Optimism
            | EvmNetwork::ZkSync
            | EvmNetwork::PolygonZkEvm
            | EvmNetwork::Base
            | EvmNetwork::Arbitrum => Some(ether),
            EvmNetwork::Bsc => Some(NativeToken {
                name: "BNB",
                symbol: "BNB",
                decimals: 18,
            }),
            EvmNetwork::Gnosis => Some(NativeToken {
                name: "xDai",
                symbol: "xDAI",
                decimals: 18,
            }),
            EvmNetwork::Polygon => Some(NativeToken {
                name: "Matic",
                symbol: "MATIC",
                decimals: 18,
            }),
            EvmNetwork::Fantom => Some(NativeToken {
                name: "Fantom",
                symbol: "FTM",
                decimals: 18,
            }),
            EvmNetwork::Avalanche => None,
        }
    }
}
