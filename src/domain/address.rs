//! Address parsing and checksum serialization shared by every token type.

use crate::domain::errors::EvmError;
use alloy::primitives::Address;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Parses a hex account address in any letter case, with or without the `0x` prefix.
pub fn parse_address(value: &str) -> Result<Address, EvmError> {
    Address::from_str(value.trim()).map_err(|_| EvmError::InvalidAddress(value.to_string()))
}

/// EIP-55 form of an address.
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}

pub mod checksum {
    use super::*;

    pub fn serialize<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_checksum(address))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(serde::de::Error::custom)
    }
}
