//! Blockchain address wrappers
//!
//! Providers return addresses as raw lowercase hex; the checksummed form
//! is derived on demand rather than stored.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MarketError, MarketResult};

/// A raw hex address exactly as a provider returned it
///
/// Not validated on construction; derivation of the checksummed form is
/// where a malformed address surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexAddress(String);

impl HexAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        HexAddress(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the EIP-55 checksummed form of this address
    pub fn checksummed(&self) -> MarketResult<ChecksumAddress> {
        let address = Address::from_str(&self.0)
            .map_err(|e| MarketError::address_format(format!("`{}`: {e}", self.0)))?;
        Ok(ChecksumAddress(address.to_checksum(None)))
    }
}

impl fmt::Display for HexAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An EIP-55 checksummed address, only constructible via derivation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChecksumAddress(String);

impl ChecksumAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_lowercase_address() {
        let raw = HexAddress::new("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        let checksummed = raw.checksummed().unwrap();
        assert_eq!(
            checksummed.as_str(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn checksumming_is_idempotent_on_valid_input() {
        let raw = HexAddress::new("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
        assert_eq!(
            raw.checksummed().unwrap().as_str(),
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
    }

    #[test]
    fn malformed_address_fails() {
        assert!(matches!(
            HexAddress::new("not-an-address").checksummed(),
            Err(MarketError::AddressFormat(_))
        ));
        assert!(matches!(
            HexAddress::new("0x1234").checksummed(),
            Err(MarketError::AddressFormat(_))
        ));
    }
}
