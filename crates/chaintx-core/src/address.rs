//! EVM address normalisation.
//!
//! Every address comparison in ChainTx goes through [`normalize_address`].
//! Raw string comparison is never used: `0xabc…` and `0xAbC…` name the same
//! account and must compare equal.

use alloy_primitives::Address;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated 20-byte EVM address, rendered in EIP-55 checksum form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedAddress(Address);

impl NormalizedAddress {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn as_address(&self) -> &Address {
        &self.0
    }

    /// EIP-55 checksummed hex with `0x` prefix.
    pub fn checksummed(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl From<Address> for NormalizedAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed())
    }
}

impl Serialize for NormalizedAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.checksummed())
    }
}

/// Validate and checksum-normalise an address string.
///
/// Accepts `0x` followed by exactly 40 hex digits. All-lowercase and
/// all-uppercase inputs are accepted as-is; mixed-case input must carry a
/// valid EIP-55 checksum. Anything else yields `None`.
pub fn normalize_address(input: &str) -> Option<NormalizedAddress> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let address = Address::from_str(hex).ok()?;

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if checksummed[2..] != *hex {
            return None;
        }
    }

    Some(NormalizedAddress(address))
}

/// Compare two optional normalised addresses. `None` on either side never matches.
pub fn addresses_match(a: Option<&NormalizedAddress>, b: Option<&NormalizedAddress>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Compare two raw address strings through normalisation.
pub fn same_address(a: &str, b: &str) -> bool {
    addresses_match(normalize_address(a).as_ref(), normalize_address(b).as_ref())
}
