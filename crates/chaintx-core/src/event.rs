//! Decoded event types.

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::NormalizedAddress;
use crate::raw::RawLog;

pub const TRANSFER_SIGNATURE: &str = "Transfer(address,address,uint256)";
pub const SWAP_SIGNATURE: &str = "Swap(address,uint256,uint256,uint256,uint256,address)";

/// A decoded, normalised event argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ArgValue {
    Address(Address),
    Uint(U256),
    Int(I256),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    List(Vec<ArgValue>),
}

impl ArgValue {
    pub fn as_address(&self) -> Option<NormalizedAddress> {
        match self {
            ArgValue::Address(a) => Some(NormalizedAddress::new(*a)),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            ArgValue::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Address(a) => write!(f, "{}", a.to_checksum(None)),
            ArgValue::Uint(v) => write!(f, "{v}"),
            ArgValue::Int(v) => write!(f, "{v}"),
            ArgValue::Bool(v) => write!(f, "{v}"),
            ArgValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            ArgValue::Str(s) => write!(f, "{s}"),
            ArgValue::List(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventArg {
    pub name: String,
    pub indexed: bool,
    pub value: ArgValue,
}

/// An event matched against a known interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// Event name, e.g. `"Transfer"`
    pub name: String,
    /// Canonical signature, e.g. `"Transfer(address,address,uint256)"`
    pub signature: String,
    /// Name of the interface that decoded the log, e.g. `"ERC20"`
    pub interface: String,
    /// Arguments in declaration order
    pub args: Vec<EventArg>,
}

impl DecodedEvent {
    /// Argument by name.
    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    /// Argument by declaration position.
    pub fn arg_at(&self, index: usize) -> Option<&ArgValue> {
        self.args.get(index).map(|a| &a.value)
    }

    pub fn address_arg(&self, name: &str) -> Option<NormalizedAddress> {
        self.arg(name)?.as_address()
    }

    pub fn uint_arg(&self, name: &str) -> Option<U256> {
        self.arg(name)?.as_uint()
    }
}

/// What a decoded log is, for classification purposes.
///
/// ERC-20 and ERC-721 `Transfer` share one signature; they differ only in how
/// many topics the log carries (the ERC-721 token id is indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FungibleTransfer,
    NonFungibleTransfer,
    Swap,
    Other,
}

impl EventKind {
    pub fn classify(event: Option<&DecodedEvent>, topic_count: usize) -> Self {
        let Some(event) = event else {
            return EventKind::Other;
        };
        match (event.signature.as_str(), topic_count) {
            (TRANSFER_SIGNATURE, 3) => EventKind::FungibleTransfer,
            (TRANSFER_SIGNATURE, 4) => EventKind::NonFungibleTransfer,
            (SWAP_SIGNATURE, 3) => EventKind::Swap,
            _ => EventKind::Other,
        }
    }
}

/// A raw log plus the result of matching it against the known interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLog {
    pub raw: RawLog,
    pub event: Option<DecodedEvent>,
    pub kind: EventKind,
}

impl DecodedLog {
    pub fn new(raw: RawLog, event: Option<DecodedEvent>) -> Self {
        let kind = EventKind::classify(event.as_ref(), raw.topics.len());
        Self { raw, event, kind }
    }

    pub fn is_decoded(&self) -> bool {
        self.event.is_some()
    }

    pub fn contract_address(&self) -> Option<NormalizedAddress> {
        crate::address::normalize_address(&self.raw.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_event(third: &str) -> DecodedEvent {
        DecodedEvent {
            name: "Transfer".into(),
            signature: TRANSFER_SIGNATURE.into(),
            interface: "ERC20".into(),
            args: vec![
                EventArg { name: "from".into(), indexed: true, value: ArgValue::Address(Address::ZERO) },
                EventArg { name: "to".into(), indexed: true, value: ArgValue::Address(Address::ZERO) },
                EventArg { name: third.into(), indexed: false, value: ArgValue::Uint(U256::from(5u64)) },
            ],
        }
    }

    #[test]
    fn transfer_topic_count_discriminates() {
        let event = transfer_event("value");
        assert_eq!(EventKind::classify(Some(&event), 3), EventKind::FungibleTransfer);
        assert_eq!(EventKind::classify(Some(&event), 4), EventKind::NonFungibleTransfer);
        assert_eq!(EventKind::classify(Some(&event), 2), EventKind::Other);
        assert_eq!(EventKind::classify(None, 3), EventKind::Other);
    }

    #[test]
    fn named_and_positional_access() {
        let event = transfer_event("value");
        assert_eq!(event.uint_arg("value"), Some(U256::from(5u64)));
        assert_eq!(event.arg_at(2), event.arg("value"));
        assert!(event.uint_arg("from").is_none());
        assert!(event.address_arg("missing").is_none());
    }
}
