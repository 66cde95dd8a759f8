//! Known contract interfaces and the order they are tried in.
//!
//! Each interface is a parsed JSON ABI whose events are indexed by selector.
//! The registry is ordered: a log is matched against ERC-20 first, then
//! ERC-721, then the Uniswap V2 pair. Adding an interface is a configuration
//! change, not a code change.

use alloy_json_abi::{Event, JsonAbi};
use alloy_primitives::B256;
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;

use crate::fingerprint;

const ERC20_ABI: &str = include_str!("../abi/erc20.json");
const ERC721_ABI: &str = include_str!("../abi/erc721.json");
const UNISWAP_V2_PAIR_ABI: &str = include_str!("../abi/uniswap_v2_pair.json");

#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("Invalid ABI JSON for interface '{name}': {source}")]
    InvalidAbi {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Interface '{0}' declares no events")]
    NoEvents(String),
}

/// A named contract interface: its non-anonymous events keyed by selector.
#[derive(Debug, Clone)]
pub struct ContractInterface {
    name: String,
    /// Several events may share a selector (ERC-20 vs ERC-721 `Approval`)
    events: HashMap<B256, Vec<Event>>,
}

impl ContractInterface {
    /// Parse a JSON ABI (the standard array form emitted by solc).
    pub fn from_abi_json(name: impl Into<String>, json: &str) -> Result<Self, InterfaceError> {
        let name = name.into();
        let abi: JsonAbi = serde_json::from_str(json).map_err(|source| {
            InterfaceError::InvalidAbi {
                name: name.clone(),
                source,
            }
        })?;
        Self::from_abi(name, &abi)
    }

    pub fn from_abi(name: impl Into<String>, abi: &JsonAbi) -> Result<Self, InterfaceError> {
        let name = name.into();
        let mut events: HashMap<B256, Vec<Event>> = HashMap::new();
        for event in abi.events() {
            // anonymous events have no selector topic to match on
            if event.anonymous {
                continue;
            }
            let selector = fingerprint::keccak256_signature(&event.signature());
            events.entry(selector).or_default().push(event.clone());
        }
        if events.is_empty() {
            return Err(InterfaceError::NoEvents(name));
        }
        Ok(Self { name, events })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate events for a log whose topic 0 is `selector`.
    pub fn events_for(&self, selector: &B256) -> &[Event] {
        self.events.get(selector).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All events, sorted by signature for stable listings.
    pub fn events(&self) -> Vec<&Event> {
        let mut all: Vec<&Event> = self.events.values().flatten().collect();
        all.sort_by_key(|e| (e.signature(), e.inputs.iter().filter(|p| p.indexed).count()));
        all
    }
}

/// Ordered set of interfaces. Earlier interfaces take priority.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    interfaces: Vec<ContractInterface>,
}

impl InterfaceRegistry {
    /// An empty registry. Nothing decodes against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// ERC-20, ERC-721 and Uniswap V2 pair, in that order.
    pub fn bundled() -> Self {
        let mut registry = Self::new();
        for (name, json) in [
            ("ERC20", ERC20_ABI),
            ("ERC721", ERC721_ABI),
            ("UniswapV2Pair", UNISWAP_V2_PAIR_ABI),
        ] {
            match ContractInterface::from_abi_json(name, json) {
                Ok(interface) => registry.push(interface),
                Err(e) => error!(interface = name, error = %e, "bundled ABI failed to load"),
            }
        }
        registry
    }

    /// Append an interface at the lowest priority.
    pub fn push(&mut self, interface: ContractInterface) {
        self.interfaces.push(interface);
    }

    pub fn with(mut self, interface: ContractInterface) -> Self {
        self.push(interface);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractInterface> {
        self.interfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_order() {
        let reg = InterfaceRegistry::bundled();
        let names: Vec<_> = reg.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["ERC20", "ERC721", "UniswapV2Pair"]);
    }

    #[test]
    fn selectors_match_alloy() {
        let reg = InterfaceRegistry::bundled();
        for interface in reg.iter() {
            for event in interface.events() {
                let ours = fingerprint::keccak256_signature(&event.signature());
                assert_eq!(ours, event.selector(), "{}", event.signature());
                assert!(!interface.events_for(&ours).is_empty());
            }
        }
    }

    #[test]
    fn transfer_selector_shared_by_erc20_and_erc721() {
        let reg = InterfaceRegistry::bundled();
        let transfer = fingerprint::keccak256_signature("Transfer(address,address,uint256)");
        let hits: Vec<_> = reg
            .iter()
            .filter(|i| !i.events_for(&transfer).is_empty())
            .map(|i| i.name())
            .collect();
        assert_eq!(hits, ["ERC20", "ERC721"]);
    }

    #[test]
    fn invalid_abi_is_an_error() {
        let err = ContractInterface::from_abi_json("Broken", "{ not json").unwrap_err();
        assert!(matches!(err, InterfaceError::InvalidAbi { .. }));
    }

    #[test]
    fn abi_without_events_is_rejected() {
        let json = r#"[{"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#;
        let err = ContractInterface::from_abi_json("Supply", json).unwrap_err();
        assert!(matches!(err, InterfaceError::NoEvents(_)));
    }

    #[test]
    fn custom_interface_appended_last() {
        let json = r#"[{"type":"event","name":"Deposit","anonymous":false,"inputs":[
            {"name":"dst","type":"address","indexed":true},
            {"name":"wad","type":"uint256","indexed":false}]}]"#;
        let weth = ContractInterface::from_abi_json("WETH9", json).unwrap();
        let reg = InterfaceRegistry::bundled().with(weth);
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.iter().last().unwrap().name(), "WETH9");
    }
}
