//! Token metadata registry: contract address or symbol to token.
//!
//! The registry is read-only once built and can be shared across threads
//! behind an `Arc<dyn TokenRegistry>`. A miss is a normal outcome, not an
//! error: callers fall back to placeholder tokens.

use crate::address::{normalize_address, NormalizedAddress};
use crate::error::RegistryError;
use crate::types::{Token, TokenStandard};

/// Trait for looking up fungible token metadata.
pub trait TokenRegistry: Send + Sync {
    /// Look up a token by contract address.
    fn find_by_address(&self, address: &NormalizedAddress) -> Option<Token>;

    /// Look up a token by symbol (case-insensitive).
    fn find_by_symbol(&self, symbol: &str) -> Option<Token>;

    /// Total number of registered tokens.
    fn len(&self) -> usize;

    /// Returns `true` if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Static registry ──────────────────────────────────────────────────────────

/// An immutable, in-memory token list.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenRegistry {
    /// (normalised address, token); `None` address for native assets
    tokens: Vec<(Option<NormalizedAddress>, Token)>,
}

impl StaticTokenRegistry {
    /// An empty registry. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a token list, validating and checksumming each address.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, RegistryError> {
        let mut entries = Vec::with_capacity(tokens.len());
        for mut token in tokens {
            let normalized = match token.address.as_deref() {
                None => None,
                Some(raw) => {
                    let addr = normalize_address(raw).ok_or_else(|| RegistryError::InvalidAddress {
                        symbol: token.symbol.clone(),
                        address: raw.to_string(),
                    })?;
                    token.address = Some(addr.checksummed());
                    Some(addr)
                }
            };
            entries.push((normalized, token));
        }
        Ok(Self { tokens: entries })
    }

    /// Load a token list from a JSON array of tokens.
    /// Expected format: `[{ "type": "ERC-20", "address": "0x...", "symbol": "...", ... }]`
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let tokens: Vec<Token> = serde_json::from_str(json)?;
        Self::from_tokens(tokens)
    }

    /// The bundled Ethereum mainnet token list.
    pub fn bundled() -> Self {
        let entries = bundled_tokens()
            .into_iter()
            .map(|mut token| {
                let addr = token
                    .address
                    .as_deref()
                    .and_then(|raw| normalize_address(&raw.to_lowercase()));
                token.address = addr.map(|a| a.checksummed());
                (addr, token)
            })
            .collect();
        Self { tokens: entries }
    }

    /// A new registry with `extra` tokens appended. Earlier entries win lookups.
    pub fn extended(mut self, extra: StaticTokenRegistry) -> Self {
        self.tokens.extend(extra.tokens);
        self
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().map(|(_, token)| token)
    }
}

impl TokenRegistry for StaticTokenRegistry {
    fn find_by_address(&self, address: &NormalizedAddress) -> Option<Token> {
        self.tokens
            .iter()
            .find(|(addr, _)| addr.as_ref() == Some(address))
            .map(|(_, token)| token.clone())
    }

    fn find_by_symbol(&self, symbol: &str) -> Option<Token> {
        let wanted = symbol.to_uppercase();
        self.tokens
            .iter()
            .find(|(_, token)| token.symbol.to_uppercase() == wanted)
            .map(|(_, token)| token.clone())
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }
}

fn bundled_tokens() -> Vec<Token> {
    fn erc20(address: &str, symbol: &str, name: &str, decimals: u8) -> Token {
        Token {
            standard: TokenStandard::Erc20,
            address: Some(address.to_string()),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            chain_id: 1,
            icon_url: None,
        }
    }

    vec![
        Token {
            standard: TokenStandard::Native,
            address: None,
            symbol: "ETH".to_string(),
            name: "Ether".to_string(),
            decimals: 18,
            chain_id: 1,
            icon_url: Some(
                "https://raw.githubusercontent.com/trustwallet/assets/master/blockchains/ethereum/assets/0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2/logo.png"
                    .to_string(),
            ),
        },
        erc20("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC", "USDC", 6),
        erc20("0xdAC17F958D2ee523a2206206994597C13D831ec7", "USDT", "USDT", 6),
        erc20("0xCA5001bC5134302Dbe0F798a2d0b95Ef3cF0803F", "MEF", "FRENBOT", 18),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_lookup_by_address_any_case() {
        let reg = StaticTokenRegistry::bundled();
        let usdc = normalize_address("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48").unwrap();
        let token = reg.find_by_address(&usdc).unwrap();
        assert_eq!(token.symbol, "USDC");
        assert_eq!(token.decimals, 6);
    }

    #[test]
    fn bundled_lookup_by_symbol() {
        let reg = StaticTokenRegistry::bundled();
        assert_eq!(reg.find_by_symbol("eth").unwrap().standard, TokenStandard::Native);
        assert!(reg.find_by_symbol("DOGE").is_none());
    }

    #[test]
    fn miss_is_none() {
        let reg = StaticTokenRegistry::new();
        let addr = normalize_address("0x1111111111111111111111111111111111111111").unwrap();
        assert!(reg.find_by_address(&addr).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn from_json_checksums_addresses() {
        let json = r#"[{
            "type": "ERC-20",
            "address": "0x6b175474e89094c44da98b954eedeac495271d0f",
            "symbol": "DAI",
            "name": "Dai Stablecoin",
            "decimals": 18,
            "chainId": 1
        }]"#;
        let reg = StaticTokenRegistry::from_json(json).unwrap();
        let dai = reg.find_by_symbol("DAI").unwrap();
        assert_eq!(
            dai.address.as_deref(),
            Some("0x6B175474E89094C44Da98b954EedeAC495271d0F")
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn from_json_rejects_bad_address() {
        let json = r#"[{
            "type": "ERC-20", "address": "0x1234", "symbol": "BAD",
            "name": "Bad", "decimals": 18, "chainId": 1
        }]"#;
        assert!(matches!(
            StaticTokenRegistry::from_json(json),
            Err(RegistryError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn extended_keeps_first_match() {
        let extra = StaticTokenRegistry::from_tokens(vec![Token {
            standard: TokenStandard::Erc20,
            address: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into()),
            symbol: "FAKE".into(),
            name: "Fake".into(),
            decimals: 2,
            chain_id: 1,
            icon_url: None,
        }])
        .unwrap();
        let reg = StaticTokenRegistry::bundled().extended(extra);
        let usdc = normalize_address("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap();
        assert_eq!(reg.find_by_address(&usdc).unwrap().symbol, "USDC");
        assert_eq!(reg.len(), 5);
    }
}
