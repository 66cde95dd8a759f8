//! Well-known EVM chains and their native assets.

use crate::types::{Token, TokenStandard};

/// Native asset metadata for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeAsset {
    pub chain_id: u64,
    pub slug: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

/// Chains whose native asset is known without a registry lookup.
pub const NATIVE_ASSETS: &[NativeAsset] = &[
    NativeAsset { chain_id: 1, slug: "ethereum", symbol: "ETH", name: "Ether", decimals: 18 },
    NativeAsset { chain_id: 10, slug: "optimism", symbol: "ETH", name: "Ether", decimals: 18 },
    NativeAsset { chain_id: 56, slug: "bsc", symbol: "BNB", name: "BNB", decimals: 18 },
    NativeAsset { chain_id: 137, slug: "polygon", symbol: "POL", name: "Polygon Ecosystem Token", decimals: 18 },
    NativeAsset { chain_id: 8453, slug: "base", symbol: "ETH", name: "Ether", decimals: 18 },
    NativeAsset { chain_id: 42161, slug: "arbitrum", symbol: "ETH", name: "Ether", decimals: 18 },
    NativeAsset { chain_id: 43114, slug: "avalanche", symbol: "AVAX", name: "Avalanche", decimals: 18 },
];

/// Look up the native asset of a chain. Unknown chains have none.
pub fn native_asset(chain_id: u64) -> Option<&'static NativeAsset> {
    NATIVE_ASSETS.iter().find(|asset| asset.chain_id == chain_id)
}

/// Symbol of the chain's native asset; unknown chains default to `ETH`.
pub fn native_symbol(chain_id: u64) -> &'static str {
    native_asset(chain_id).map(|asset| asset.symbol).unwrap_or("ETH")
}

/// Synthesise a native token descriptor when the registry has no entry for it.
pub fn native_token(chain_id: u64) -> Token {
    let (symbol, name, decimals) = match native_asset(chain_id) {
        Some(asset) => (asset.symbol, asset.name, asset.decimals),
        None => ("ETH", "Ether", 18),
    };
    Token {
        standard: TokenStandard::Native,
        address: None,
        symbol: symbol.to_string(),
        name: name.to_string(),
        decimals,
        chain_id,
        icon_url: None,
    }
}
