//! Canonical output types: tokens, accounts, actions and the classified
//! transaction record.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Tokens ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    #[serde(rename = "NATIVE")]
    Native,
    #[serde(rename = "ERC-20")]
    Erc20,
    #[serde(rename = "ERC-721")]
    Erc721,
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenStandard::Native => "NATIVE",
            TokenStandard::Erc20 => "ERC-20",
            TokenStandard::Erc721 => "ERC-721",
        };
        f.write_str(s)
    }
}

/// Fungible asset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "type")]
    pub standard: TokenStandard,
    /// Contract address (checksummed); `None` for the native asset
    pub address: Option<String>,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub chain_id: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl Token {
    pub const UNKNOWN_SYMBOL: &'static str = "UNKNOWN";

    /// Placeholder for an ERC-20 contract the registry does not know.
    /// Carries no icon.
    pub fn unknown(address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            standard: TokenStandard::Erc20,
            address: Some(address.into()),
            symbol: Self::UNKNOWN_SYMBOL.to_string(),
            name: "unknown token".to_string(),
            decimals: 18,
            chain_id,
            icon_url: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.symbol == Self::UNKNOWN_SYMBOL
    }
}

/// An ERC-721 token. Always synthesised; there is no registry for collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonFungibleToken {
    #[serde(flatten)]
    pub token: Token,
    /// Decimal token id
    pub token_id: String,
}

impl NonFungibleToken {
    /// Name is `"<collection> #<id>"`, with an empty collection when unknown.
    pub fn synthesize(
        address: impl Into<String>,
        token_id: impl Into<String>,
        chain_id: u64,
        collection: Option<&str>,
    ) -> Self {
        let token_id = token_id.into();
        Self {
            token: Token {
                standard: TokenStandard::Erc721,
                address: Some(address.into()),
                symbol: String::new(),
                name: format!("{} #{}", collection.unwrap_or(""), token_id),
                decimals: 0,
                chain_id,
                icon_url: None,
            },
            token_id,
        }
    }
}

/// The asset moved by a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Asset {
    NonFungible(NonFungibleToken),
    Fungible(Token),
}

impl Asset {
    pub fn token(&self) -> &Token {
        match self {
            Asset::Fungible(token) => token,
            Asset::NonFungible(nft) => &nft.token,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.token().symbol
    }
}

// ─── Accounts & actions ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountRole {
    Unknown,
    External,
    Contract,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub role: AccountRole,
    /// Checksummed address; `None` when it could not be normalised
    pub address: Option<String>,
}

impl Account {
    pub fn new(role: AccountRole, address: Option<String>) -> Self {
        Self { role, address }
    }

    pub fn unknown(address: Option<String>) -> Self {
        Self::new(AccountRole::Unknown, address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAction {
    pub token: Asset,
    /// Base-unit decimal string, never negative
    pub amount: String,
    pub from: Account,
    pub to: Account,
    pub direction: Direction,
}

/// A swap performed by the wallet through some application contract.
///
/// Which asset went in and which came out is not resolved here; the legs
/// appear as separate transfer actions next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAction {
    pub trader: Account,
    pub application: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Action {
    Transfer(TransferAction),
    Swap(SwapAction),
}

impl Action {
    pub fn as_transfer(&self) -> Option<&TransferAction> {
        match self {
            Action::Transfer(t) => Some(t),
            Action::Swap(_) => None,
        }
    }

    pub fn as_swap(&self) -> Option<&SwapAction> {
        match self {
            Action::Swap(s) => Some(s),
            Action::Transfer(_) => None,
        }
    }
}

// ─── Transaction ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    SendToken,
    ReceiveToken,
    SendNft,
    ReceiveNft,
    Swap,
    Execution,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::SendToken => "SEND_TOKEN",
            TransactionType::ReceiveToken => "RECEIVE_TOKEN",
            TransactionType::SendNft => "SEND_NFT",
            TransactionType::ReceiveNft => "RECEIVE_NFT",
            TransactionType::Swap => "SWAP",
            TransactionType::Execution => "EXECUTION",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// The classified, human-readable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub chain_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    /// Block timestamp as a string, empty when unknown
    pub executed: String,
    /// gas used × gas price in base units
    pub fee: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub value: String,
    pub direction: Direction,
    pub transaction_actions: Vec<Action>,
    pub wallet_address: Option<String>,
}

impl Transaction {
    pub fn transfers(&self) -> impl Iterator<Item = &TransferAction> {
        self.transaction_actions.iter().filter_map(Action::as_transfer)
    }
}
