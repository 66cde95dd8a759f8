//! chaintx-core: foundation types for the ChainTx transaction decoder.
//!
//! This crate defines:
//! - [`RawTransaction`] / [`RawLog`]: the fully materialised input
//! - [`DecodedLog`] / [`EventKind`]: a log after interface matching
//! - [`Transaction`] / [`Action`]: the canonical, human-readable output
//! - [`NormalizedAddress`]: checksum-normalised address comparisons
//! - [`TokenRegistry`]: the pluggable token metadata lookup

pub mod address;
pub mod chain;
pub mod error;
pub mod event;
pub mod raw;
pub mod registry;
pub mod types;

pub use address::{normalize_address, same_address, NormalizedAddress};
pub use error::{RegistryError, RuleError};
pub use event::{ArgValue, DecodedEvent, DecodedLog, EventArg, EventKind};
pub use raw::{RawLog, RawReceipt, RawTransaction, TransactionContext};
pub use registry::{StaticTokenRegistry, TokenRegistry};
pub use types::{
    Account, AccountRole, Action, Asset, Direction, NonFungibleToken, SwapAction, Token,
    TokenStandard, Transaction, TransactionStatus, TransactionType, TransferAction,
};
