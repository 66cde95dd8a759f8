//! # chaintx-evm
//!
//! Turns a raw EVM transaction into a classified [`Transaction`].
//!
//! ## Pipeline
//! 1. [`LogDecoder`] matches each receipt log against the known interfaces
//!    (ERC-20, ERC-721, Uniswap V2 pair), by topic-0 selector then full ABI
//!    decode. Logs nothing decodes are dropped.
//! 2. [`RuleEngine`] runs the classification rules in priority order; the
//!    first rule to apply builds the transaction through [`ActionMapper`].
//! 3. If every rule declines, [`build_fallback`] produces a generic
//!    `EXECUTION` record.
//!
//! ```no_run
//! use chaintx_core::{RawTransaction, TransactionContext};
//! use chaintx_evm::TransactionDecoder;
//!
//! # fn run(raw: RawTransaction) {
//! let decoder = TransactionDecoder::new();
//! let ctx = TransactionContext::new(1, "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
//! let tx = decoder.decode_transaction(&raw, &ctx);
//! println!("{} {:?}", tx.kind, tx.direction);
//! # }
//! ```
//!
//! [`Transaction`]: chaintx_core::Transaction

pub mod decoder;
pub mod fallback;
pub mod fingerprint;
pub mod interfaces;
pub mod mappers;
pub mod normalizer;
pub mod rules;
pub mod transaction;

#[cfg(test)]
mod testing;

pub use decoder::LogDecoder;
pub use fallback::build_fallback;
pub use interfaces::{ContractInterface, InterfaceError, InterfaceRegistry};
pub use mappers::ActionMapper;
pub use rules::{ClassificationRule, Declined, RuleEngine, RuleInput};
pub use transaction::{TransactionDecoder, TransactionDecoderBuilder};
