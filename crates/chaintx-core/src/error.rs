//! Error types for the ChainTx decode pipeline.
//!
//! Expected non-matches (an interface not decoding a log, a mapper's
//! preconditions failing, a rule declining) are *not* errors and never show
//! up here.

use thiserror::Error;

/// Errors from building or loading a token registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid token list JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid token address '{address}' for {symbol}")]
    InvalidAddress { symbol: String, address: String },
}

/// An internal fault raised while a classification rule was running.
///
/// The rule engine treats every `RuleError` exactly like a decline.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Rule '{rule}' panicked: {message}")]
    Panicked { rule: String, message: String },

    #[error("{0}")]
    Other(String),
}
