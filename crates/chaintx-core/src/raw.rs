//! Raw, fully materialised transaction input.
//!
//! Produced by whatever fetched the transaction and its receipt from a node.
//! The JSON shape follows the usual camelCase RPC field names.

use alloy_primitives::{Bytes, U256, U512};
use serde::{Deserialize, Serialize};

/// An emitted event record, as found in a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event selector; topics[1..] are indexed params (0x-hex, 32 bytes)
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed params
    #[serde(default)]
    pub data: Bytes,
    /// Position of the log within the transaction
    #[serde(default)]
    pub log_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    /// Receipt status code. Carried for completeness; status is derived from block inclusion.
    #[serde(default)]
    pub status: Option<u64>,
    pub gas_used: U256,
    #[serde(default)]
    pub logs: Vec<RawLog>,
}

/// Transaction envelope plus its receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    pub from: String,
    /// `None` for contract creation
    #[serde(default)]
    pub to: Option<String>,
    pub value: U256,
    #[serde(default)]
    pub gas_price: Option<U256>,
    /// `None` while the transaction is not included in a block
    #[serde(default)]
    pub block_number: Option<u64>,
    /// Block timestamp (Unix seconds)
    #[serde(default)]
    pub timestamp: Option<u64>,
    pub receipt: RawReceipt,
}

impl RawTransaction {
    /// gas used × gas price; zero without a gas price.
    ///
    /// Widened to 512 bits so the product of two `U256` values cannot
    /// overflow.
    pub fn fee(&self) -> U512 {
        match self.gas_price {
            None => U512::ZERO,
            Some(price) => self.receipt.gas_used.widening_mul(price),
        }
    }

    /// Timestamp as a string, empty when unknown.
    pub fn executed(&self) -> String {
        self.timestamp.map(|t| t.to_string()).unwrap_or_default()
    }

    pub fn is_included(&self) -> bool {
        self.block_number.is_some()
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_zero()
    }
}

/// Per-call configuration: which chain, and which wallet is observing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionContext {
    pub chain_id: u64,
    pub wallet_address: String,
}

impl TransactionContext {
    pub fn new(chain_id: u64, wallet_address: impl Into<String>) -> Self {
        Self {
            chain_id,
            wallet_address: wallet_address.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTransaction {
        serde_json::from_value(serde_json::json!({
            "hash": "0xabc",
            "from": "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            "to": "0xab5801a7d398351b8be11c439e05c5b3259aec9b",
            "value": "0x0",
            "gasPrice": "0x3b9aca00",
            "blockNumber": 19000000,
            "timestamp": 1700000000,
            "receipt": { "status": 1, "gasUsed": "0x5208", "logs": [] }
        }))
        .unwrap()
    }

    #[test]
    fn fee_is_gas_used_times_price() {
        let tx = sample();
        // 21000 * 1 gwei
        assert_eq!(tx.fee(), U512::from(21_000_000_000_000u64));
        assert_eq!(tx.fee().to_string(), "21000000000000");
    }

    #[test]
    fn fee_without_gas_price_is_zero() {
        let mut tx = sample();
        tx.gas_price = None;
        assert_eq!(tx.fee(), U512::ZERO);
        assert_eq!(tx.fee().to_string(), "0");
    }

    #[test]
    fn fee_wider_than_u256_is_exact() {
        let mut tx = sample();
        tx.receipt.gas_used = U256::from(2u64);
        tx.gas_price = Some(U256::from(1u64) << 255);
        // 2 * 2^255 = 2^256
        assert_eq!(
            tx.fee().to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639936"
        );
    }

    #[test]
    fn executed_and_inclusion() {
        let mut tx = sample();
        assert_eq!(tx.executed(), "1700000000");
        assert!(tx.is_included());
        tx.timestamp = None;
        tx.block_number = None;
        assert_eq!(tx.executed(), "");
        assert!(!tx.is_included());
    }

    #[test]
    fn log_defaults() {
        let log: RawLog = serde_json::from_value(serde_json::json!({
            "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "topics": []
        }))
        .unwrap();
        assert!(log.data.is_empty());
        assert_eq!(log.log_index, 0);
    }
}
