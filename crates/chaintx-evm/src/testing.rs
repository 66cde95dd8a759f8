//! Log and transaction builders shared by unit tests.

use alloy_primitives::{Address, B256, U256};
use chaintx_core::event::{SWAP_SIGNATURE, TRANSFER_SIGNATURE};
use chaintx_core::raw::{RawLog, RawReceipt, RawTransaction, TransactionContext};

use crate::fingerprint::keccak256_signature;

pub const WALLET: &str = "0x4a7C6899cdcB379e284fBFD045462e751DA4C7cE";
pub const OTHER: &str = "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B";
pub const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
/// Not in the bundled token list
pub const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
pub const PAIR: &str = "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc";
pub const ROUTER: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";
pub const COLLECTION: &str = "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D";

const APPROVAL_SIGNATURE: &str = "Approval(address,address,uint256)";

pub fn topic_hex(word: B256) -> String {
    format!("0x{}", hex::encode(word))
}

fn address_topic(address: &str) -> String {
    let address: Address = address.parse().unwrap();
    topic_hex(B256::left_padding_from(address.as_slice()))
}

fn uint_topic(value: u64) -> String {
    topic_hex(B256::from(U256::from(value).to_be_bytes::<32>()))
}

fn selector(signature: &str) -> String {
    topic_hex(keccak256_signature(signature))
}

fn words(values: &[u64]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| U256::from(*v).to_be_bytes::<32>())
        .collect()
}

pub fn erc20_transfer(token: &str, from: &str, to: &str, amount: u64) -> RawLog {
    RawLog {
        address: token.to_lowercase(),
        topics: vec![selector(TRANSFER_SIGNATURE), address_topic(from), address_topic(to)],
        data: words(&[amount]).into(),
        log_index: 0,
    }
}

pub fn erc721_transfer(collection: &str, from: &str, to: &str, token_id: u64) -> RawLog {
    RawLog {
        address: collection.to_lowercase(),
        topics: vec![
            selector(TRANSFER_SIGNATURE),
            address_topic(from),
            address_topic(to),
            uint_topic(token_id),
        ],
        data: Default::default(),
        log_index: 0,
    }
}

pub fn erc20_approval(token: &str, owner: &str, spender: &str, amount: u64) -> RawLog {
    RawLog {
        address: token.to_lowercase(),
        topics: vec![selector(APPROVAL_SIGNATURE), address_topic(owner), address_topic(spender)],
        data: words(&[amount]).into(),
        log_index: 0,
    }
}

pub fn v2_swap(pair: &str, sender: &str, to: &str) -> RawLog {
    RawLog {
        address: pair.to_lowercase(),
        topics: vec![selector(SWAP_SIGNATURE), address_topic(sender), address_topic(to)],
        data: words(&[0, 500_000_000_000_000_000, 1_000_000_000, 0]).into(),
        log_index: 0,
    }
}

/// An included transaction: block 19000000, 21000 gas at 1 gwei.
pub fn raw_tx(from: &str, to: &str, value: u64, logs: Vec<RawLog>) -> RawTransaction {
    let logs = logs
        .into_iter()
        .enumerate()
        .map(|(i, mut log)| {
            log.log_index = i as u32;
            log
        })
        .collect();
    RawTransaction {
        hash: "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060".into(),
        from: from.to_lowercase(),
        to: Some(to.to_lowercase()),
        value: U256::from(value),
        gas_price: Some(U256::from(1_000_000_000u64)),
        block_number: Some(19_000_000),
        timestamp: Some(1_700_000_000),
        receipt: RawReceipt {
            status: Some(1),
            gas_used: U256::from(21_000u64),
            logs,
        },
    }
}

pub fn context() -> TransactionContext {
    TransactionContext::new(1, WALLET)
}

/// Run a single rule against `tx` with the bundled interfaces and tokens.
pub fn apply(
    rule: &dyn crate::rules::ClassificationRule,
    tx: &RawTransaction,
) -> Result<chaintx_core::types::Transaction, crate::rules::Declined> {
    use chaintx_core::registry::StaticTokenRegistry;
    use std::sync::Arc;

    let logs = crate::decoder::LogDecoder::default().decode_logs(&tx.receipt.logs);
    let mapper = crate::mappers::ActionMapper::new(Arc::new(StaticTokenRegistry::bundled()));
    let ctx = context();
    let input = crate::rules::RuleInput {
        tx,
        logs: &logs,
        context: &ctx,
        mapper: &mapper,
    };
    rule.classify(&input)
}
