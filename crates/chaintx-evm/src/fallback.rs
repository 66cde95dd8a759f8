//! The record produced when no rule applies.

use chaintx_core::raw::{RawTransaction, TransactionContext};
use chaintx_core::types::{Action, Transaction, TransactionType};

use crate::mappers::ActionMapper;
use crate::rules::assemble;

/// A generic `EXECUTION` with the native value as its only possible action.
pub fn build_fallback(
    tx: &RawTransaction,
    ctx: &TransactionContext,
    mapper: &ActionMapper,
) -> Transaction {
    let mut actions = Vec::new();
    if tx.has_value() {
        actions.push(Action::Transfer(mapper.native_transfer(tx, ctx)));
    }
    assemble(tx, ctx, TransactionType::Execution, actions)
}
