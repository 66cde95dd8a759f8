//! Ordered, first-match-wins classification rules.
//!
//! A rule either produces the final [`Transaction`] or declines. Declines
//! come in two flavours: the expected "this rule does not apply", and an
//! internal fault. The engine treats both the same way and moves on to the
//! next rule; a rule that panics is caught and treated as a fault.

mod erc20;
mod erc721;
mod execution;
mod native;
mod swap;

pub use erc20::Erc20DirectTransferRule;
pub use erc721::Erc721DirectTransferRule;
pub use execution::ExecutionRule;
pub use native::NativeTransferRule;
pub use swap::Erc20SwapRule;

use chaintx_core::address::{normalize_address, NormalizedAddress};
use chaintx_core::error::RuleError;
use chaintx_core::event::{DecodedLog, EventKind};
use chaintx_core::raw::{RawTransaction, TransactionContext};
use chaintx_core::types::{
    Action, Direction, Transaction, TransactionStatus, TransactionType,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

use crate::mappers::{display_address, ActionMapper};

/// Why a rule did not produce a transaction.
#[derive(Debug)]
pub enum Declined {
    /// Preconditions not met. The normal case.
    NotApplicable,
    /// Something went wrong inside the rule.
    Fault(RuleError),
}

impl From<RuleError> for Declined {
    fn from(e: RuleError) -> Self {
        Declined::Fault(e)
    }
}

/// Everything a rule may look at.
pub struct RuleInput<'a> {
    pub tx: &'a RawTransaction,
    /// Successfully decoded logs, in receipt order
    pub logs: &'a [DecodedLog],
    pub context: &'a TransactionContext,
    pub mapper: &'a ActionMapper,
}

impl<'a> RuleInput<'a> {
    pub fn wallet(&self) -> Option<NormalizedAddress> {
        normalize_address(&self.context.wallet_address)
    }

    pub fn logs_of(&self, kind: EventKind) -> impl Iterator<Item = &'a DecodedLog> {
        self.logs.iter().filter(move |log| log.kind == kind)
    }

    /// The single log of `kind`, if there is exactly one.
    pub fn only_log_of(&self, kind: EventKind) -> Option<&'a DecodedLog> {
        let mut logs = self.logs_of(kind);
        match (logs.next(), logs.next()) {
            (Some(log), None) => Some(log),
            _ => None,
        }
    }

    /// Assemble the final record around `actions`.
    pub fn build(&self, kind: TransactionType, actions: Vec<Action>) -> Transaction {
        assemble(self.tx, self.context, kind, actions)
    }
}

/// Shared envelope fields of every classified transaction.
pub(crate) fn assemble(
    tx: &RawTransaction,
    ctx: &TransactionContext,
    kind: TransactionType,
    actions: Vec<Action>,
) -> Transaction {
    let wallet = normalize_address(&ctx.wallet_address);
    let sender = normalize_address(&tx.from);
    let direction = match (&sender, &wallet) {
        (Some(s), Some(w)) if s == w => Direction::Out,
        _ => Direction::In,
    };
    let status = if tx.is_included() {
        TransactionStatus::Success
    } else {
        TransactionStatus::Failed
    };

    Transaction {
        hash: tx.hash.clone(),
        chain_id: ctx.chain_id,
        kind,
        status,
        executed: tx.executed(),
        fee: tx.fee().to_string(),
        from_address: Some(display_address(sender, &tx.from)),
        to_address: tx
            .to
            .as_deref()
            .map(|raw| display_address(normalize_address(raw), raw)),
        value: tx.value.to_string(),
        direction,
        transaction_actions: actions,
        wallet_address: Some(display_address(wallet, &ctx.wallet_address)),
    }
}

/// A transaction classification rule.
pub trait ClassificationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined>;
}

/// Runs rules in order; the first one to produce a transaction wins.
///
/// A panicking rule is isolated, but the process panic hook still runs, so
/// the default hook prints the panic message to stderr.
pub struct RuleEngine {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine").field("rules", &self.names()).finish()
    }
}

impl Default for RuleEngine {
    /// Swap, ERC-20 transfer, ERC-721 transfer, native transfer, execution.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Erc20SwapRule),
            Box::new(Erc20DirectTransferRule),
            Box::new(Erc721DirectTransferRule),
            Box::new(NativeTransferRule),
            Box::new(ExecutionRule),
        ])
    }
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn ClassificationRule>>) -> Self {
        Self { rules }
    }

    /// No rules: every transaction goes to the fallback builder.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push(&mut self, rule: Box<dyn ClassificationRule>) {
        self.rules.push(rule);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First matching rule's transaction, or `None` when every rule declined.
    pub fn classify(&self, input: &RuleInput<'_>) -> Option<Transaction> {
        for rule in &self.rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.classify(input)))
                .unwrap_or_else(|payload| {
                    Err(Declined::Fault(RuleError::Panicked {
                        rule: rule.name().to_string(),
                        message: panic_message(payload.as_ref()),
                    }))
                });

            match outcome {
                Ok(tx) => {
                    debug!(rule = rule.name(), kind = %tx.kind, hash = %tx.hash, "rule matched");
                    return Some(tx);
                }
                Err(Declined::NotApplicable) => {
                    trace!(rule = rule.name(), hash = %input.tx.hash, "rule not applicable");
                }
                Err(Declined::Fault(e)) => {
                    warn!(rule = rule.name(), hash = %input.tx.hash, error = %e, "rule faulted");
                }
            }
        }
        None
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
