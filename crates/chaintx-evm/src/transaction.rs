//! `TransactionDecoder`: raw transaction in, classified [`Transaction`] out.

use chaintx_core::event::DecodedLog;
use chaintx_core::raw::{RawTransaction, TransactionContext};
use chaintx_core::registry::{StaticTokenRegistry, TokenRegistry};
use chaintx_core::types::Transaction;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::decoder::LogDecoder;
use crate::fallback::build_fallback;
use crate::interfaces::InterfaceRegistry;
use crate::mappers::ActionMapper;
use crate::rules::{RuleEngine, RuleInput};

/// Decodes and classifies transactions.
///
/// Holds only read-only state, so one instance can be shared across threads
/// (`Arc<TransactionDecoder>` or plain `&TransactionDecoder` with scoped
/// threads / rayon).
#[derive(Debug)]
pub struct TransactionDecoder {
    decoder: LogDecoder,
    mapper: ActionMapper,
    engine: RuleEngine,
}

impl Default for TransactionDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionDecoder {
    /// Bundled interfaces, bundled tokens, default rule order.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TransactionDecoderBuilder {
        TransactionDecoderBuilder::default()
    }

    pub fn interfaces(&self) -> &InterfaceRegistry {
        self.decoder.interfaces()
    }

    pub fn tokens(&self) -> &dyn TokenRegistry {
        self.mapper.tokens()
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.engine
    }

    /// Decode the receipt's logs without classifying.
    pub fn decode_logs(&self, tx: &RawTransaction) -> Vec<DecodedLog> {
        self.decoder.decode_logs(&tx.receipt.logs)
    }

    /// Classify a transaction from `ctx.wallet_address`'s point of view.
    ///
    /// Total: any input yields a transaction. When no rule applies the
    /// generic execution record is returned.
    pub fn decode_transaction(&self, tx: &RawTransaction, ctx: &TransactionContext) -> Transaction {
        let logs = self.decode_logs(tx);
        debug!(
            hash = %tx.hash,
            logs = tx.receipt.logs.len(),
            decoded = logs.len(),
            "decoded receipt logs"
        );

        let input = RuleInput {
            tx,
            logs: &logs,
            context: ctx,
            mapper: &self.mapper,
        };
        match self.engine.classify(&input) {
            Some(classified) => classified,
            None => {
                warn!(hash = %tx.hash, "no classification rule applied, using fallback");
                build_fallback(tx, ctx, &self.mapper)
            }
        }
    }
}

/// Configures a [`TransactionDecoder`]. Anything left unset uses the bundled
/// default.
#[derive(Default)]
pub struct TransactionDecoderBuilder {
    tokens: Option<Arc<dyn TokenRegistry>>,
    interfaces: Option<Arc<InterfaceRegistry>>,
    rules: Option<RuleEngine>,
}

impl TransactionDecoderBuilder {
    pub fn tokens(mut self, tokens: Arc<dyn TokenRegistry>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn interfaces(mut self, interfaces: impl Into<Arc<InterfaceRegistry>>) -> Self {
        self.interfaces = Some(interfaces.into());
        self
    }

    pub fn rules(mut self, rules: RuleEngine) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> TransactionDecoder {
        let tokens = self
            .tokens
            .unwrap_or_else(|| Arc::new(StaticTokenRegistry::bundled()));
        let interfaces = self
            .interfaces
            .unwrap_or_else(|| Arc::new(InterfaceRegistry::bundled()));
        TransactionDecoder {
            decoder: LogDecoder::new(interfaces),
            mapper: ActionMapper::new(tokens),
            engine: self.rules.unwrap_or_default(),
        }
    }
}
