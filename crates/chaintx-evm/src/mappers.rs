//! Event-to-action mappers.
//!
//! Each mapper turns one decoded log (or the transaction envelope) into a
//! semantic action, or returns `None` when its preconditions do not hold.
//! A `None` is an expected outcome, not an error.

use chaintx_core::address::{addresses_match, normalize_address, NormalizedAddress};
use chaintx_core::chain;
use chaintx_core::event::{DecodedLog, EventKind};
use chaintx_core::raw::{RawTransaction, TransactionContext};
use chaintx_core::registry::TokenRegistry;
use chaintx_core::types::{
    Account, AccountRole, Asset, Direction, NonFungibleToken, SwapAction, Token, TransferAction,
};
use std::sync::Arc;

/// Builds actions, resolving token metadata through the injected registry.
#[derive(Clone)]
pub struct ActionMapper {
    tokens: Arc<dyn TokenRegistry>,
}

impl std::fmt::Debug for ActionMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionMapper")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl ActionMapper {
    pub fn new(tokens: Arc<dyn TokenRegistry>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &dyn TokenRegistry {
        self.tokens.as_ref()
    }

    /// ERC-20 `Transfer` touching the wallet, with a non-zero amount.
    pub fn fungible_transfer(
        &self,
        log: &DecodedLog,
        ctx: &TransactionContext,
    ) -> Option<TransferAction> {
        if log.kind != EventKind::FungibleTransfer {
            return None;
        }
        let event = log.event.as_ref()?;
        let from = event.arg_at(0)?.as_address()?;
        let to = event.arg_at(1)?.as_address()?;
        let amount = event.arg_at(2)?.as_uint()?;

        let wallet = normalize_address(&ctx.wallet_address);
        let outgoing = addresses_match(Some(&from), wallet.as_ref());
        if !outgoing && !addresses_match(Some(&to), wallet.as_ref()) {
            return None;
        }
        if amount.is_zero() {
            return None;
        }

        let token = self.resolve_token(log, ctx);
        Some(TransferAction {
            token: Asset::Fungible(token),
            amount: amount.to_string(),
            from: Account::unknown(Some(from.checksummed())),
            to: Account::unknown(Some(to.checksummed())),
            direction: direction(outgoing),
        })
    }

    /// ERC-721 `Transfer` touching the wallet.
    ///
    /// Relevance and the `from` account use the transaction sender rather
    /// than the event's `from`, so approved-operator transfers are attributed
    /// to whoever submitted them.
    pub fn non_fungible_transfer(
        &self,
        tx: &RawTransaction,
        log: &DecodedLog,
        ctx: &TransactionContext,
    ) -> Option<TransferAction> {
        if log.kind != EventKind::NonFungibleTransfer {
            return None;
        }
        let event = log.event.as_ref()?;
        let to = event.arg_at(1)?.as_address()?;
        let token_id = event.arg_at(2)?.as_uint()?;

        let wallet = normalize_address(&ctx.wallet_address);
        let sender = normalize_address(&tx.from);
        let outgoing = addresses_match(sender.as_ref(), wallet.as_ref());
        if !outgoing && !addresses_match(Some(&to), wallet.as_ref()) {
            return None;
        }

        let contract = display_address(log.contract_address(), &log.raw.address);
        let nft = NonFungibleToken::synthesize(contract, token_id.to_string(), ctx.chain_id, None);
        Some(TransferAction {
            token: Asset::NonFungible(nft),
            amount: "1".to_string(),
            from: Account::unknown(Some(display_address(sender, &tx.from))),
            to: Account::unknown(Some(to.checksummed())),
            direction: direction(outgoing),
        })
    }

    /// Uniswap V2 `Swap`: the wallet traded through the emitting contract.
    ///
    /// Participation is not checked here; the swap rule does that against
    /// the event's `to`.
    pub fn swap(&self, log: &DecodedLog, ctx: &TransactionContext) -> Option<SwapAction> {
        if log.kind != EventKind::Swap {
            return None;
        }
        log.event.as_ref()?;
        let trader = normalize_address(&ctx.wallet_address).map(|a| a.checksummed());
        let application = log.contract_address().map(|a| a.checksummed());
        Some(SwapAction {
            trader: Account::new(AccountRole::External, trader),
            application: Account::new(AccountRole::Contract, application),
        })
    }

    /// Recipient (`to`) of a decoded swap event.
    pub fn swap_recipient(log: &DecodedLog) -> Option<NormalizedAddress> {
        if log.kind != EventKind::Swap {
            return None;
        }
        let event = log.event.as_ref()?;
        event.address_arg("to").or_else(|| event.arg_at(5)?.as_address())
    }

    /// The envelope's native value as a transfer.
    pub fn native_transfer(&self, tx: &RawTransaction, ctx: &TransactionContext) -> TransferAction {
        let wallet = normalize_address(&ctx.wallet_address);
        let sender = normalize_address(&tx.from);
        let recipient = tx.to.as_deref().and_then(normalize_address);
        let outgoing = addresses_match(sender.as_ref(), wallet.as_ref());

        TransferAction {
            token: Asset::Fungible(self.native_token(ctx.chain_id)),
            amount: tx.value.to_string(),
            from: Account::unknown(Some(display_address(sender, &tx.from))),
            to: Account::unknown(
                tx.to
                    .as_deref()
                    .map(|raw| display_address(recipient, raw)),
            ),
            direction: direction(outgoing),
        }
    }

    fn native_token(&self, chain_id: u64) -> Token {
        self.tokens
            .find_by_symbol(chain::native_symbol(chain_id))
            .filter(|token| token.chain_id == chain_id && token.address.is_none())
            .unwrap_or_else(|| chain::native_token(chain_id))
    }

    fn resolve_token(&self, log: &DecodedLog, ctx: &TransactionContext) -> Token {
        let contract = log.contract_address();
        contract
            .as_ref()
            .and_then(|addr| self.tokens.find_by_address(addr))
            .unwrap_or_else(|| Token::unknown(display_address(contract, &log.raw.address), ctx.chain_id))
    }
}

fn direction(outgoing: bool) -> Direction {
    if outgoing {
        Direction::Out
    } else {
        Direction::In
    }
}

/// Checksummed form when valid, otherwise the input verbatim.
pub(crate) fn display_address(normalized: Option<NormalizedAddress>, raw: &str) -> String {
    normalized
        .map(|a| a.checksummed())
        .unwrap_or_else(|| raw.to_string())
}
