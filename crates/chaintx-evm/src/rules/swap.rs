use chaintx_core::address::addresses_match;
use chaintx_core::event::EventKind;
use chaintx_core::types::{Action, Transaction, TransactionType};

use super::{ClassificationRule, Declined, RuleInput};
use crate::mappers::ActionMapper;

/// A token swap: a swap event paying out to the wallet, plus at least one
/// ERC-20 transfer touching the wallet.
///
/// Actions are the swap first, then every relevant transfer in log order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erc20SwapRule;

impl ClassificationRule for Erc20SwapRule {
    fn name(&self) -> &'static str {
        "erc20_swap"
    }

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined> {
        let wallet = input.wallet().ok_or(Declined::NotApplicable)?;

        let swap_log = input
            .logs_of(EventKind::Swap)
            .find(|log| addresses_match(ActionMapper::swap_recipient(log).as_ref(), Some(&wallet)))
            .ok_or(Declined::NotApplicable)?;
        let swap = input
            .mapper
            .swap(swap_log, input.context)
            .ok_or(Declined::NotApplicable)?;

        let transfers: Vec<Action> = input
            .logs_of(EventKind::FungibleTransfer)
            .filter_map(|log| input.mapper.fungible_transfer(log, input.context))
            .map(Action::Transfer)
            .collect();
        if transfers.is_empty() {
            return Err(Declined::NotApplicable);
        }

        let mut actions = Vec::with_capacity(transfers.len() + 1);
        actions.push(Action::Swap(swap));
        actions.extend(transfers);
        Ok(input.build(TransactionType::Swap, actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn swap_with_transfers() {
        let tx = raw_tx(
            WALLET,
            ROUTER,
            0,
            vec![
                erc20_transfer(USDC, WALLET, PAIR, 1_000_000_000),
                v2_swap(PAIR, ROUTER, WALLET),
            ],
        );
        let out = apply(&Erc20SwapRule, &tx).unwrap();
        assert_eq!(out.kind, TransactionType::Swap);
        assert_eq!(out.transaction_actions.len(), 2);
        assert!(out.transaction_actions[0].as_swap().is_some());
        assert!(out.transaction_actions[1].as_transfer().is_some());
    }

    #[test]
    fn swap_to_someone_else_declines() {
        let tx = raw_tx(
            WALLET,
            ROUTER,
            0,
            vec![erc20_transfer(USDC, WALLET, PAIR, 1), v2_swap(PAIR, ROUTER, OTHER)],
        );
        assert!(matches!(apply(&Erc20SwapRule, &tx), Err(Declined::NotApplicable)));
    }

    #[test]
    fn swap_without_relevant_transfer_declines() {
        let tx = raw_tx(
            WALLET,
            ROUTER,
            0,
            vec![erc20_transfer(USDC, OTHER, PAIR, 1), v2_swap(PAIR, ROUTER, WALLET)],
        );
        assert!(matches!(apply(&Erc20SwapRule, &tx), Err(Declined::NotApplicable)));
    }
}
