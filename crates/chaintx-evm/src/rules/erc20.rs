use chaintx_core::event::EventKind;
use chaintx_core::types::{Action, Direction, Transaction, TransactionType};

use super::{ClassificationRule, Declined, RuleInput};

/// Exactly one ERC-20 transfer, and it touches the wallet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erc20DirectTransferRule;

impl ClassificationRule for Erc20DirectTransferRule {
    fn name(&self) -> &'static str {
        "erc20_direct_transfer"
    }

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined> {
        let log = input
            .only_log_of(EventKind::FungibleTransfer)
            .ok_or(Declined::NotApplicable)?;
        let action = input
            .mapper
            .fungible_transfer(log, input.context)
            .ok_or(Declined::NotApplicable)?;

        let kind = match action.direction {
            Direction::Out => TransactionType::SendToken,
            Direction::In => TransactionType::ReceiveToken,
        };
        Ok(input.build(kind, vec![Action::Transfer(action)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn send_and_receive() {
        let send = raw_tx(WALLET, USDC, 0, vec![erc20_transfer(USDC, WALLET, OTHER, 5)]);
        assert_eq!(apply(&Erc20DirectTransferRule, &send).unwrap().kind, TransactionType::SendToken);

        let receive = raw_tx(OTHER, USDC, 0, vec![erc20_transfer(USDC, OTHER, WALLET, 5)]);
        assert_eq!(
            apply(&Erc20DirectTransferRule, &receive).unwrap().kind,
            TransactionType::ReceiveToken
        );
    }

    #[test]
    fn two_transfers_decline() {
        let tx = raw_tx(
            WALLET,
            USDC,
            0,
            vec![erc20_transfer(USDC, WALLET, OTHER, 5), erc20_transfer(USDT, OTHER, WALLET, 5)],
        );
        assert!(matches!(apply(&Erc20DirectTransferRule, &tx), Err(Declined::NotApplicable)));
    }

    #[test]
    fn zero_amount_declines() {
        let tx = raw_tx(WALLET, USDC, 0, vec![erc20_transfer(USDC, WALLET, OTHER, 0)]);
        assert!(apply(&Erc20DirectTransferRule, &tx).is_err());
    }

    #[test]
    fn nft_transfer_is_not_counted() {
        let tx = raw_tx(WALLET, COLLECTION, 0, vec![erc721_transfer(COLLECTION, WALLET, OTHER, 1)]);
        assert!(apply(&Erc20DirectTransferRule, &tx).is_err());
    }
}
