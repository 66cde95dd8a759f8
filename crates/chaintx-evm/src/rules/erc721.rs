use chaintx_core::event::EventKind;
use chaintx_core::types::{Action, Direction, Transaction, TransactionType};

use super::{ClassificationRule, Declined, RuleInput};

/// Exactly one ERC-721 transfer, and it touches the wallet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erc721DirectTransferRule;

impl ClassificationRule for Erc721DirectTransferRule {
    fn name(&self) -> &'static str {
        "erc721_direct_transfer"
    }

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined> {
        let log = input
            .only_log_of(EventKind::NonFungibleTransfer)
            .ok_or(Declined::NotApplicable)?;
        let action = input
            .mapper
            .non_fungible_transfer(input.tx, log, input.context)
            .ok_or(Declined::NotApplicable)?;

        let kind = match action.direction {
            Direction::Out => TransactionType::SendNft,
            Direction::In => TransactionType::ReceiveNft,
        };
        Ok(input.build(kind, vec![Action::Transfer(action)]))
    }
}
