use chaintx_core::types::{Action, Direction, Transaction, TransactionType};

use super::{ClassificationRule, Declined, RuleInput};

/// A plain value transfer: no decoded logs and a non-zero value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTransferRule;

impl ClassificationRule for NativeTransferRule {
    fn name(&self) -> &'static str {
        "native_transfer"
    }

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined> {
        if !input.logs.is_empty() || !input.tx.has_value() {
            return Err(Declined::NotApplicable);
        }

        let action = input.mapper.native_transfer(input.tx, input.context);
        let kind = match action.direction {
            Direction::Out => TransactionType::SendToken,
            Direction::In => TransactionType::ReceiveToken,
        };
        Ok(input.build(kind, vec![Action::Transfer(action)]))
    }
}
