use chaintx_core::types::{Action, Transaction, TransactionType};

use super::{ClassificationRule, Declined, RuleInput};

/// Catch-all contract interaction. Always applies.
///
/// Collects every ERC-20 / ERC-721 transfer touching the wallet, most recent
/// log first, followed by the envelope's native value when non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionRule;

impl ClassificationRule for ExecutionRule {
    fn name(&self) -> &'static str {
        "execution"
    }

    fn classify(&self, input: &RuleInput<'_>) -> Result<Transaction, Declined> {
        let mut actions: Vec<Action> = input
            .logs
            .iter()
            .rev()
            .filter_map(|log| {
                input
                    .mapper
                    .fungible_transfer(log, input.context)
                    .or_else(|| input.mapper.non_fungible_transfer(input.tx, log, input.context))
            })
            .map(Action::Transfer)
            .collect();

        if input.tx.has_value() {
            let native = input.mapper.native_transfer(input.tx, input.context);
            actions.push(Action::Transfer(native));
        }

        Ok(input.build(TransactionType::Execution, actions))
    }
}
