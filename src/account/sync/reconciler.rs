//! Reconciliation of raw outputs into the account's transaction list.
//!
//! This is the pure core of account synchronization:
//! - **Input**: the previously published transactions and a fresh, ordered output list.
//! - **Output**: the new transaction list and the events describing what changed.
//!
//! Nothing here performs IO or touches shared state; publication and notification are
//! the orchestrator's job once `reconcile` returns.

use crate::account::sync::events::AccountEvent;
use crate::account::types::{Output, Transaction};

use itertools::Itertools;
use tracing::warn;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
	pub transactions: Vec<Transaction>,
	pub events: Vec<AccountEvent>,
}

/// Run one reconciliation pass.
///
/// `initialized_before` is false only for the first pass, which establishes the baseline
/// silently.
pub fn reconcile(
	previous: &[Transaction],
	initialized_before: bool,
	outputs: &[Output],
) -> Reconciliation {
	let transactions = group_outputs(outputs);

	let events = if initialized_before {
		diff_transactions(previous, &transactions)
	} else {
		Vec::new()
	};

	Reconciliation {
		transactions,
		events,
	}
}

/// Group contiguous runs of outputs sharing a transaction id into transactions.
///
/// Runs are not merged: if outputs of one transaction are not adjacent, the id appears
/// once per run.
pub fn group_outputs(outputs: &[Output]) -> Vec<Transaction> {
	let mut transactions = Vec::new();

	for (index, (transaction_id, run)) in outputs
		.iter()
		.group_by(|output| output.transaction_id.clone())
		.into_iter()
		.enumerate()
	{
		let mut transaction = Transaction::new(transaction_id, index);

		for output in run {
			if output.is_spendable {
				transaction.amount_spendable =
					transaction.amount_spendable.saturating_add(output.amount);
			} else {
				transaction.amount_unspendable =
					transaction.amount_unspendable.saturating_add(output.amount);
			}
		}

		transactions.push(transaction);
	}

	transactions
}

/// Index-matched diff of two transaction lists.
///
/// Emits `TransactionChanged` for every shared index whose spendable amount differs, then
/// `TransactionReceived` for every index past the end of `previous`, in ascending order.
/// Unspendable amounts are not compared.
pub fn diff_transactions(previous: &[Transaction], current: &[Transaction]) -> Vec<AccountEvent> {
	if current.len() < previous.len() {
		warn!(
			"Transaction list shrank from {} to {} entries; only the shared prefix is compared",
			previous.len(),
			current.len()
		);
	}

	let changed = previous
		.iter()
		.zip(current)
		.enumerate()
		.filter(|(_, (old, new))| old.amount_spendable != new.amount_spendable)
		.map(|(index, (_, new))| AccountEvent::TransactionChanged {
			index,
			transaction: new.clone(),
		});

	let received = current
		.iter()
		.skip(previous.len())
		.map(|transaction| AccountEvent::TransactionReceived {
			transaction: transaction.clone(),
		});

	changed.chain(received).collect()
}

#[cfg(test)]
mod tests;
