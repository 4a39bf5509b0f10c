//! Published account state.
//!
//! `AccountSnapshot` is an immutable value once published. Refresh cycles clone the
//! current snapshot into a draft, apply changes through the `publish_*` methods (which
//! return the events the change warrants) and then swap the whole draft in at once.

use crate::account::sync::events::AccountEvent;
use crate::account::sync::reconciler::reconcile;
use crate::account::types::{Balance, Output, Transaction};

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSnapshot {
	pub address: Option<String>,
	pub balance: Option<Balance>,
	pub transactions: Vec<Transaction>,
	pub outputs: Vec<Output>,
	/// Completion time of the last refresh cycle.
	pub refreshed_at: Option<DateTime<Utc>>,
}

impl AccountSnapshot {
	/// Set the address if none is known yet.
	pub fn publish_address(&mut self, address: String) -> Option<AccountEvent> {
		if self.address.is_some() {
			return None;
		}

		self.address = Some(address.clone());
		Some(AccountEvent::AddressReceived { address })
	}

	/// Replace the balance. An equal balance is a no-op.
	pub fn publish_balance(&mut self, balance: Balance) -> Option<AccountEvent> {
		if self.balance == Some(balance) {
			return None;
		}

		self.balance = Some(balance);
		Some(AccountEvent::BalanceChanged { balance })
	}

	/// Replace outputs and transactions with the result of reconciling `outputs`.
	pub fn publish_outputs(
		&mut self,
		outputs: Vec<Output>,
		initialized_before: bool,
	) -> Vec<AccountEvent> {
		let reconciliation = reconcile(&self.transactions, initialized_before, &outputs);

		self.transactions = reconciliation.transactions;
		self.outputs = outputs;
		reconciliation.events
	}

	/// Sum of spendable amounts over all transactions.
	pub fn spendable_total(&self) -> u64 {
		self.transactions
			.iter()
			.fold(0u64, |acc, t| acc.saturating_add(t.amount_spendable))
	}
}
