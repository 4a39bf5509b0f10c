//! Readiness tracking for account synchronization.
//!
//! The account becomes ready once the address has been fetched and at least one outputs
//! pass has been attempted, in either order. Readiness never reverts.

use tracing::info;

/// Where the account stands on its way to readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
	Uninitialized,
	AddressKnown,
	TransactionPassDone,
	Ready,
}

/// Tracks the two readiness prerequisites and reports the transition to ready exactly once.
#[derive(Debug, Clone, Default)]
pub struct ReadinessTracker {
	address_known: bool,
	transaction_pass_done: bool,
	ready: bool,
}

impl ReadinessTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a successful address query.
	///
	/// Returns true if this call made the account ready.
	pub fn record_address(&mut self) -> bool {
		self.address_known = true;
		self.promote()
	}

	/// Record an outputs pass, successful or not.
	///
	/// Returns true if this call made the account ready.
	pub fn record_transaction_pass(&mut self) -> bool {
		self.transaction_pass_done = true;
		self.promote()
	}

	fn promote(&mut self) -> bool {
		if self.ready || !(self.address_known && self.transaction_pass_done) {
			return false;
		}

		self.ready = true;
		info!("Account is ready");
		true
	}

	pub fn is_ready(&self) -> bool {
		self.ready
	}

	/// Whether a previous outputs pass exists to diff against.
	pub fn transaction_pass_done(&self) -> bool {
		self.transaction_pass_done
	}

	pub fn state(&self) -> SyncState {
		match (self.ready, self.address_known, self.transaction_pass_done) {
			(true, _, _) => SyncState::Ready,
			(false, true, _) => SyncState::AddressKnown,
			(false, false, true) => SyncState::TransactionPassDone,
			(false, false, false) => SyncState::Uninitialized,
		}
	}
}
