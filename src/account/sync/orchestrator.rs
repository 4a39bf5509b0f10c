//! Account sync orchestrator.
//!
//! `AccountSyncOrchestrator` owns the published account state and runs refresh cycles
//! against the RPC port. A refresh cycle queries the balance, then the outputs, feeds the
//! outputs through the reconciler, swaps the new snapshot in and only then notifies
//! subscribers.
//!
//! Guarantees:
//! - Cycles are single-flight: a cycle holds the refresh guard from start to finish,
//!   whichever path (timer, send, manual) started it.
//! - A failed query leaves the corresponding part of the state untouched and raises no
//!   event. Nothing propagates to the caller.
//! - Readers see either the previous or the next snapshot, never a mix.
//! - Once closed, no new cycle starts.
//! - Event handlers may read the snapshot. Refreshes and address queries issued from a
//!   handler are ignored.

use crate::account::sync::events::{AccountEvent, AccountEventHandler, EventDispatcher};
use crate::account::sync::readiness::{ReadinessTracker, SyncState};
use crate::account::sync::state::AccountSnapshot;
use crate::rpc::AccountRpc;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

tokio::task_local! {
	/// Set while handlers run, so calls back into the orchestrator can be refused.
	static DISPATCHING: bool;
}

fn in_dispatch() -> bool {
	DISPATCHING.try_with(|dispatching| *dispatching).unwrap_or(false)
}

/// Snapshot and readiness, updated together under one lock.
#[derive(Debug, Default)]
struct Published {
	snapshot: Arc<AccountSnapshot>,
	readiness: ReadinessTracker,
}

pub struct AccountSyncOrchestrator {
	rpc: Arc<dyn AccountRpc>,
	published: RwLock<Published>,
	dispatcher: Mutex<EventDispatcher>,
	/// Held for the whole duration of a refresh cycle.
	refresh_guard: Mutex<()>,
	closed: AtomicBool,
}

impl AccountSyncOrchestrator {
	pub fn new(rpc: Arc<dyn AccountRpc>) -> Self {
		Self {
			rpc,
			published: RwLock::new(Published::default()),
			dispatcher: Mutex::new(EventDispatcher::new()),
			refresh_guard: Mutex::new(()),
			closed: AtomicBool::new(false),
		}
	}

	pub fn rpc(&self) -> &Arc<dyn AccountRpc> {
		&self.rpc
	}

	/// Register a subscriber.
	///
	/// Must not be called from inside a handler.
	pub async fn register_handler(&self, handler: Box<dyn AccountEventHandler>) {
		let mut dispatcher = self.dispatcher.lock().await;
		debug!("Registering event handler {}", handler.name());
		dispatcher.register_handler(handler);
		debug!("{} event handler(s) registered", dispatcher.handler_count());
	}

	/// Current published snapshot.
	pub async fn snapshot(&self) -> Arc<AccountSnapshot> {
		self.published.read().await.snapshot.clone()
	}

	pub async fn is_ready(&self) -> bool {
		self.published.read().await.readiness.is_ready()
	}

	pub async fn sync_state(&self) -> SyncState {
		self.published.read().await.readiness.state()
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	/// Fetch the wallet address and publish it.
	///
	/// Does nothing when called from an event handler.
	pub async fn query_address(&self) {
		if in_dispatch() {
			warn!("Ignoring address query issued from an event handler");
			return;
		}

		let address = match self.rpc.query_address().await {
			Ok(address) => address,
			Err(e) => {
				warn!("Address query failed: {}", e);
				return;
			}
		};

		self.publish(|snapshot, readiness| {
			let mut events: Vec<AccountEvent> =
				snapshot.publish_address(address).into_iter().collect();
			if readiness.record_address() {
				events.push(AccountEvent::Initialized);
			}
			events
		})
		.await;
	}

	/// Run one refresh cycle.
	///
	/// Waits for any cycle already in flight. Returns false without querying anything if
	/// the orchestrator has been closed or if called from an event handler, since the
	/// cycle that raised the event is still holding the refresh guard.
	pub async fn refresh(&self) -> bool {
		if in_dispatch() {
			warn!("Ignoring refresh requested from an event handler");
			return false;
		}

		let _cycle = self.refresh_guard.lock().await;

		if self.is_closed() {
			debug!("Skipping refresh: account is closed");
			return false;
		}

		debug!("Refresh cycle started");
		self.refresh_balance().await;
		self.refresh_transactions().await;
		debug!("Refresh cycle finished");
		true
	}

	async fn refresh_balance(&self) {
		match self.rpc.query_balance().await {
			Ok(balance) => {
				self.publish(|snapshot, _| {
					snapshot.publish_balance(balance).into_iter().collect()
				})
				.await;
			}
			Err(e) => warn!("Balance query failed, keeping previous balance: {}", e),
		}
	}

	async fn refresh_transactions(&self) {
		let outputs = match self.rpc.query_incoming_transfers().await {
			Ok(outputs) => Some(outputs),
			Err(e) => {
				warn!("Outputs query failed, keeping previous transactions: {}", e);
				None
			}
		};

		self.publish(|snapshot, readiness| {
			let mut events = match outputs {
				Some(outputs) => {
					let output_count = outputs.len();
					let events =
						snapshot.publish_outputs(outputs, readiness.transaction_pass_done());
					debug!(
						"Reconciled {} outputs into {} transactions ({} events)",
						output_count,
						snapshot.transactions.len(),
						events.len()
					);
					events
				}
				None => Vec::new(),
			};

			snapshot.refreshed_at = Some(chrono::Utc::now());
			if readiness.record_transaction_pass() {
				events.push(AccountEvent::Initialized);
			}
			events
		})
		.await;
	}

	/// Apply `update` to a draft of the current snapshot, swap the draft in and notify.
	///
	/// The dispatcher lock is taken first and held until every handler has run, so
	/// notifications go out in publication order. The state lock is released before
	/// dispatching, leaving handlers free to read the snapshot.
	async fn publish<F>(&self, update: F)
	where
		F: FnOnce(&mut AccountSnapshot, &mut ReadinessTracker) -> Vec<AccountEvent>,
	{
		let mut dispatcher = self.dispatcher.lock().await;

		let events = {
			let mut published = self.published.write().await;
			let mut draft = (*published.snapshot).clone();

			let events = update(&mut draft, &mut published.readiness);
			published.snapshot = Arc::new(draft);
			events
		};

		if events.is_empty() {
			return;
		}

		DISPATCHING
			.scope(true, dispatcher.dispatch_all(&events))
			.await;
	}

	/// Stop accepting cycles and wait for the one in flight, if any.
	///
	/// Returns whether the account had reached readiness.
	pub async fn close(&self) -> bool {
		if !self.closed.swap(true, Ordering::SeqCst) {
			info!("Closing account sync");
		}

		if in_dispatch() {
			// The cycle in flight is the one running this handler.
			return self.is_ready().await;
		}

		let _idle = self.refresh_guard.lock().await;
		self.is_ready().await
	}
}
