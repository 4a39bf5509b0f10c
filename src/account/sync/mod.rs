//! Account Synchronization Module
//!
//! This module provides the core logic for keeping a local view of a wallet account in
//! step with the wallet RPC server. It is composed of several submodules:
//!
//! - `reconciler`: Pure grouping and diffing of raw outputs into transactions and change events.
//! - `readiness`: Tracks when the account has enough data to be considered initialized.
//! - `state`: The immutable published snapshot and the pure functions that produce the next one.
//! - `events`: Event types, the handler trait and the dispatcher fanning events out to subscribers.
//! - `orchestrator`: Runs refresh cycles, publishes snapshots atomically and notifies subscribers.
//! - `scheduler`: The periodic timer driving refresh cycles.

/// Event system for change notifications
pub mod events;
/// Refresh cycle coordinator
pub mod orchestrator;
/// Readiness state machine
pub mod readiness;
/// Output grouping and transaction diffing
pub mod reconciler;
/// Periodic refresh timer
pub mod scheduler;
/// Published account state
pub mod state;

pub use events::{
	AccountEvent, AccountEventHandler, ChannelEventHandler, EventDispatcher, LoggingEventHandler,
};
pub use orchestrator::AccountSyncOrchestrator;
pub use readiness::{ReadinessTracker, SyncState};
pub use reconciler::{Reconciliation, reconcile};
pub use scheduler::RefreshScheduler;
pub use state::AccountSnapshot;
