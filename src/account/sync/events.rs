//! Event system for account synchronization.
//!
//! This module defines the change notifications raised by the account, the handler trait
//! subscribers implement, and the dispatcher that fans each event out to every registered
//! handler. Events are only ever raised for genuinely new or altered facts; a failed query
//! produces no event at all.

use crate::account::types::{AccountError, Balance, Transaction};
use crate::utils::format_xmr_amount;

use tokio::sync::mpsc;
use tracing::{error, info};

/// Change notifications raised by the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
	/// The wallet address was fetched
	AddressReceived { address: String },
	/// The balance differs from the previously published one
	BalanceChanged { balance: Balance },
	/// A transaction appeared past the end of the previous list
	TransactionReceived { transaction: Transaction },
	/// The spendable amount of an existing transaction changed
	TransactionChanged {
		index: usize,
		transaction: Transaction,
	},
	/// Address and first transaction pass are both known. Raised once.
	Initialized,
}

/// Trait for handling account events.
///
/// Implementors receive all account events and can perform side effects or state updates.
#[async_trait::async_trait]
pub trait AccountEventHandler: Send + Sync {
	/// Handle an account event.
	async fn handle(&mut self, event: &AccountEvent) -> Result<(), AccountError>;

	/// Get the name of this handler for logging and diagnostics.
	fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in registration order. With no handlers registered, dispatching is
/// a no-op.
#[derive(Default)]
pub struct EventDispatcher {
	handlers: Vec<Box<dyn AccountEventHandler>>,
}

impl EventDispatcher {
	/// Create a new, empty event dispatcher.
	pub fn new() -> Self {
		Self {
			handlers: Vec::new(),
		}
	}

	/// Register a new event handler.
	pub fn register_handler(&mut self, handler: Box<dyn AccountEventHandler>) {
		self.handlers.push(handler);
	}

	pub fn handler_count(&self) -> usize {
		self.handlers.len()
	}

	/// Dispatch an event to all registered handlers.
	///
	/// Errors from handlers are logged, but do not stop other handlers from running.
	pub async fn dispatch(&mut self, event: &AccountEvent) {
		for handler in &mut self.handlers {
			if let Err(e) = handler.handle(event).await {
				error!("Handler {} failed to process event: {}", handler.name(), e);
			}
		}
	}

	/// Dispatch a batch of events in order.
	pub async fn dispatch_all(&mut self, events: &[AccountEvent]) {
		for event in events {
			self.dispatch(event).await;
		}
	}
}

/// Forwards every event into an unbounded channel.
pub struct ChannelEventHandler {
	sender: mpsc::UnboundedSender<AccountEvent>,
}

impl ChannelEventHandler {
	pub fn new(sender: mpsc::UnboundedSender<AccountEvent>) -> Self {
		Self { sender }
	}

	/// Create a handler together with the receiving end of its channel.
	pub fn channel() -> (Self, mpsc::UnboundedReceiver<AccountEvent>) {
		let (sender, receiver) = mpsc::unbounded_channel();
		(Self::new(sender), receiver)
	}
}

#[async_trait::async_trait]
impl AccountEventHandler for ChannelEventHandler {
	async fn handle(&mut self, event: &AccountEvent) -> Result<(), AccountError> {
		self.sender
			.send(event.clone())
			.map_err(|_| AccountError::Handler("event receiver dropped".to_string()))
	}

	fn name(&self) -> &'static str {
		"ChannelEventHandler"
	}
}

/// Writes a human readable line per event to the log.
pub struct LoggingEventHandler;

#[async_trait::async_trait]
impl AccountEventHandler for LoggingEventHandler {
	async fn handle(&mut self, event: &AccountEvent) -> Result<(), AccountError> {
		match event {
			AccountEvent::AddressReceived { address } => {
				info!("Account address: {}", address);
			}
			AccountEvent::BalanceChanged { balance } => {
				info!(
					"Balance changed: {} XMR total, {} XMR unlocked",
					format_xmr_amount(balance.total),
					format_xmr_amount(balance.unlocked)
				);
			}
			AccountEvent::TransactionReceived { transaction } => {
				info!(
					"Transaction #{} received: {} ({} XMR, {} XMR spendable)",
					transaction.index,
					transaction.transaction_id,
					format_xmr_amount(transaction.amount_total()),
					format_xmr_amount(transaction.amount_spendable)
				);
			}
			AccountEvent::TransactionChanged { index, transaction } => {
				info!(
					"Transaction #{} changed: {} now has {} XMR spendable",
					index,
					transaction.transaction_id,
					format_xmr_amount(transaction.amount_spendable)
				);
			}
			AccountEvent::Initialized => info!("Account initialized"),
		}
		Ok(())
	}

	fn name(&self) -> &'static str {
		"LoggingEventHandler"
	}
}
