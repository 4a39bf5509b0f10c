//! Account facade.
//!
//! `AccountManager` is what applications hold: it exposes the published address, balance,
//! transactions and outputs, lets subscribers attach, forwards key/payment/transfer calls
//! to the RPC port and owns the refresh timer's lifecycle.

use crate::account::sync::{
	AccountEvent, AccountEventHandler, AccountSnapshot, AccountSyncOrchestrator,
	ChannelEventHandler, RefreshScheduler, SyncState,
};
use crate::account::types::{
	AccountError, Balance, KeyType, Output, Payment, Transaction, TransferRecipient,
	TransferRequest,
};
use crate::config::AccountConfig;
use crate::rpc::AccountRpc;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

pub struct AccountManager {
	orchestrator: Arc<AccountSyncOrchestrator>,
	config: AccountConfig,
	scheduler: Mutex<Option<RefreshScheduler>>,
	disposed: AtomicBool,
}

impl AccountManager {
	/// Create a manager for the wallet behind `rpc`. Nothing is queried until `initialize`.
	pub fn new(rpc: Arc<dyn AccountRpc>, config: AccountConfig) -> Result<Self, AccountError> {
		config.validate()?;

		Ok(Self {
			orchestrator: Arc::new(AccountSyncOrchestrator::new(rpc)),
			config,
			scheduler: Mutex::new(None),
			disposed: AtomicBool::new(false),
		})
	}

	pub fn config(&self) -> &AccountConfig {
		&self.config
	}

	/// Attach a subscriber.
	///
	/// Handlers may read the account but must not subscribe further handlers or dispose
	/// the account. A refresh requested from a handler is skipped, including the one
	/// following a send.
	pub async fn subscribe(&self, handler: Box<dyn AccountEventHandler>) {
		self.orchestrator.register_handler(handler).await;
	}

	/// Attach a channel subscriber and return its receiving end.
	pub async fn subscribe_channel(&self) -> mpsc::UnboundedReceiver<AccountEvent> {
		let (handler, receiver) = ChannelEventHandler::channel();
		self.subscribe(Box::new(handler)).await;
		receiver
	}

	/// Start the refresh timer and fetch the address.
	///
	/// The first refresh cycle starts immediately. Calling this again while the timer is
	/// running does nothing.
	pub async fn initialize(&self) -> Result<(), AccountError> {
		if self.disposed.load(Ordering::SeqCst) {
			return Err(AccountError::Disposed);
		}

		{
			let mut scheduler = self.scheduler.lock().await;
			if scheduler.as_ref().is_some_and(RefreshScheduler::is_running) {
				return Ok(());
			}

			info!(
				"Starting account sync against {} every {:?}",
				self.config.rpc_url, self.config.refresh_period
			);
			*scheduler = Some(RefreshScheduler::start(
				self.orchestrator.clone(),
				self.config.refresh_period,
			));
		}

		self.orchestrator.query_address().await;
		Ok(())
	}

	pub async fn snapshot(&self) -> Arc<AccountSnapshot> {
		self.orchestrator.snapshot().await
	}

	pub async fn address(&self) -> Option<String> {
		self.snapshot().await.address.clone()
	}

	pub async fn balance(&self) -> Option<Balance> {
		self.snapshot().await.balance
	}

	pub async fn transactions(&self) -> Vec<Transaction> {
		self.snapshot().await.transactions.clone()
	}

	pub async fn outputs(&self) -> Vec<Output> {
		self.snapshot().await.outputs.clone()
	}

	pub async fn is_initialized(&self) -> bool {
		self.orchestrator.is_ready().await
	}

	pub async fn sync_state(&self) -> SyncState {
		self.orchestrator.sync_state().await
	}

	/// Run a refresh cycle now, outside the timer. Serialized with timer-driven cycles.
	pub async fn refresh_now(&self) -> bool {
		self.orchestrator.refresh().await
	}

	pub async fn query_key(&self, key_type: KeyType) -> Result<String, AccountError> {
		Ok(self.orchestrator.rpc().query_key(key_type).await?)
	}

	/// Query payments, optionally filtered by payment id and minimum block height.
	pub async fn query_payments(
		&self,
		payment_ids: Option<&[String]>,
		minimum_block_height: Option<u64>,
	) -> Result<Vec<Payment>, AccountError> {
		Ok(self
			.orchestrator
			.rpc()
			.query_payments(payment_ids, minimum_block_height.unwrap_or(0))
			.await?)
	}

	pub async fn query_payments_by_id(
		&self,
		payment_ids: &[String],
	) -> Result<Vec<Payment>, AccountError> {
		self.query_payments(Some(payment_ids), None).await
	}

	pub async fn query_payments_since(
		&self,
		minimum_block_height: u64,
	) -> Result<Vec<Payment>, AccountError> {
		self.query_payments(None, Some(minimum_block_height)).await
	}

	/// Send a transfer and refresh the account before returning.
	///
	/// Fails without contacting the wallet if the request has no recipients or an invalid
	/// payment id.
	pub async fn send_transaction(
		&self,
		request: TransferRequest,
	) -> Result<Vec<String>, AccountError> {
		request.validate()?;

		if self.disposed.load(Ordering::SeqCst) {
			return Err(AccountError::Disposed);
		}

		let transaction_ids = self
			.orchestrator
			.rpc()
			.send_transfer_split(&request)
			.await?;

		info!(
			"Sent transfer to {} recipient(s): {:?}",
			request.recipients.len(),
			transaction_ids
		);

		self.orchestrator.refresh().await;
		Ok(transaction_ids)
	}

	/// Send to a single recipient with the default mix count.
	pub async fn send_to(
		&self,
		recipient: TransferRecipient,
		payment_id: Option<String>,
	) -> Result<Vec<String>, AccountError> {
		let mut request = TransferRequest::new(vec![recipient]);
		request.payment_id = payment_id;
		self.send_transaction(request).await
	}

	/// Save the wallet if the account became ready, then release the timer.
	pub async fn dispose_safely(&self) {
		self.shutdown(true).await;
	}

	/// Release the timer without saving.
	pub async fn dispose(&self) {
		self.shutdown(false).await;
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::SeqCst)
	}

	async fn shutdown(&self, save: bool) {
		if self.disposed.swap(true, Ordering::SeqCst) {
			return;
		}

		let was_ready = self.orchestrator.close().await;

		if save && was_ready {
			match self.orchestrator.rpc().request_save_account().await {
				Ok(()) => info!("Wallet saved"),
				Err(e) => warn!("Failed to save wallet before shutdown: {}", e),
			}
		}

		if let Some(mut scheduler) = self.scheduler.lock().await.take() {
			scheduler.stop().await;
		}

		info!("Account disposed");
	}
}
