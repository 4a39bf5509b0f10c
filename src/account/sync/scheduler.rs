//! Periodic refresh timer.
//!
//! The timer runs as a tokio task: it runs a cycle immediately, then waits one refresh
//! period after each cycle completes before starting the next. Waiting only begins once
//! a cycle is done, so the timer never starts a cycle while another is running.

use crate::account::sync::orchestrator::AccountSyncOrchestrator;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct RefreshScheduler {
	shutdown: watch::Sender<bool>,
	handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
	/// Spawn the timer task. Must be called from within a tokio runtime.
	pub fn start(orchestrator: Arc<AccountSyncOrchestrator>, period: Duration) -> Self {
		let (shutdown, mut shutdown_rx) = watch::channel(false);

		let handle = tokio::spawn(async move {
			debug!("Refresh timer started with period {:?}", period);

			loop {
				if *shutdown_rx.borrow() {
					break;
				}

				orchestrator.refresh().await;

				tokio::select! {
					_ = tokio::time::sleep(period) => {}
					_ = shutdown_rx.changed() => break,
				}
			}

			debug!("Refresh timer stopped");
		});

		Self {
			shutdown,
			handle: Some(handle),
		}
	}

	pub fn is_running(&self) -> bool {
		self.handle
			.as_ref()
			.map(|handle| !handle.is_finished())
			.unwrap_or(false)
	}

	/// Stop the timer and wait for the task to exit, letting a cycle in flight finish.
	///
	/// Safe to call more than once.
	pub async fn stop(&mut self) {
		let _ = self.shutdown.send(true);

		if let Some(handle) = self.handle.take() {
			if let Err(e) = handle.await {
				if !e.is_cancelled() {
					warn!("Refresh timer task failed: {}", e);
				}
			}
		}
	}
}

impl Drop for RefreshScheduler {
	fn drop(&mut self) {
		let _ = self.shutdown.send(true);
		if let Some(handle) = self.handle.take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::account::types::Balance;
	use crate::rpc::mock::MockAccountRpc;

	#[tokio::test(start_paused = true)]
	async fn runs_until_stopped() {
		let mock = Arc::new(MockAccountRpc::healthy(
			"4address",
			Balance::new(1, 1),
			Vec::new(),
		));
		let orchestrator = Arc::new(AccountSyncOrchestrator::new(mock.clone()));

		let mut scheduler = RefreshScheduler::start(orchestrator, Duration::from_secs(5));
		tokio::time::sleep(Duration::from_secs(6)).await;

		assert!(scheduler.is_running());
		assert_eq!(mock.call_count("getbalance"), 2);

		scheduler.stop().await;
		scheduler.stop().await;

		assert!(!scheduler.is_running());
		tokio::time::sleep(Duration::from_secs(60)).await;
		assert_eq!(mock.call_count("getbalance"), 2);
	}
}
