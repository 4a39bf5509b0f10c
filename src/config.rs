//! Connection and polling settings for an account.

use crate::account::types::AccountError;

use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:18082/json_rpc";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
	/// JSON-RPC endpoint of the wallet, including the `/json_rpc` path.
	pub rpc_url: String,
	/// Timeout applied to every HTTP request.
	pub request_timeout: Duration,
	/// Wait between the end of one refresh cycle and the start of the next.
	pub refresh_period: Duration,
}

impl Default for AccountConfig {
	fn default() -> Self {
		Self {
			rpc_url: DEFAULT_RPC_URL.to_string(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			refresh_period: DEFAULT_REFRESH_PERIOD,
		}
	}
}

impl AccountConfig {
	pub fn new(rpc_url: impl Into<String>) -> Self {
		Self::default().with_rpc_url(rpc_url)
	}

	pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
		self.rpc_url = rpc_url.into();
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn with_refresh_period(mut self, period: Duration) -> Self {
		self.refresh_period = period;
		self
	}

	pub fn validate(&self) -> Result<(), AccountError> {
		if self.rpc_url.trim().is_empty() {
			return Err(AccountError::Config("RPC URL is empty".to_string()));
		}

		if self.refresh_period.is_zero() {
			return Err(AccountError::Config(
				"refresh period must be greater than zero".to_string(),
			));
		}

		Ok(())
	}
}
