//! Scripted in-memory wallet for tests.
//!
//! Each query answers from the current `MockState`; a `None` field makes the query fail.
//! Every call is recorded by method name.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::api::AccountRpc;
use super::types::RpcError;
use crate::account::types::{Balance, KeyType, Output, Payment, TransferRequest};

#[derive(Debug, Default)]
pub struct MockState {
	pub address: Option<String>,
	pub balance: Option<Balance>,
	pub outputs: Option<Vec<Output>>,
	pub keys: HashMap<&'static str, String>,
	pub payments: Option<Vec<Payment>>,
	pub send_result: Option<Vec<String>>,
	pub save_fails: bool,
	/// Artificial latency of the outputs query.
	pub outputs_delay: Option<Duration>,

	pub calls: Vec<&'static str>,
	pub sent: Vec<TransferRequest>,
	pub payment_queries: Vec<(Option<Vec<String>>, u64)>,
	in_flight: usize,
	pub max_in_flight: usize,
}

#[derive(Debug, Default)]
pub struct MockAccountRpc {
	state: Mutex<MockState>,
}

impl MockAccountRpc {
	pub fn new() -> Self {
		Self::default()
	}

	/// A wallet that answers every refresh query successfully.
	pub fn healthy(address: &str, balance: Balance, outputs: Vec<Output>) -> Self {
		let mock = Self::new();
		mock.update(|s| {
			s.address = Some(address.to_string());
			s.balance = Some(balance);
			s.outputs = Some(outputs);
		});
		mock
	}

	pub fn update(&self, f: impl FnOnce(&mut MockState)) {
		f(&mut self.state.lock().unwrap());
	}

	pub fn read<T>(&self, f: impl FnOnce(&MockState) -> T) -> T {
		f(&self.state.lock().unwrap())
	}

	pub fn calls(&self) -> Vec<&'static str> {
		self.read(|s| s.calls.clone())
	}

	pub fn call_count(&self, method: &str) -> usize {
		self.read(|s| s.calls.iter().filter(|c| **c == method).count())
	}

	fn record(&self, method: &'static str) {
		self.update(|s| s.calls.push(method));
	}
}

fn unavailable(method: &str) -> RpcError {
	RpcError::Service {
		code: -1,
		message: format!("{} unavailable", method),
	}
}

#[async_trait::async_trait]
impl AccountRpc for MockAccountRpc {
	async fn query_address(&self) -> Result<String, RpcError> {
		self.record("getaddress");
		self.read(|s| s.address.clone())
			.ok_or_else(|| unavailable("getaddress"))
	}

	async fn query_balance(&self) -> Result<Balance, RpcError> {
		self.record("getbalance");
		self.read(|s| s.balance)
			.ok_or_else(|| RpcError::Transport("connection refused".to_string()))
	}

	async fn query_incoming_transfers(&self) -> Result<Vec<Output>, RpcError> {
		self.record("incoming_transfers");

		let delay = self.read(|s| s.outputs_delay);
		if let Some(delay) = delay {
			self.update(|s| {
				s.in_flight += 1;
				s.max_in_flight = s.max_in_flight.max(s.in_flight);
			});
			tokio::time::sleep(delay).await;
			self.update(|s| s.in_flight -= 1);
		}

		self.read(|s| s.outputs.clone())
			.ok_or_else(|| unavailable("incoming_transfers"))
	}

	async fn query_key(&self, key_type: KeyType) -> Result<String, RpcError> {
		self.record("query_key");
		self.read(|s| s.keys.get(key_type.as_str()).cloned())
			.ok_or_else(|| unavailable("query_key"))
	}

	async fn query_payments(
		&self,
		payment_ids: Option<&[String]>,
		minimum_block_height: u64,
	) -> Result<Vec<Payment>, RpcError> {
		self.record("get_bulk_payments");
		self.update(|s| {
			s.payment_queries
				.push((payment_ids.map(<[String]>::to_vec), minimum_block_height))
		});
		self.read(|s| s.payments.clone())
			.ok_or_else(|| unavailable("get_bulk_payments"))
	}

	async fn send_transfer_split(
		&self,
		request: &TransferRequest,
	) -> Result<Vec<String>, RpcError> {
		self.record("transfer_split");
		self.update(|s| s.sent.push(request.clone()));
		self.read(|s| s.send_result.clone())
			.ok_or_else(|| unavailable("transfer_split"))
	}

	async fn request_save_account(&self) -> Result<(), RpcError> {
		self.record("store");
		if self.read(|s| s.save_fails) {
			return Err(unavailable("store"));
		}
		Ok(())
	}
}
