//! Wire types for the wallet JSON-RPC interface

use crate::account::types::{Balance, Output, Payment, TransferRecipient, TransferRequest};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a, P> {
	pub jsonrpc: &'static str,
	pub id: &'static str,
	pub method: &'a str,
	pub params: P,
}

impl<'a, P: Serialize> JsonRpcRequest<'a, P> {
	pub fn new(method: &'a str, params: P) -> Self {
		Self {
			jsonrpc: "2.0",
			id: "0",
			method,
			params,
		}
	}
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result` or `error` is expected.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
	pub result: Option<T>,
	pub error: Option<JsonRpcErrorBody>,
}

impl<T> JsonRpcResponse<T> {
	/// Turns the envelope into the typed result, treating an error payload as a service error.
	pub fn into_result(self) -> Result<T, RpcError> {
		if let Some(error) = self.error {
			return Err(RpcError::Service {
				code: error.code,
				message: error.message,
			});
		}

		self.result.ok_or(RpcError::NoData)
	}
}

impl<T: DeserializeOwned> JsonRpcResponse<T> {
	/// Decodes a raw response body straight into the typed result.
	pub fn decode(body: &[u8]) -> Result<T, RpcError> {
		let envelope: Self = serde_json::from_slice(body)?;
		envelope.into_result()
	}
}

/// Structured error payload returned by the wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorBody {
	pub code: i64,
	#[serde(default)]
	pub message: String,
}

/// Parameters for calls that take none.
#[derive(Debug, Serialize)]
pub struct EmptyParams {}

#[derive(Debug, Deserialize)]
pub struct AddressResult {
	pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct BalanceResult {
	pub balance: u64,
	pub unlocked_balance: u64,
}

impl From<BalanceResult> for Balance {
	fn from(result: BalanceResult) -> Self {
		Balance::new(result.balance, result.unlocked_balance)
	}
}

#[derive(Debug, Serialize)]
pub struct IncomingTransfersParams {
	pub transfer_type: &'static str,
}

/// The wallet omits `transfers` entirely when there are none.
#[derive(Debug, Deserialize)]
pub struct IncomingTransfersResult {
	#[serde(default)]
	pub transfers: Vec<IncomingTransfer>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingTransfer {
	pub amount: u64,
	pub spent: bool,
	pub tx_hash: String,
	#[serde(default)]
	pub global_index: u64,
}

impl From<IncomingTransfer> for Output {
	fn from(transfer: IncomingTransfer) -> Self {
		// Older wallets wrap the hash in angle brackets.
		let transaction_id = transfer
			.tx_hash
			.trim_matches(|c| c == '<' || c == '>')
			.to_string();

		Output {
			transaction_id,
			amount: transfer.amount,
			is_spendable: !transfer.spent,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct QueryKeyParams {
	pub key_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct QueryKeyResult {
	pub key: String,
}

#[derive(Debug, Serialize)]
pub struct BulkPaymentsParams {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_ids: Option<Vec<String>>,
	pub min_block_height: u64,
}

#[derive(Debug, Deserialize)]
pub struct BulkPaymentsResult {
	#[serde(default)]
	pub payments: Vec<PaymentEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEntry {
	pub payment_id: String,
	pub tx_hash: String,
	pub amount: u64,
	pub block_height: u64,
	#[serde(default)]
	pub unlock_time: u64,
}

impl From<PaymentEntry> for Payment {
	fn from(entry: PaymentEntry) -> Self {
		Payment {
			payment_id: entry.payment_id,
			transaction_id: entry.tx_hash,
			amount: entry.amount,
			block_height: entry.block_height,
			unlock_time: entry.unlock_time,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct Destination {
	pub amount: u64,
	pub address: String,
}

impl From<&TransferRecipient> for Destination {
	fn from(recipient: &TransferRecipient) -> Self {
		Destination {
			amount: recipient.amount,
			address: recipient.address.clone(),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct TransferSplitParams {
	pub destinations: Vec<Destination>,
	pub mixin: u64,
	pub unlock_time: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_id: Option<String>,
}

impl From<&TransferRequest> for TransferSplitParams {
	fn from(request: &TransferRequest) -> Self {
		TransferSplitParams {
			destinations: request.recipients.iter().map(Destination::from).collect(),
			mixin: request.mix_count,
			unlock_time: 0,
			payment_id: request.payment_id.clone(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct TransferSplitResult {
	#[serde(default)]
	pub tx_hash_list: Vec<String>,
}

/// Error types for wallet RPC calls
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Transport error: {0}")]
	Transport(String),

	#[error("Wallet returned error {code}: {message}")]
	Service { code: i64, message: String },

	#[error("No result returned")]
	NoData,
}
