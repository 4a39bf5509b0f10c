use crate::rpc::RpcError;

use serde::{Deserialize, Serialize};

/// Mix count used by `send_transaction` when the caller does not pick one.
pub const DEFAULT_TRANSACTION_MIX_COUNT: u64 = 3;

/// One output belonging to the account, as reported by the wallet.
///
/// Outputs of the same transaction are expected to be adjacent in a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
	/// Identifier of the transaction that created this output.
	pub transaction_id: String,
	/// Amount in atomic units.
	pub amount: u64,
	/// Whether the output can still be spent by the account.
	pub is_spendable: bool,
}

/// A transaction derived by aggregating every output that shares one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	pub transaction_id: String,
	/// Zero-based position in discovery order.
	pub index: usize,
	pub amount_spendable: u64,
	pub amount_unspendable: u64,
}

impl Transaction {
	pub fn new(transaction_id: impl Into<String>, index: usize) -> Self {
		Self {
			transaction_id: transaction_id.into(),
			index,
			amount_spendable: 0,
			amount_unspendable: 0,
		}
	}

	/// Total of spendable and unspendable amounts.
	pub fn amount_total(&self) -> u64 {
		self.amount_spendable.saturating_add(self.amount_unspendable)
	}
}

/// Balance snapshot reported by the wallet. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
	pub total: u64,
	pub unlocked: u64,
}

impl Balance {
	pub fn new(total: u64, unlocked: u64) -> Self {
		Self { total, unlocked }
	}

	/// Amount still waiting to unlock.
	pub fn locked(&self) -> u64 {
		self.total.saturating_sub(self.unlocked)
	}
}

/// Incoming payment matched by payment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
	pub payment_id: String,
	pub transaction_id: String,
	pub amount: u64,
	pub block_height: u64,
	pub unlock_time: u64,
}

/// Which key `query_key` should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
	Mnemonic,
	ViewKey,
	SpendKey,
}

impl KeyType {
	/// Name of the key type on the wire.
	pub fn as_str(&self) -> &'static str {
		match self {
			KeyType::Mnemonic => "mnemonic",
			KeyType::ViewKey => "view_key",
			KeyType::SpendKey => "spend_key",
		}
	}
}

/// One destination of an outgoing transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecipient {
	pub address: String,
	pub amount: u64,
}

impl TransferRecipient {
	pub fn new(address: impl Into<String>, amount: u64) -> Self {
		Self {
			address: address.into(),
			amount,
		}
	}
}

/// Everything the wallet needs to build and relay a split transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
	pub recipients: Vec<TransferRecipient>,
	pub payment_id: Option<String>,
	pub mix_count: u64,
}

impl TransferRequest {
	pub fn new(recipients: Vec<TransferRecipient>) -> Self {
		Self {
			recipients,
			payment_id: None,
			mix_count: DEFAULT_TRANSACTION_MIX_COUNT,
		}
	}

	pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
		self.payment_id = Some(payment_id.into());
		self
	}

	pub fn with_mix_count(mut self, mix_count: u64) -> Self {
		self.mix_count = mix_count;
		self
	}

	/// Checks the request before it is sent to the wallet.
	pub fn validate(&self) -> Result<(), AccountError> {
		if self.recipients.is_empty() {
			return Err(AccountError::NoRecipients);
		}

		if let Some(payment_id) = &self.payment_id {
			validate_payment_id(payment_id)?;
		}

		Ok(())
	}
}

/// Payment identifiers are 8 or 32 bytes, hex encoded.
pub fn validate_payment_id(payment_id: &str) -> Result<(), AccountError> {
	let bytes = hex::decode(payment_id)
		.map_err(|e| AccountError::InvalidPaymentId(format!("{}: {}", payment_id, e)))?;

	match bytes.len() {
		8 | 32 => Ok(()),
		n => Err(AccountError::InvalidPaymentId(format!(
			"{}: expected 8 or 32 bytes, got {}",
			payment_id, n
		))),
	}
}

/// Errors surfaced by the account facade
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
	#[error("RPC error: {0}")]
	Rpc(#[from] RpcError),

	#[error("Transfer has no recipients")]
	NoRecipients,

	#[error("Invalid payment id: {0}")]
	InvalidPaymentId(String),

	#[error("Account has been disposed")]
	Disposed,

	#[error("Event handler error: {0}")]
	Handler(String),

	#[error("Configuration error: {0}")]
	Config(String),
}
