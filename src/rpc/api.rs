use crate::account::types::{Balance, KeyType, Output, Payment, TransferRequest};
use crate::rpc::RpcError;

/// Query port the account core talks to.
///
/// Each call is a single request/response round trip. Implementations own transport
/// concerns (HTTP, authentication, retries); the core only sees typed results.
#[async_trait::async_trait]
pub trait AccountRpc: Send + Sync {
	/// Primary address of the open wallet.
	async fn query_address(&self) -> Result<String, RpcError>;

	/// Total and unlocked balance.
	async fn query_balance(&self) -> Result<Balance, RpcError>;

	/// Every output of the account, spent or not, with outputs of one transaction adjacent.
	async fn query_incoming_transfers(&self) -> Result<Vec<Output>, RpcError>;

	async fn query_key(&self, key_type: KeyType) -> Result<String, RpcError>;

	/// Payments filtered by id (all ids when `None`) at or above `minimum_block_height`.
	async fn query_payments(
		&self,
		payment_ids: Option<&[String]>,
		minimum_block_height: u64,
	) -> Result<Vec<Payment>, RpcError>;

	/// Builds, signs and relays a transfer, returning the resulting transaction ids.
	async fn send_transfer_split(
		&self,
		request: &TransferRequest,
	) -> Result<Vec<String>, RpcError>;

	/// Asks the wallet to persist its state.
	async fn request_save_account(&self) -> Result<(), RpcError>;
}
