//!
//! JSON-RPC client for a Monero wallet RPC server.
//!
//! Every call is a POST of a JSON-RPC 2.0 envelope to the configured `/json_rpc` endpoint.
//! Transport failures, undecodable bodies and error payloads all surface as `RpcError`;
//! nothing is retried here.

use super::api::AccountRpc;
use super::types::*;
use crate::account::types::{Balance, KeyType, Output, Payment, TransferRequest};
use crate::config::AccountConfig;

use reqwest::Client;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;

/// Wallet RPC client
#[derive(Clone)]
pub struct WalletRpcClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// Full URL of the JSON-RPC endpoint.
	rpc_url: String,
}

impl WalletRpcClient {
	/// Create a new client from the account configuration.
	///
	/// # Errors
	/// Returns `RpcError::Http` if the HTTP client cannot be built.
	pub fn new(config: &AccountConfig) -> Result<Self, RpcError> {
		let http_client = Client::builder()
			.timeout(config.request_timeout)
			.build()?;

		Ok(Self {
			http_client,
			rpc_url: config.rpc_url.clone(),
		})
	}

	pub fn rpc_url(&self) -> &str {
		&self.rpc_url
	}

	/// Execute a JSON-RPC method and decode its `result`.
	///
	/// # Arguments
	/// * `method` - The wallet method name.
	/// * `params` - Method parameters, serialized as the `params` object.
	pub async fn call<P, T>(&self, method: &str, params: P) -> Result<T, RpcError>
	where
		P: Serialize + Send,
		T: DeserializeOwned + Send,
	{
		let request_body = JsonRpcRequest::new(method, params);
		debug!("Calling wallet method {}", method);

		let response = self
			.http_client
			.post(&self.rpc_url)
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(RpcError::Transport(format!(
				"HTTP status {} from {}",
				response.status(),
				method
			)));
		}

		let body = response.bytes().await?;
		JsonRpcResponse::<T>::decode(&body)
	}
}

#[async_trait::async_trait]
impl AccountRpc for WalletRpcClient {
	async fn query_address(&self) -> Result<String, RpcError> {
		let result: AddressResult = self.call("getaddress", EmptyParams {}).await?;
		Ok(result.address)
	}

	async fn query_balance(&self) -> Result<Balance, RpcError> {
		let result: BalanceResult = self.call("getbalance", EmptyParams {}).await?;
		Ok(result.into())
	}

	async fn query_incoming_transfers(&self) -> Result<Vec<Output>, RpcError> {
		let params = IncomingTransfersParams {
			transfer_type: "all",
		};
		let result: IncomingTransfersResult = self.call("incoming_transfers", params).await?;
		Ok(result.transfers.into_iter().map(Output::from).collect())
	}

	async fn query_key(&self, key_type: KeyType) -> Result<String, RpcError> {
		let params = QueryKeyParams {
			key_type: key_type.as_str(),
		};
		let result: QueryKeyResult = self.call("query_key", params).await?;
		Ok(result.key)
	}

	async fn query_payments(
		&self,
		payment_ids: Option<&[String]>,
		minimum_block_height: u64,
	) -> Result<Vec<Payment>, RpcError> {
		let params = BulkPaymentsParams {
			payment_ids: payment_ids.map(<[String]>::to_vec),
			min_block_height: minimum_block_height,
		};
		let result: BulkPaymentsResult = self.call("get_bulk_payments", params).await?;
		Ok(result.payments.into_iter().map(Payment::from).collect())
	}

	async fn send_transfer_split(
		&self,
		request: &TransferRequest,
	) -> Result<Vec<String>, RpcError> {
		let params = TransferSplitParams::from(request);
		let result: TransferSplitResult = self.call("transfer_split", params).await?;
		Ok(result.tx_hash_list)
	}

	async fn request_save_account(&self) -> Result<(), RpcError> {
		let _: IgnoredAny = self.call("store", EmptyParams {}).await?;
		Ok(())
	}
}
