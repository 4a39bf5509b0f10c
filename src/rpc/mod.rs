//! Wallet RPC integration
//!
//! The account core depends only on the `AccountRpc` trait. `WalletRpcClient` is the
//! production implementation speaking JSON-RPC over HTTP to a Monero wallet RPC server.

/// The query port trait
pub mod api;
/// HTTP JSON-RPC client
mod client;
/// Request/response wire types
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use api::AccountRpc;
pub use client::WalletRpcClient;
pub use types::*;
