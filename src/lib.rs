//! Polling synchroniser for a single Monero wallet account.
//!
//! An [`AccountManager`] periodically queries a wallet JSON-RPC server for the account's
//! balance and outputs, reconciles the outputs into a stable list of transactions and
//! notifies subscribers of what changed.

pub mod account;
pub mod config;
pub mod logging;
pub mod rpc;
pub mod utils;

pub use account::sync::{AccountEvent, AccountEventHandler, AccountSnapshot, SyncState};
pub use account::{AccountError, AccountManager};
pub use config::AccountConfig;
pub use rpc::{AccountRpc, RpcError, WalletRpcClient};
