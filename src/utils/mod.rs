//!
//! Utility module for the account synchroniser.
//!
//! Formatting helpers shared by the event log and the command line.
/// Formatting of atomic amounts
pub mod amount;

pub use amount::{MONERO_DECIMALS, format_xmr_amount, parse_xmr_amount};
