pub mod manager;
pub mod sync;
pub mod types;

pub use manager::AccountManager;
pub use types::*;
