pub mod accounts;
#[cfg(feature = "audit-log")]
pub mod audit;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod health;
pub mod password;
pub mod sync;
pub mod vault;
