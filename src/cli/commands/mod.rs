//! One module per subcommand, each exposing an `execute` function.

pub mod account;
pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod download;
pub mod edit;
pub mod generate;
pub mod health;
pub mod init;
pub mod list;
pub mod show;
pub mod strength;
pub mod sync;
pub mod upload;
