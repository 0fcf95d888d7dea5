//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Entry` and `VaultDocument` types (`entry`)
//! - The `salt || nonce || ciphertext` envelope and document encryption (`format`)
//! - `load_or_create`, `save` and the `VaultSession` handle (`store`)

pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, VaultDocument};
pub use format::{decrypt, encrypt};
pub use store::{load_or_create, save, VaultSession};
