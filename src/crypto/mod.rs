//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2 password-based key derivation (`kdf`)
//! - The SHA-256 keystream and AES-256-GCM vault ciphers (`encryption`)
//! - The zeroizing `VaultKey` holder (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, seal, open, ...};
pub use encryption::{generate_nonce, keystream, open, seal, CipherKind, NONCE_LEN};
pub use kdf::{derive_key, generate_salt, HashAlgorithm, KdfParams, SALT_LEN};
pub use keys::VaultKey;

/// Everything needed to turn a password into an open vault.
///
/// Not stored in the vault file; see `KdfParams`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CryptoParams {
    pub kdf: KdfParams,
    pub cipher: CipherKind,
}
