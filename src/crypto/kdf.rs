//! Password-based key derivation using PBKDF2-HMAC.
//!
//! The derived key is a pure function of (password, salt, iterations,
//! key length, hash algorithm).  None of those parameters except the
//! salt are stored in the vault file, so every vault opened by one
//! installation must use the same `KdfParams`.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};

use super::keys::VaultKey;
use crate::errors::{PassVaultError, Result};

/// Length of the per-vault salt in bytes.
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 200_000;

/// Default derived key length in bytes (256 bits, for AES-256).
pub const DEFAULT_KEY_LEN: usize = 32;

const MIN_KEY_LEN: usize = 16;
const MAX_KEY_LEN: usize = 64;

/// Hash function used inside PBKDF2-HMAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

/// Explicit key-derivation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 rounds (default: 200 000).
    pub iterations: u32,
    /// Output length in bytes (default: 32).
    pub key_length: usize,
    /// HMAC hash function (default: SHA-256).
    pub algorithm: HashAlgorithm,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LEN,
            algorithm: HashAlgorithm::Sha256,
        }
    }
}

impl KdfParams {
    /// Reject parameter sets that cannot produce a usable key.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(PassVaultError::KeyDerivationFailed(
                "PBKDF2 iterations must be at least 1".into(),
            ));
        }
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&self.key_length) {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "key length must be between {MIN_KEY_LEN} and {MAX_KEY_LEN} bytes (got {})",
                self.key_length
            )));
        }
        Ok(())
    }
}

/// Derive a vault key from a password and salt.
///
/// Deterministic: the same inputs always produce the same key.  A salt
/// that does not belong to the target blob is not detected here; it
/// only shows up later when decryption fails.
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<VaultKey> {
    params.validate()?;

    let mut bytes = vec![0u8; params.key_length];
    match params.algorithm {
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut bytes),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, params.iterations, &mut bytes),
    }

    Ok(VaultKey::new(bytes))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
