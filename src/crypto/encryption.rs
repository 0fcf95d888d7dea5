//! Byte-level vault ciphers.
//!
//! Both ciphers take a 16-byte nonce that the caller stores next to
//! the ciphertext.  Layout of the bytes returned by `seal`:
//!
//! - `Sha256Keystream`: `plaintext XOR keystream` (same length as input,
//!   no integrity tag).
//! - `Aes256Gcm`: `ciphertext || 16-byte auth tag`.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{PassVaultError, Result};

/// Size of the per-encryption nonce in bytes.
pub const NONCE_LEN: usize = 16;

/// AES-256-GCM with a 16-byte nonce, so the nonce fills the same slot
/// in the vault envelope as the keystream nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Which cipher seals the vault body.
///
/// The vault file carries no version byte, so this is a per-installation
/// choice and must match the cipher the file was written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CipherKind {
    /// Authenticated AES-256-GCM.
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// SHA-256 counter keystream XOR.  Reads and writes the unauthenticated
    /// format of older vault files; provides no integrity.
    Sha256Keystream,
}

impl CipherKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::Sha256Keystream => "sha256-keystream",
        }
    }
}

/// Generate a fresh random nonce.  Called once per encryption.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}

/// Produce `len` keystream bytes from `(key, nonce)`.
///
/// Block `i` is `SHA-256(key || nonce || i as u32 big-endian)`; blocks are
/// concatenated and the result truncated to `len`.
pub fn keystream(key: &[u8], nonce: &[u8], len: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(len + 32);
    let mut counter: u32 = 0;
    while stream.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(key);
        hasher.update(nonce);
        hasher.update(counter.to_be_bytes());
        stream.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }
    stream.truncate(len);
    stream
}

fn xor_with_keystream(key: &[u8], nonce: &[u8], data: &[u8]) -> Vec<u8> {
    let stream = keystream(key, nonce, data.len());
    data.iter().zip(stream.iter()).map(|(a, b)| a ^ b).collect()
}

/// Encrypt `plaintext` under `key` and `nonce`.
pub fn seal(kind: CipherKind, key: &[u8], nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    match kind {
        CipherKind::Sha256Keystream => Ok(xor_with_keystream(key, nonce, plaintext)),
        CipherKind::Aes256Gcm => {
            let cipher = Aes256Gcm16::new_from_slice(key).map_err(|_| {
                PassVaultError::EncryptionFailed(format!(
                    "AES-256-GCM needs a 32-byte key (got {})",
                    key.len()
                ))
            })?;
            cipher
                .encrypt(Nonce::<U16>::from_slice(nonce), plaintext)
                .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))
        }
    }
}

/// Decrypt bytes produced by `seal`.
///
/// The keystream cipher cannot fail here; a wrong key just yields
/// garbage that the caller has to reject.  AES-GCM fails with
/// `AuthenticationFailed` when the tag does not verify.
pub fn open(kind: CipherKind, key: &[u8], nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match kind {
        CipherKind::Sha256Keystream => Ok(xor_with_keystream(key, nonce, ciphertext)),
        CipherKind::Aes256Gcm => {
            let cipher =
                Aes256Gcm16::new_from_slice(key).map_err(|_| PassVaultError::AuthenticationFailed)?;
            cipher
                .decrypt(Nonce::<U16>::from_slice(nonce), ciphertext)
                .map_err(|_| PassVaultError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystream_is_deterministic_and_truncated() {
        let key = [0x11u8; 32];
        let nonce = [0x22u8; NONCE_LEN];

        let a = keystream(&key, &nonce, 70);
        let b = keystream(&key, &nonce, 70);
        assert_eq!(a.len(), 70);
        assert_eq!(a, b);

        // A shorter request is a prefix of a longer one.
        assert_eq!(keystream(&key, &nonce, 10), a[..10]);
        assert!(keystream(&key, &nonce, 0).is_empty());
    }

    #[test]
    fn keystream_first_block_is_hash_of_key_nonce_counter() {
        let key = [0x01u8; 32];
        let nonce = [0x02u8; NONCE_LEN];

        let mut input = Vec::new();
        input.extend_from_slice(&key);
        input.extend_from_slice(&nonce);
        input.extend_from_slice(&0u32.to_be_bytes());
        let expected = Sha256::digest(&input);

        assert_eq!(keystream(&key, &nonce, 32), expected.as_slice());
    }

    #[test]
    fn keystream_depends_on_nonce() {
        let key = [0x11u8; 32];
        assert_ne!(
            keystream(&key, &[0u8; NONCE_LEN], 32),
            keystream(&key, &[1u8; NONCE_LEN], 32)
        );
    }

    #[test]
    fn keystream_roundtrip() {
        let key = [0x33u8; 32];
        let nonce = generate_nonce();
        let plaintext = b"{\"entries\":[]}";

        let sealed = seal(CipherKind::Sha256Keystream, &key, &nonce, plaintext).unwrap();
        assert_eq!(sealed.len(), plaintext.len());
        assert_ne!(sealed.as_slice(), plaintext);

        let opened = open(CipherKind::Sha256Keystream, &key, &nonce, &sealed).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn aes_gcm_roundtrip_appends_tag() {
        let key = [0x44u8; 32];
        let nonce = generate_nonce();
        let plaintext = b"credential payload";

        let sealed = seal(CipherKind::Aes256Gcm, &key, &nonce, plaintext).unwrap();
        assert_eq!(sealed.len(), plaintext.len() + 16);

        let opened = open(CipherKind::Aes256Gcm, &key, &nonce, &sealed).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn aes_gcm_detects_tampering() {
        let key = [0x55u8; 32];
        let nonce = generate_nonce();
        let mut sealed = seal(CipherKind::Aes256Gcm, &key, &nonce, b"data").unwrap();
        sealed[0] ^= 0x01;

        let result = open(CipherKind::Aes256Gcm, &key, &nonce, &sealed);
        assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
    }

    #[test]
    fn aes_gcm_rejects_wrong_key() {
        let nonce = generate_nonce();
        let sealed = seal(CipherKind::Aes256Gcm, &[1u8; 32], &nonce, b"data").unwrap();
        let result = open(CipherKind::Aes256Gcm, &[2u8; 32], &nonce, &sealed);
        assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
    }

    #[test]
    fn aes_gcm_requires_32_byte_key() {
        let nonce = generate_nonce();
        let result = seal(CipherKind::Aes256Gcm, &[1u8; 16], &nonce, b"data");
        assert!(matches!(result, Err(PassVaultError::EncryptionFailed(_))));
    }

    #[test]
    fn nonces_are_fresh() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn cipher_names_match_serde() {
        for kind in [CipherKind::Aes256Gcm, CipherKind::Sha256Keystream] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(serde_json::from_str::<CipherKind>(&json).unwrap(), kind);
        }
        assert!(serde_json::from_str::<CipherKind>("\"rot13\"").is_err());
        assert_eq!(CipherKind::default().as_str(), "aes-256-gcm");
    }
}
