//! File-backed user accounts.
//!
//! Independent of vault encryption: each user gets a PBKDF2-SHA256 hash
//! of their login password with a private salt, stored in a JSON table:
//!
//! ```json
//! { "alice": { "salt": "<hex>", "pwd_hash": "<hex>", "iterations": 200000, "key_length": 32 } }
//! ```
//!
//! `iterations` and `key_length` default to 200 000 and 32 when a row
//! leaves them out.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::crypto::{self, HashAlgorithm, KdfParams};
use crate::errors::{PassVaultError, Result};
use crate::vault::format::write_blob;

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub salt: Vec<u8>,

    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub pwd_hash: Vec<u8>,

    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

impl UserRecord {
    fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.iterations,
            key_length: self.key_length,
            algorithm: HashAlgorithm::Sha256,
        }
    }
}

/// Handle on a user table file.
#[derive(Debug, Clone)]
pub struct UserTable {
    path: PathBuf,
    kdf: KdfParams,
}

impl UserTable {
    /// `kdf` is used for new accounts; existing rows keep their own
    /// iteration count and length.
    pub fn new(path: impl Into<PathBuf>, kdf: KdfParams) -> Self {
        Self {
            path: path.into(),
            kdf: KdfParams {
                algorithm: HashAlgorithm::Sha256,
                ..kdf
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table.  A missing or unreadable JSON file is treated as
    /// an empty table so a fresh install can register its first user.
    pub fn load(&self) -> Result<BTreeMap<String, UserRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(table) => Ok(table),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "user table is not valid JSON, treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn store(&self, table: &BTreeMap<String, UserRecord>) -> Result<()> {
        let json = serde_json::to_vec_pretty(table)
            .map_err(|e| PassVaultError::SerializationError(format!("user table: {e}")))?;
        write_blob(&self.path, &json)
    }

    /// `true` if `username` has an account.
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(username))
    }

    /// Register a new user.  Fails with `AccountExists` if the name is taken.
    pub fn create_user(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(PassVaultError::AccountError("username cannot be empty".into()));
        }

        let mut table = self.load()?;
        if table.contains_key(username) {
            return Err(PassVaultError::AccountExists(username.to_string()));
        }

        let salt = crypto::generate_salt();
        let hash = crypto::derive_key(password.as_bytes(), &salt, &self.kdf)?;
        table.insert(
            username.to_string(),
            UserRecord {
                salt: salt.to_vec(),
                pwd_hash: hash.as_bytes().to_vec(),
                iterations: self.kdf.iterations,
                key_length: self.kdf.key_length,
            },
        );

        self.store(&table)
    }

    /// Check a login.  Unknown users simply fail; the hash comparison is
    /// constant-time.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let table = self.load()?;
        let Some(record) = table.get(username) else {
            return Ok(false);
        };

        let candidate = crypto::derive_key(password.as_bytes(), &record.salt, &record.kdf_params())?;
        Ok(candidate == crypto::VaultKey::new(record.pwd_hash.clone()))
    }
}

fn default_iterations() -> u32 {
    crypto::kdf::DEFAULT_ITERATIONS
}

fn default_key_length() -> usize {
    crypto::kdf::DEFAULT_KEY_LEN
}

// ---------------------------------------------------------------------------
// Serde helpers for hex-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn hex_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(data))
}

fn hex_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}
