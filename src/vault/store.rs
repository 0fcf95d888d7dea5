//! Vault persistence: load-or-create, save, and the session handle.
//!
//! `load_or_create` and `save` are the low-level contract.  `VaultSession`
//! wraps them with the state a caller needs for one unlocked vault (path,
//! document, key, cached salt) so nothing has to live in globals.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::entry::{Entry, VaultDocument};
use super::format;
use crate::crypto::{self, CipherKind, CryptoParams, VaultKey, SALT_LEN};
use crate::errors::{PassVaultError, Result};

/// Open the vault at `path`, creating an empty one if it does not exist.
///
/// A new vault gets a fresh salt and is written to disk immediately.  An
/// existing vault is read in full and decrypted; `InvalidVaultFormat` and
/// `AuthenticationFailed` propagate unchanged.
pub fn load_or_create(
    path: &Path,
    password: &[u8],
    params: &CryptoParams,
) -> Result<(VaultDocument, VaultKey)> {
    if !path.exists() {
        info!(path = %path.display(), "creating new vault");
        let document = VaultDocument::new();
        let salt = crypto::generate_salt();
        let key = crypto::derive_key(password, &salt, &params.kdf)?;
        let blob = format::encrypt(&document, &key, Some(&salt), params.cipher)?;
        format::write_blob(path, &blob)?;
        return Ok((document, key));
    }

    debug!(path = %path.display(), "opening existing vault");
    let blob = fs::read(path)?;
    format::decrypt(&blob, password, params)
}

/// Re-encrypt `document` and overwrite `path`.
///
/// When `salt` is `None` the salt prefix of the existing file is reused so
/// that `key` stays valid for the new blob.  If there is no usable salt
/// on disk a fresh one is generated, and `key` will no longer match it;
/// callers should always pass the key returned by `load_or_create`.
///
/// Reading the old salt and writing the new file are two separate steps;
/// a concurrent saver in another process can interleave between them.
pub fn save(
    path: &Path,
    document: &VaultDocument,
    key: &VaultKey,
    salt: Option<&[u8; SALT_LEN]>,
    cipher: CipherKind,
) -> Result<()> {
    let salt = match salt {
        Some(s) => Some(*s),
        None => format::read_salt(path)?,
    };
    if salt.is_none() {
        debug!(path = %path.display(), "no salt on disk, generating a new one");
    }

    let blob = format::encrypt(document, key, salt.as_ref(), cipher)?;
    format::write_blob(path, &blob)?;
    debug!(path = %path.display(), entries = document.len(), "vault saved");
    Ok(())
}

/// One unlocked vault.
///
/// Holds the decrypted document, the derived key and the salt read back
/// from the file.  Key and document are zeroized when the session drops.
pub struct VaultSession {
    path: PathBuf,
    document: VaultDocument,
    key: VaultKey,
    salt: [u8; SALT_LEN],
    cipher: CipherKind,
}

impl VaultSession {
    /// Unlock (or create) the vault at `path`.
    pub fn open(path: &Path, password: &[u8], params: &CryptoParams) -> Result<Self> {
        let (document, key) = load_or_create(path, password, params)?;
        let salt = format::read_salt(path)?.ok_or_else(|| {
            PassVaultError::InvalidVaultFormat("vault file lost its salt while opening".into())
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
            key,
            salt,
            cipher: params.cipher,
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    pub fn entries(&self) -> &[Entry] {
        &self.document.entries
    }

    /// Fetch one entry by its zero-based position.
    pub fn entry(&self, index: usize) -> Result<&Entry> {
        self.document
            .entries
            .get(index)
            .ok_or(PassVaultError::EntryNotFound(index))
    }

    /// Append an entry at the end of the list.
    pub fn add_entry(&mut self, entry: Entry) {
        self.document.entries.push(entry);
    }

    /// Replace the entry at `index`.
    pub fn update_entry(&mut self, index: usize, entry: Entry) -> Result<()> {
        let slot = self
            .document
            .entries
            .get_mut(index)
            .ok_or(PassVaultError::EntryNotFound(index))?;
        *slot = entry;
        Ok(())
    }

    /// Remove and return the entry at `index`, shifting later entries up.
    pub fn remove_entry(&mut self, index: usize) -> Result<Entry> {
        if index >= self.document.entries.len() {
            return Err(PassVaultError::EntryNotFound(index));
        }
        Ok(self.document.entries.remove(index))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the current document and overwrite the vault file,
    /// keeping the salt captured when the session was opened.
    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.document, &self.key, Some(&self.salt), self.cipher)
    }

    /// End the session.  Equivalent to dropping it.
    pub fn close(self) {}

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &VaultDocument {
        &self.document
    }

    pub fn key(&self) -> &VaultKey {
        &self.key
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn entry_count(&self) -> usize {
        self.document.len()
    }
}
