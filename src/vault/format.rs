//! On-disk vault envelope and document-level encryption.
//!
//! A vault file is exactly:
//!
//! ```text
//! [salt: 16 bytes][nonce: 16 bytes][ciphertext: variable]
//! ```
//!
//! - **Salt**: fixed at vault creation, reused on every save.
//! - **Nonce**: fresh on every encryption.
//! - **Ciphertext**: the JSON-serialized `VaultDocument`, sealed with the
//!   configured `CipherKind`.
//!
//! There is no magic number or version byte.  Anything shorter than 32
//! bytes is rejected before any interpretation.

use std::fs;
use std::io::Read;
use std::path::Path;

use zeroize::Zeroize;

use super::entry::VaultDocument;
use crate::crypto::{self, CipherKind, CryptoParams, VaultKey, NONCE_LEN, SALT_LEN};
use crate::errors::{PassVaultError, Result};

/// Smallest valid blob: salt + nonce with an empty body.
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN;

/// Borrowed view of the three parts of a vault blob.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub nonce: &'a [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
}

/// Split a raw blob into salt, nonce and ciphertext.
pub fn split_envelope(blob: &[u8]) -> Result<Envelope<'_>> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(PassVaultError::InvalidVaultFormat(format!(
            "vault data is {} bytes, need at least {MIN_BLOB_LEN}",
            blob.len()
        )));
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    Ok(Envelope {
        salt: salt
            .try_into()
            .map_err(|_| PassVaultError::InvalidVaultFormat("bad salt".into()))?,
        nonce: nonce
            .try_into()
            .map_err(|_| PassVaultError::InvalidVaultFormat("bad nonce".into()))?,
        ciphertext,
    })
}

/// Encrypt a document into a complete vault blob.
///
/// Pass `None` for `salt` only when creating a brand-new vault; a fresh
/// salt is generated in that case.  A fresh nonce is generated on every
/// call.  No I/O is performed.
pub fn encrypt(
    document: &VaultDocument,
    key: &VaultKey,
    salt: Option<&[u8; SALT_LEN]>,
    cipher: CipherKind,
) -> Result<Vec<u8>> {
    let salt = salt.copied().unwrap_or_else(crypto::generate_salt);
    let nonce = crypto::generate_nonce();

    let mut plaintext = serde_json::to_vec(document)
        .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))?;
    let sealed = crypto::seal(cipher, key.as_bytes(), &nonce, &plaintext);
    plaintext.zeroize();
    let sealed = sealed?;

    let mut blob = Vec::with_capacity(MIN_BLOB_LEN + sealed.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Decrypt a vault blob with the master password.
///
/// Returns the document together with the derived key so the caller can
/// save further changes without deriving again.
///
/// Fails with `InvalidVaultFormat` when the blob is too short and with
/// `AuthenticationFailed` when the plaintext is not a vault document.
pub fn decrypt(
    blob: &[u8],
    password: &[u8],
    params: &CryptoParams,
) -> Result<(VaultDocument, VaultKey)> {
    let envelope = split_envelope(blob)?;

    let key = crypto::derive_key(password, envelope.salt, &params.kdf)?;
    let mut plaintext = crypto::open(params.cipher, key.as_bytes(), envelope.nonce, envelope.ciphertext)?;

    let parsed = serde_json::from_slice::<VaultDocument>(&plaintext);
    plaintext.zeroize();
    let document = parsed.map_err(|_| PassVaultError::AuthenticationFailed)?;

    Ok((document, key))
}

/// Read the salt prefix of an existing vault file.
///
/// Returns `None` if the file does not exist or holds fewer than 16 bytes.
pub fn read_salt(path: &Path) -> Result<Option<[u8; SALT_LEN]>> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut prefix = Vec::with_capacity(SALT_LEN);
    file.take(SALT_LEN as u64).read_to_end(&mut prefix)?;

    Ok(<[u8; SALT_LEN]>::try_from(prefix.as_slice()).ok())
}

/// Write a blob to disk **atomically**.
///
/// Writes to a temp file in the same directory, then renames it over
/// the target so readers never see a half-written vault.
pub fn write_blob(path: &Path, blob: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = fs::write(&tmp_path, blob).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}
