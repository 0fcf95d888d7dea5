use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The decrypted bytes did not form a valid vault document (or the
    /// authentication tag did not verify). A wrong master password and a
    /// corrupted file look exactly the same from here.
    #[error("Could not unlock vault: wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("No entry at position {0}")]
    EntryNotFound(usize),

    // --- Sync errors ---
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("'{0}' does not exist in the sync directory")]
    RemoteNotFound(String),

    #[error("Invalid remote file name '{0}'")]
    InvalidRemoteName(String),

    // --- Password collaborator ---
    #[error("Cannot generate password: {0}")]
    PasswordGeneration(String),

    // --- Accounts ---
    #[error("User '{0}' already exists")]
    AccountExists(String),

    #[error("Account error: {0}")]
    AccountError(String),

    // --- Clipboard ---
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
