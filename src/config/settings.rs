use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crypto::{CipherKind, CryptoParams, HashAlgorithm, KdfParams};
use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file, relative to the working directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Sync directory standing in for cloud storage.
    #[serde(default = "default_sync_dir")]
    pub sync_dir: String,

    /// PBKDF2 iteration count (default: 200 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Derived key length in bytes (default: 32).
    #[serde(default = "default_kdf_key_length")]
    pub kdf_key_length: usize,

    /// PBKDF2 hash: "sha256" or "sha512".
    #[serde(default)]
    pub kdf_algorithm: HashAlgorithm,

    /// Vault cipher: "aes-256-gcm" or "sha256-keystream".
    #[serde(default)]
    pub cipher: CipherKind,

    /// Seconds before a copied password is wiped from the clipboard.
    #[serde(default = "default_clipboard_clear_secs")]
    pub clipboard_clear_secs: u64,

    /// Length used by `generate` when none is given.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// User table for `account` commands.
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.pvault".to_string()
}

fn default_sync_dir() -> String {
    "cloud".to_string()
}

fn default_kdf_iterations() -> u32 {
    crate::crypto::kdf::DEFAULT_ITERATIONS
}

fn default_kdf_key_length() -> usize {
    crate::crypto::kdf::DEFAULT_KEY_LEN
}

fn default_clipboard_clear_secs() -> u64 {
    30
}

fn default_generator_length() -> usize {
    crate::password::DEFAULT_LENGTH
}

fn default_accounts_file() -> String {
    "users.json".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            sync_dir: default_sync_dir(),
            kdf_iterations: default_kdf_iterations(),
            kdf_key_length: default_kdf_key_length(),
            kdf_algorithm: HashAlgorithm::default(),
            cipher: CipherKind::default(),
            clipboard_clear_secs: default_clipboard_clear_secs(),
            generator_length: default_generator_length(),
            accounts_file: default_accounts_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }

    pub fn sync_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.sync_dir)
    }

    pub fn accounts_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.accounts_file)
    }

    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_secs(self.clipboard_clear_secs)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> Result<KdfParams> {
        let params = KdfParams {
            iterations: self.kdf_iterations,
            key_length: self.kdf_key_length,
            algorithm: self.kdf_algorithm,
        };
        params.validate()?;
        Ok(params)
    }

    /// Everything the vault layer needs to open a file.
    pub fn crypto_params(&self) -> Result<CryptoParams> {
        Ok(CryptoParams {
            kdf: self.kdf_params()?,
            cipher: self.cipher,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, "vault.pvault");
        assert_eq!(s.sync_dir, "cloud");
        assert_eq!(s.kdf_iterations, 200_000);
        assert_eq!(s.kdf_key_length, 32);
        assert_eq!(s.kdf_algorithm, HashAlgorithm::Sha256);
        assert_eq!(s.cipher, CipherKind::Aes256Gcm);
        assert_eq!(s.clipboard_clear_secs, 30);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "vault.pvault");
        assert_eq!(settings.crypto_params().unwrap(), CryptoParams::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "alice_vault.json"
sync_dir = "/mnt/dropbox/vaults"
kdf_iterations = 600000
kdf_algorithm = "sha512"
cipher = "sha256-keystream"
clipboard_clear_secs = 10
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "alice_vault.json");
        assert_eq!(settings.sync_dir, "/mnt/dropbox/vaults");
        assert_eq!(settings.clipboard_timeout(), Duration::from_secs(10));

        let params = settings.crypto_params().unwrap();
        assert_eq!(params.kdf.iterations, 600_000);
        assert_eq!(params.kdf.algorithm, HashAlgorithm::Sha512);
        assert_eq!(params.cipher, CipherKind::Sha256Keystream);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "sync_dir = \"remote\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.sync_dir, "remote");
        assert_eq!(settings.vault_file, "vault.pvault");
        assert_eq!(settings.kdf_iterations, 200_000);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn unknown_crypto_names_fail_at_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "cipher = \"aes-256-gcm\"\n").unwrap();
        assert_eq!(Settings::load(tmp.path()).unwrap().cipher, CipherKind::Aes256Gcm);

        fs::write(tmp.path().join(".passvault.toml"), "cipher = \"des\"\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(PassVaultError::ConfigError(_))
        ));

        fs::write(tmp.path().join(".passvault.toml"), "kdf_algorithm = \"md5\"\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(PassVaultError::ConfigError(_))
        ));
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let s = Settings {
            kdf_iterations: 0,
            ..Settings::default()
        };
        assert!(s.kdf_params().is_err());
    }

    #[test]
    fn absolute_sync_dir_wins_over_project_dir() {
        let s = Settings {
            sync_dir: "/srv/cloud".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.sync_path(Path::new("/home/user")),
            PathBuf::from("/srv/cloud")
        );
        assert_eq!(
            s.vault_path(Path::new("/home/user")),
            PathBuf::from("/home/user/vault.pvault")
        );
    }
}
