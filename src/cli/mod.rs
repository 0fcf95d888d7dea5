//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::CryptoParams;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before any interactive prompt.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: encrypted credential vault with directory sync.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted credential vault with directory sync",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .passvault.toml)
    #[arg(long, global = true, env = "PASSVAULT_VAULT")]
    pub vault: Option<PathBuf>,

    /// Sync directory (default: `sync_dir` from .passvault.toml)
    #[arg(long, global = true, env = "PASSVAULT_SYNC_DIR")]
    pub sync_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add a credential
    Add {
        /// Title shown in listings (e.g. "GitHub")
        title: String,
        /// Login name for the site
        #[arg(short, long, default_value = "")]
        username: String,
        /// Generate a random password instead of prompting for one
        #[arg(short, long)]
        generate: bool,
    },

    /// List all credentials (passwords hidden)
    List,

    /// Show one credential, including its password
    Show {
        /// Entry number as shown by `list`
        number: usize,
    },

    /// Copy a password to the clipboard, clearing it after a timeout
    Copy {
        /// Entry number as shown by `list`
        number: usize,
        /// Seconds before the clipboard is cleared (default from config)
        #[arg(long)]
        clear_after: Option<u64>,
    },

    /// Change a credential's title, username or password
    Edit {
        /// Entry number as shown by `list`
        number: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },

    /// Delete a credential
    Delete {
        /// Entry number as shown by `list`
        number: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        /// Password length (default from config)
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        no_lower: bool,
        #[arg(long)]
        no_upper: bool,
        #[arg(long)]
        no_digits: bool,
        #[arg(long)]
        no_symbols: bool,
    },

    /// Rate a password's strength (prompts if omitted)
    Strength {
        password: Option<String>,
    },

    /// Report weak and reused passwords in the vault
    Health,

    /// Reconcile the vault with the sync directory (newest wins)
    Sync,

    /// Copy the vault into the sync directory
    Upload,

    /// Replace the vault with a file from the sync directory
    Download {
        /// Remote file name (default: first file in the sync directory with
        /// the vault file's extension)
        name: Option<String>,
    },

    /// Manage local user accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Account subcommands.
#[derive(clap::Subcommand)]
pub enum AccountAction {
    /// Register a new user
    Register {
        username: String,
    },

    /// Check a user's login password
    Login {
        username: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault password: `PASSVAULT_PASSWORD` first, then an interactive
/// prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `init` and
/// `account register`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.len() < MIN_PASSWORD_LEN {
            return Err(PassVaultError::CommandFailed(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Prompt for an entry password (no minimum length, confirmation asked).
pub fn prompt_entry_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Entry password")
        .with_confirmation("Confirm entry password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Settings for the current working directory.
pub fn settings() -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok((cwd, settings))
}

/// Vault file path: `--vault` if given, else the configured file.
pub fn vault_path(cli: &Cli, cwd: &Path, settings: &Settings) -> PathBuf {
    match &cli.vault {
        Some(p) => cwd.join(p),
        None => settings.vault_path(cwd),
    }
}

/// Sync directory: `--sync-dir` if given, else the configured one.
pub fn sync_dir(cli: &Cli, cwd: &Path, settings: &Settings) -> PathBuf {
    match &cli.sync_dir {
        Some(p) => cwd.join(p),
        None => settings.sync_path(cwd),
    }
}

/// Prompt for the master password and unlock an existing vault.
///
/// Refuses to silently create a vault; `init` is the only command that
/// does that.
pub fn open_session(cli: &Cli) -> Result<(VaultSession, Settings)> {
    let (cwd, settings) = settings()?;
    let path = vault_path(cli, &cwd, &settings);
    if !path.exists() {
        output::tip("Run `passvault init` to create a vault.");
        return Err(PassVaultError::NotFound(path));
    }

    let params: CryptoParams = settings.crypto_params()?;
    let password = prompt_password()?;
    let session = VaultSession::open(&path, password.as_bytes(), &params)?;
    Ok((session, settings))
}

/// Convert a 1-based entry number from the command line to an index.
pub fn entry_index(number: usize, count: usize) -> Result<usize> {
    if number == 0 || number > count {
        return Err(PassVaultError::EntryNotFound(number));
    }
    Ok(number - 1)
}

/// Reject entries the vault should never store: blank title or password.
pub fn validate_entry(title: &str, password: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PassVaultError::CommandFailed("title cannot be empty".into()));
    }
    if password.is_empty() {
        return Err(PassVaultError::CommandFailed("password cannot be empty".into()));
    }
    Ok(())
}

/// Record an operation in the audit log next to `vault_path`.
///
/// A no-op when built without the `audit-log` feature.
pub fn log_audit(vault_path: &Path, op: &str, target: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_event(vault_path, op, target, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault_path, op, target, details);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn entry_numbers_are_one_based() {
        assert_eq!(entry_index(1, 3).unwrap(), 0);
        assert_eq!(entry_index(3, 3).unwrap(), 2);
        assert!(matches!(entry_index(0, 3), Err(PassVaultError::EntryNotFound(0))));
        assert!(matches!(entry_index(4, 3), Err(PassVaultError::EntryNotFound(4))));
        assert!(entry_index(1, 0).is_err());
    }

    #[test]
    fn blank_titles_and_passwords_are_rejected() {
        assert!(validate_entry("github", "pw").is_ok());
        assert!(validate_entry("   ", "pw").is_err());
        assert!(validate_entry("github", "").is_err());
    }

    #[test]
    fn global_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "passvault",
            "list",
            "--vault",
            "other.pvault",
            "--sync-dir",
            "/srv/sync",
        ])
        .unwrap();
        let cwd = Path::new("/home/user");
        let settings = Settings::default();

        assert_eq!(
            vault_path(&cli, cwd, &settings),
            PathBuf::from("/home/user/other.pvault")
        );
        assert_eq!(sync_dir(&cli, cwd, &settings), PathBuf::from("/srv/sync"));
    }

    #[test]
    fn paths_fall_back_to_settings() {
        let cli = Cli::try_parse_from(["passvault", "sync"]).unwrap();
        let cwd = Path::new("/work");
        let settings = Settings::default();

        assert_eq!(
            vault_path(&cli, cwd, &settings),
            PathBuf::from("/work/vault.pvault")
        );
        assert_eq!(sync_dir(&cli, cwd, &settings), PathBuf::from("/work/cloud"));
    }
}
