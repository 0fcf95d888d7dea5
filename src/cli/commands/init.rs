//! `passvault init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{log_audit, prompt_new_password, settings, vault_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (cwd, settings) = settings()?;
    let path = vault_path(cli, &cwd, &settings);

    // 1. Refuse to overwrite an existing vault.
    if path.exists() {
        output::tip("Use `passvault add` to add entries to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // 2. Create the parent directory if needed.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            output::info(&format!("Created directory: {}", parent.display()));
        }
    }

    // 3. Prompt for a new password (with confirmation) and write the file.
    let params = settings.crypto_params()?;
    let password = prompt_new_password("Choose master password")?;
    let session = VaultSession::open(&path, password.as_bytes(), &params)?;
    session.close();

    log_audit(&path, "init", None, Some(params.cipher.as_str()));
    output::success(&format!("Vault created at {}", path.display()));

    output::tip("Run `passvault add <TITLE>` to add a credential.");
    output::tip("Run `passvault sync` to copy it to the sync directory.");

    Ok(())
}
