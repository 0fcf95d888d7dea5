//! `passvault sync`: newest-wins reconciliation with the sync directory.

use crate::cli::output;
use crate::cli::{log_audit, settings, sync_dir, vault_path, Cli};
use crate::errors::Result;
use crate::sync::{SyncEngine, SyncOutcome};

/// Execute the `sync` command. The vault is never decrypted.
pub fn execute(cli: &Cli) -> Result<()> {
    let (cwd, settings) = settings()?;
    let path = vault_path(cli, &cwd, &settings);
    let dir = sync_dir(cli, &cwd, &settings);

    let engine = SyncEngine::with_directory(&dir)?;
    let outcome = engine.sync(&path)?;

    match outcome {
        SyncOutcome::Uploaded => {
            output::success(&format!("Uploaded vault to {}", dir.display()));
            log_audit(&path, "sync", None, Some("uploaded"));
        }
        SyncOutcome::Downloaded => {
            output::success(&format!("Downloaded newer vault from {}", dir.display()));
            log_audit(&path, "sync", None, Some("downloaded"));
        }
        SyncOutcome::Unchanged => output::info("Already in sync."),
    }
    Ok(())
}
