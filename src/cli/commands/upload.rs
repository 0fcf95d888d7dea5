//! `passvault upload`: unconditional push to the sync directory.

use crate::cli::output;
use crate::cli::{log_audit, settings, sync_dir, vault_path, Cli};
use crate::errors::Result;
use crate::sync::SyncEngine;

/// Execute the `upload` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (cwd, settings) = settings()?;
    let path = vault_path(cli, &cwd, &settings);
    let dir = sync_dir(cli, &cwd, &settings);

    SyncEngine::with_directory(&dir)?.upload(&path)?;

    log_audit(&path, "upload", None, None);
    output::success(&format!("Uploaded {} to {}", path.display(), dir.display()));
    Ok(())
}
