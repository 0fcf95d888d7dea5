//! `passvault download`: unconditional pull from the sync directory.

use crate::cli::output;
use crate::cli::{log_audit, settings, sync_dir, vault_path, Cli};
use crate::errors::Result;
use crate::sync::{DownloadOutcome, SyncEngine};

/// Execute the `download` command.
pub fn execute(cli: &Cli, name: Option<&str>) -> Result<()> {
    let (cwd, settings) = settings()?;
    let path = vault_path(cli, &cwd, &settings);
    let dir = sync_dir(cli, &cwd, &settings);

    match SyncEngine::with_directory(&dir)?.download(&path, name)? {
        DownloadOutcome::Downloaded(remote) => {
            log_audit(&path, "download", Some(&remote), None);
            output::success(&format!("Downloaded '{remote}' to {}", path.display()));
        }
        DownloadOutcome::NotFound => {
            output::warning(&format!(
                "Nothing to download from {}",
                dir.display()
            ));
        }
    }
    Ok(())
}
