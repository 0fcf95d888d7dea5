//! `passvault delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{entry_index, log_audit, open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, number: usize, force: bool) -> Result<()> {
    let (mut session, _) = open_session(cli)?;
    let index = entry_index(number, session.entry_count())?;
    let title = session.entry(index)?.title.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry #{number} '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    session.remove_entry(index)?;
    session.save()?;

    log_audit(session.path(), "delete", Some(&title), None);
    output::success(&format!("Deleted entry '{title}'"));

    Ok(())
}
