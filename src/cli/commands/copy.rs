//! `passvault copy`: put an entry's password on the clipboard for a while.

use std::time::Duration;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{entry_index, log_audit, open_session, Cli};
use crate::clipboard;
use crate::errors::Result;

/// Execute the `copy` command.
pub fn execute(cli: &Cli, number: usize, clear_after: Option<u64>) -> Result<()> {
    let (session, settings) = open_session(cli)?;
    let entry = session.entry(entry_index(number, session.entry_count())?)?;

    let timeout = clear_after.map_or_else(|| settings.clipboard_timeout(), Duration::from_secs);
    let title = entry.title.clone();
    let secret = Zeroizing::new(entry.password.clone());
    let path = session.path().to_path_buf();

    // Drop the decrypted vault before blocking on the timer.
    session.close();

    output::success(&format!(
        "Copied password for '{title}'. Clearing clipboard in {}s...",
        timeout.as_secs()
    ));
    clipboard::copy_with_timeout(&secret, timeout)?;
    log_audit(&path, "copy", Some(&title), None);
    output::info("Clipboard cleared.");

    Ok(())
}
