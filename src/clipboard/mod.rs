//! Clipboard copy with automatic clearing.

use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};

/// Copy `text` to the system clipboard, wait `clear_after`, then clear it.
///
/// The clipboard is only cleared if it still holds `text`, so anything the
/// user copied in the meantime is left alone.  Blocks the calling thread
/// for the whole interval.
pub fn copy_with_timeout(text: &str, clear_after: Duration) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(clipboard_err)?;
    clipboard.set_text(text.to_string()).map_err(clipboard_err)?;
    debug!(secs = clear_after.as_secs(), "copied to clipboard");

    thread::sleep(clear_after);

    let current = Zeroizing::new(clipboard.get_text().unwrap_or_default());
    if current.as_str() == text {
        clipboard.clear().map_err(clipboard_err)?;
        debug!("clipboard cleared");
    }
    Ok(())
}

fn clipboard_err(e: arboard::Error) -> PassVaultError {
    PassVaultError::ClipboardError(e.to_string())
}
