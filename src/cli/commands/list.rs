//! `passvault list`: display all entries in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, _) = open_session(cli)?;

    output::info(&format!(
        "{}: {} entr{}",
        session.path().display(),
        session.entry_count(),
        if session.entry_count() == 1 { "y" } else { "ies" }
    ));
    output::print_entries_table(session.entries());

    Ok(())
}
