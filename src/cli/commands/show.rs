//! `passvault show`: print one entry including its password.

use console::style;

use crate::cli::{entry_index, log_audit, open_session, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, number: usize) -> Result<()> {
    let (session, _) = open_session(cli)?;
    let entry = session.entry(entry_index(number, session.entry_count())?)?;

    println!("{} {}", style("Title:   ").bold(), entry.title);
    println!("{} {}", style("Username:").bold(), entry.username);
    println!("{} {}", style("Password:").bold(), entry.password);

    log_audit(session.path(), "show", Some(&entry.title), None);
    Ok(())
}
