//! `passvault edit`: change an entry's title, username or password.

use crate::cli::output;
use crate::cli::{entry_index, log_audit, open_session, prompt_entry_password, validate_entry, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::Entry;

/// Execute the `edit` command.
pub fn execute(
    cli: &Cli,
    number: usize,
    title: Option<&str>,
    username: Option<&str>,
    new_password: bool,
) -> Result<()> {
    if title.is_none() && username.is_none() && !new_password {
        return Err(PassVaultError::CommandFailed(
            "nothing to change; pass --title, --username or --password".into(),
        ));
    }

    let (mut session, _) = open_session(cli)?;
    let index = entry_index(number, session.entry_count())?;
    let current = session.entry(index)?;

    let password = if new_password {
        prompt_entry_password()?
    } else {
        zeroize::Zeroizing::new(current.password.clone())
    };
    let updated = Entry::new(
        title.unwrap_or(&current.title),
        username.unwrap_or(&current.username),
        password.as_str(),
    );
    validate_entry(&updated.title, &updated.password)?;
    let new_title = updated.title.clone();

    session.update_entry(index, updated)?;
    session.save()?;

    log_audit(session.path(), "edit", Some(&new_title), None);
    output::success(&format!("Updated entry #{number} ('{new_title}')"));

    Ok(())
}
