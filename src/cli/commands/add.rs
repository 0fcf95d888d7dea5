//! `passvault add`: append a credential to the vault.

use crate::cli::output;
use crate::cli::{log_audit, open_session, prompt_entry_password, validate_entry, Cli};
use crate::errors::Result;
use crate::password::{self, CharsetFlags};
use crate::vault::Entry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, title: &str, username: &str, generate: bool) -> Result<()> {
    let (mut session, settings) = open_session(cli)?;

    let secret = if generate {
        zeroize::Zeroizing::new(password::generate(
            settings.generator_length,
            CharsetFlags::default(),
        )?)
    } else {
        prompt_entry_password()?
    };

    validate_entry(title, &secret)?;

    let strength = password::evaluate(&secret);
    session.add_entry(Entry::new(title, username, secret.as_str()));
    session.save()?;

    log_audit(session.path(), "add", Some(title), None);
    output::success(&format!(
        "Added '{title}' as entry #{}",
        session.entry_count()
    ));
    if generate {
        output::info("Generated a random password. Use `passvault show` or `copy` to read it.");
    } else if strength.category == password::StrengthCategory::Weak {
        output::warning("This password is weak.");
        for hint in &strength.suggestions {
            output::tip(hint);
        }
    }

    Ok(())
}
