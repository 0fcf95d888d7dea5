//! `passvault account`: register and check local user accounts.

use crate::accounts::UserTable;
use crate::cli::output;
use crate::cli::{log_audit, prompt_new_password, prompt_password, settings, AccountAction};
use crate::errors::{PassVaultError, Result};

/// Execute an `account` subcommand.
pub fn execute(action: &AccountAction) -> Result<()> {
    let (cwd, settings) = settings()?;
    let path = settings.accounts_path(&cwd);
    let users = UserTable::new(&path, settings.kdf_params()?);

    match action {
        AccountAction::Register { username } => {
            if users.contains(username)? {
                return Err(PassVaultError::AccountExists(username.clone()));
            }
            let password = prompt_new_password("Choose login password")?;
            users.create_user(username, &password)?;
            log_audit(&path, "account-register", Some(username), None);
            output::success(&format!("Registered user '{username}'"));
        }
        AccountAction::Login { username } => {
            let password = prompt_password()?;
            if users.authenticate(username, &password)? {
                log_audit(&path, "account-login", Some(username), Some("ok"));
                output::success(&format!("Welcome back, {username}."));
            } else {
                log_audit(&path, "account-login", Some(username), Some("failed"));
                return Err(PassVaultError::AccountError(
                    "invalid username or password".into(),
                ));
            }
        }
    }
    Ok(())
}
