//! `passvault strength`: rate a password.

use console::style;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::errors::{PassVaultError, Result};
use crate::password::{self, StrengthCategory};

/// Execute the `strength` command.
pub fn execute(candidate: Option<&str>) -> Result<()> {
    let candidate = match candidate {
        Some(p) => Zeroizing::new(p.to_string()),
        None => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Password to check")
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        ),
    };

    let report = password::evaluate(&candidate);
    let label = match report.category {
        StrengthCategory::Weak => style(report.category.as_str()).red().bold(),
        StrengthCategory::Medium => style(report.category.as_str()).yellow().bold(),
        StrengthCategory::Strong => style(report.category.as_str()).green().bold(),
    };
    println!("Strength: {label} (score {}/6)", report.score);

    for hint in &report.suggestions {
        output::tip(hint);
    }
    Ok(())
}
