//! `passvault generate`: print a random password.

use crate::cli::output;
use crate::cli::settings;
use crate::errors::Result;
use crate::password::{self, CharsetFlags};

/// Execute the `generate` command. Does not need an unlocked vault.
pub fn execute(length: Option<usize>, flags: CharsetFlags) -> Result<()> {
    let (_, settings) = settings()?;
    let length = length.unwrap_or(settings.generator_length);

    let generated = zeroize::Zeroizing::new(password::generate(length, flags)?);
    println!("{}", generated.as_str());

    let report = password::evaluate(&generated);
    output::tip(&format!("Strength: {}", report.category.as_str()));
    Ok(())
}
