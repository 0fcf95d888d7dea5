//! `passvault health`: weak and reused password report.

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;
use crate::health;

/// Execute the `health` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, _) = open_session(cli)?;
    let report = health::audit_vault(session.document());

    if report.is_healthy() {
        output::success(&format!(
            "All {} entries have strong, unique passwords.",
            report.total_entries
        ));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Title", "Problem"]);
    for weak in &report.weak {
        table.add_row(vec![
            (weak.index + 1).to_string(),
            weak.title.clone(),
            format!("{} password", weak.strength.category.as_str().to_lowercase()),
        ]);
    }
    for dup in &report.duplicates {
        table.add_row(vec![
            (dup.index + 1).to_string(),
            dup.title.clone(),
            "reused password".to_string(),
        ]);
    }
    println!("{table}");

    for line in report.messages() {
        output::warning(&line);
    }
    Ok(())
}
