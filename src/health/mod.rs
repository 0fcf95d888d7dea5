//! Vault health report: weak and reused passwords.
//!
//! Runs entirely on the in-memory document.  The report carries titles
//! and positions, never passwords.

use std::collections::HashSet;

use crate::password::{self, StrengthCategory, StrengthReport};
use crate::vault::VaultDocument;

/// An entry whose password scored as weak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakEntry {
    /// Zero-based position in the vault.
    pub index: usize,
    pub title: String,
    pub strength: StrengthReport,
}

/// An entry reusing a password that appeared earlier in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub total_entries: usize,
    pub weak: Vec<WeakEntry>,
    pub duplicates: Vec<DuplicateEntry>,
    pub recommendations: Vec<String>,
}

impl HealthReport {
    /// `true` when nothing was flagged.
    pub fn is_healthy(&self) -> bool {
        self.weak.is_empty() && self.duplicates.is_empty()
    }

    /// Human-readable summary lines.
    pub fn messages(&self) -> Vec<String> {
        let mut lines = vec![format!("Total entries: {}", self.total_entries)];
        if !self.weak.is_empty() {
            lines.push(format!("Weak passwords: {}", self.weak.len()));
        }
        if !self.duplicates.is_empty() {
            lines.push(format!("Reused passwords: {}", self.duplicates.len()));
        }
        lines.extend(self.recommendations.iter().cloned());
        lines
    }
}

/// Inspect every entry of `document`.
///
/// The first entry with a given password is the original; each later
/// entry with the same password is reported as a duplicate.
pub fn audit_vault(document: &VaultDocument) -> HealthReport {
    let mut weak = Vec::new();
    let mut duplicates = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, entry) in document.entries.iter().enumerate() {
        let strength = password::evaluate(&entry.password);
        if strength.category == StrengthCategory::Weak {
            weak.push(WeakEntry {
                index,
                title: entry.title.clone(),
                strength,
            });
        }

        if !seen.insert(entry.password.as_str()) {
            duplicates.push(DuplicateEntry {
                index,
                title: entry.title.clone(),
            });
        }
    }

    let mut recommendations = Vec::new();
    if !weak.is_empty() {
        recommendations.push("Replace weak passwords with longer, more varied ones".to_string());
    }
    if !duplicates.is_empty() {
        recommendations.push("Avoid reusing the same password across entries".to_string());
    }

    HealthReport {
        total_entries: document.len(),
        weak,
        duplicates,
        recommendations,
    }
}
