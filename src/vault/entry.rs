//! Entry and VaultDocument types stored inside a vault.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single credential record.
///
/// The vault layer does not validate fields; the CLI rejects empty
/// titles and passwords before anything reaches persistence.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Entry {
    /// Display name, e.g. "github.com".
    pub title: String,

    /// Login name.  Older vaults may omit it.
    #[serde(default)]
    pub username: String,

    /// The stored password in plaintext (only ever in memory).
    pub password: String,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The plaintext contents of a vault: an ordered list of entries.
///
/// Order is insertion order and survives save/load.  Titles and
/// passwords may repeat.  Zeroized when dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct VaultDocument {
    pub entries: Vec<Entry>,
}

impl VaultDocument {
    /// An empty document, as written for a brand-new vault.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_entries_key() {
        let mut doc = VaultDocument::new();
        doc.entries.push(Entry::new("site", "u", "p"));

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"title":"site","username":"u","password":"p"}]}"#
        );
    }

    #[test]
    fn missing_username_defaults_to_empty() {
        let doc: VaultDocument =
            serde_json::from_str(r#"{"entries":[{"title":"Prueba","password":"1234"}]}"#).unwrap();
        assert_eq!(doc.entries[0].username, "");
        assert_eq!(doc.entries[0].password, "1234");
    }

    #[test]
    fn debug_redacts_password() {
        let entry = Entry::new("mail", "me", "s3cret");
        let shown = format!("{entry:?}");
        assert!(shown.contains("mail"));
        assert!(!shown.contains("s3cret"));
    }

    #[test]
    fn zeroize_clears_entries() {
        let mut doc = VaultDocument {
            entries: vec![Entry::new("a", "b", "c")],
        };
        doc.zeroize();
        assert!(doc.entries.is_empty());
    }
}
