//! Last-writer-wins synchronization between a local vault file and a
//! same-named file in a remote store.
//!
//! The engine never looks inside the files.  It compares existence and
//! modification time (to the whole second) and copies whichever side is
//! newer over the other:
//!
//! | local | remote | action          | outcome      |
//! |-------|--------|-----------------|--------------|
//! | no    | no     | none            | `Unchanged`  |
//! | yes   | no     | local → remote  | `Uploaded`   |
//! | no    | yes    | remote → local  | `Downloaded` |
//! | newer | older  | local → remote  | `Uploaded`   |
//! | older | newer  | remote → local  | `Downloaded` |
//! | equal | equal  | none            | `Unchanged`  |
//!
//! Divergent edits are never merged; the older side is overwritten.

pub mod remote;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::errors::{PassVaultError, Result};

pub use remote::{DirectoryStore, RemoteFile, RemoteStore};

/// What `sync` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both sides already agree (or neither exists).
    Unchanged,
    /// The local file was copied to the remote store.
    Uploaded,
    /// The remote file was copied over the local one.
    Downloaded,
}

impl SyncOutcome {
    /// `true` if any file was copied.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// What `download` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The named remote file was written to the destination.
    Downloaded(String),
    /// No matching remote file exists; nothing was written.
    NotFound,
}

/// Reconciles local vault files with a `RemoteStore`.
pub struct SyncEngine<S: RemoteStore = DirectoryStore> {
    store: S,
}

impl SyncEngine<DirectoryStore> {
    /// Engine backed by a sync directory (created if absent).
    pub fn with_directory(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(DirectoryStore::new(dir)?))
    }
}

impl<S: RemoteStore> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy `path` into the remote store under its base name, keeping its
    /// modification time.
    pub fn upload(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(PassVaultError::NotFound(path.to_path_buf()));
        }
        let name = remote_name(path)?;
        let bytes = fs::read(path)?;
        let modified = fs::metadata(path)?.modified()?;

        self.store.put(name, &bytes, modified)?;
        info!(file = name, "uploaded vault to sync store");
        Ok(())
    }

    /// Copy a remote file to `destination`, overwriting it.
    ///
    /// Without `remote_name` the first remote file in name order that shares
    /// `destination`'s extension is used (hidden dot-files are skipped).  A
    /// missing file is reported as `DownloadOutcome::NotFound`, not as an
    /// error.
    pub fn download(&self, destination: &Path, remote_name: Option<&str>) -> Result<DownloadOutcome> {
        let name = match remote_name {
            Some(name) => name.to_string(),
            None => match self.first_candidate(destination)? {
                Some(name) => name,
                None => return Ok(DownloadOutcome::NotFound),
            },
        };

        if self.store.stat(&name)?.is_none() {
            debug!(file = %name, "nothing to download");
            return Ok(DownloadOutcome::NotFound);
        }

        self.pull(&name, destination)?;
        Ok(DownloadOutcome::Downloaded(name))
    }

    /// Bring `path` and its remote counterpart in line, newest wins.
    ///
    /// Holds a per-path lock for the whole compare-and-copy sequence, so
    /// two `sync` calls on the same vault in one process never interleave.
    pub fn sync(&self, path: &Path) -> Result<SyncOutcome> {
        let lock = path_lock(path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let name = remote_name(path)?;
        let local = local_mtime(path)?;
        let remote = self.store.stat(name)?;

        let outcome = match (local, remote) {
            (None, None) => SyncOutcome::Unchanged,
            (Some(_), None) => {
                self.upload(path)?;
                SyncOutcome::Uploaded
            }
            (None, Some(_)) => {
                self.pull(name, path)?;
                SyncOutcome::Downloaded
            }
            (Some(l), Some(r)) => match whole_seconds(l).cmp(&whole_seconds(r)) {
                std::cmp::Ordering::Greater => {
                    self.upload(path)?;
                    SyncOutcome::Uploaded
                }
                std::cmp::Ordering::Less => {
                    self.pull(name, path)?;
                    SyncOutcome::Downloaded
                }
                std::cmp::Ordering::Equal => SyncOutcome::Unchanged,
            },
        };

        debug!(file = name, ?outcome, "sync finished");
        Ok(outcome)
    }

    fn pull(&self, name: &str, destination: &Path) -> Result<()> {
        let file = self.store.get(name)?;
        remote::write_with_mtime(destination, &file.bytes, file.modified)?;
        info!(file = name, dest = %destination.display(), "downloaded vault from sync store");
        Ok(())
    }

    fn first_candidate(&self, destination: &Path) -> Result<Option<String>> {
        let wanted = destination.extension();
        let mut names: Vec<String> = self
            .store
            .list()?
            .into_iter()
            .filter(|n| !n.starts_with('.') && Path::new(n).extension() == wanted)
            .collect();
        names.sort();
        Ok(names.into_iter().next())
    }
}

/// Base name of a local vault file, used as its remote identity.
fn remote_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PassVaultError::InvalidRemoteName(path.display().to_string()))
}

fn local_mtime(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(meta.modified()?)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Seconds since the epoch, floored.  Sync decisions use one-second
/// resolution.
fn whole_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            if before.subsec_nanos() > 0 {
                -secs - 1
            } else {
                -secs
            }
        }
    }
}

/// Process-wide mutex for one local vault path.
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = lock_key(path);
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// Canonical form of `path` that works even when the file is missing.
fn lock_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn whole_seconds_floors() {
        let t = UNIX_EPOCH + Duration::from_millis(5_999);
        assert_eq!(whole_seconds(t), 5);
        let before = UNIX_EPOCH - Duration::from_millis(1_500);
        assert_eq!(whole_seconds(before), -2);
    }

    #[test]
    fn outcome_changed() {
        assert!(!SyncOutcome::Unchanged.changed());
        assert!(SyncOutcome::Uploaded.changed());
        assert!(SyncOutcome::Downloaded.changed());
    }

    #[test]
    fn same_path_shares_a_lock() {
        let tmp = tempfile::TempDir::new().unwrap();
        let a = path_lock(&tmp.path().join("v.pvault"));
        let b = path_lock(&tmp.path().join(".").join("v.pvault"));
        assert!(Arc::ptr_eq(&a, &b));
    }
}
