//! Remote storage capability and its directory-backed implementation.
//!
//! The sync engine only talks to `RemoteStore`, so a network-backed
//! store can replace `DirectoryStore` without touching the state machine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::errors::{PassVaultError, Result};

/// Contents and modification time of one remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub bytes: Vec<u8>,
    pub modified: SystemTime,
}

/// Minimal capability a sync backend must provide.
///
/// Files are addressed by a flat name (the base name of the local vault
/// file).  There is no manifest; existence and mtime are the only state.
pub trait RemoteStore {
    /// Store `bytes` under `name`, stamped with `modified`.
    fn put(&self, name: &str, bytes: &[u8], modified: SystemTime) -> Result<()>;

    /// Fetch `name`.  Fails with `RemoteNotFound` if it is absent.
    fn get(&self, name: &str) -> Result<RemoteFile>;

    /// Modification time of `name`, or `None` if it does not exist.
    fn stat(&self, name: &str) -> Result<Option<SystemTime>>;

    /// Names of all stored files, in no particular order.
    fn list(&self) -> Result<Vec<String>>;
}

/// A plain directory standing in for cloud storage.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Use `root` as the sync directory, creating it if absent.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
            debug!(dir = %root.display(), "created sync directory");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

impl RemoteStore for DirectoryStore {
    fn put(&self, name: &str, bytes: &[u8], modified: SystemTime) -> Result<()> {
        let path = self.file_path(name)?;
        write_with_mtime(&path, bytes, modified)
    }

    fn get(&self, name: &str) -> Result<RemoteFile> {
        let path = self.file_path(name)?;
        if !path.is_file() {
            return Err(PassVaultError::RemoteNotFound(name.to_string()));
        }
        let bytes = fs::read(&path)?;
        let modified = fs::metadata(&path)?.modified()?;
        Ok(RemoteFile { bytes, modified })
    }

    fn stat(&self, name: &str) -> Result<Option<SystemTime>> {
        let path = self.file_path(name)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Some(meta.modified()?)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Remote names are single path components.
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if bad {
        return Err(PassVaultError::InvalidRemoteName(name.to_string()));
    }
    Ok(())
}

/// Write `bytes` to `path` via temp file + rename, then set its mtime.
pub(crate) fn write_with_mtime(path: &Path, bytes: &[u8], modified: SystemTime) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.sync.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = fs::write(&tmp_path, bytes)
        .and_then(|()| fs::File::options().write(true).open(&tmp_path))
        .and_then(|f| f.set_modified(modified))
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}
