//! Integration tests for last-writer-wins sync.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use passvault::errors::{PassVaultError, Result};
use passvault::sync::{DownloadOutcome, RemoteFile, RemoteStore, SyncEngine, SyncOutcome};
use tempfile::TempDir;

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

fn write_at(path: &Path, bytes: &[u8], mtime: SystemTime) {
    fs::write(path, bytes).unwrap();
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}

/// Local dir + sync dir + engine.
struct Fixture {
    _tmp: TempDir,
    local: std::path::PathBuf,
    remote: std::path::PathBuf,
    engine: SyncEngine,
}

fn fixture() -> Fixture {
    let tmp = TempDir::new().unwrap();
    let local_dir = tmp.path().join("local");
    fs::create_dir(&local_dir).unwrap();
    let cloud = tmp.path().join("cloud");
    let engine = SyncEngine::with_directory(&cloud).unwrap();

    Fixture {
        local: local_dir.join("vault.pvault"),
        remote: cloud.join("vault.pvault"),
        engine,
        _tmp: tmp,
    }
}

// ---------------------------------------------------------------------------
// The six states
// ---------------------------------------------------------------------------

#[test]
fn neither_side_exists() {
    let f = fixture();
    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Unchanged);
    assert!(!f.local.exists());
    assert!(!f.remote.exists());
}

#[test]
fn only_local_uploads() {
    let f = fixture();
    write_at(&f.local, b"datos1", at(1_700_000_000));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Uploaded);
    assert_eq!(fs::read(&f.remote).unwrap(), b"datos1");
    assert_eq!(mtime(&f.remote), at(1_700_000_000));
}

#[test]
fn only_remote_downloads() {
    let f = fixture();
    write_at(&f.remote, b"remote", at(1_700_000_000));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Downloaded);
    assert_eq!(fs::read(&f.local).unwrap(), b"remote");
    assert_eq!(mtime(&f.local), at(1_700_000_000));
}

#[test]
fn newer_local_wins() {
    let f = fixture();
    write_at(&f.remote, b"old", at(1_700_000_000));
    write_at(&f.local, b"new", at(1_700_000_100));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Uploaded);
    assert_eq!(fs::read(&f.remote).unwrap(), b"new");
}

#[test]
fn newer_remote_wins() {
    let f = fixture();
    write_at(&f.local, b"old", at(1_700_000_000));
    write_at(&f.remote, b"new", at(1_700_000_100));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Downloaded);
    assert_eq!(fs::read(&f.local).unwrap(), b"new");
}

#[test]
fn equal_mtimes_do_nothing_even_if_contents_differ() {
    let f = fixture();
    write_at(&f.local, b"local", at(1_700_000_000));
    write_at(&f.remote, b"remote", at(1_700_000_000));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Unchanged);
    assert_eq!(fs::read(&f.local).unwrap(), b"local");
    assert_eq!(fs::read(&f.remote).unwrap(), b"remote");
}

#[test]
fn sub_second_differences_are_ignored() {
    let f = fixture();
    write_at(&f.local, b"local", at(1_700_000_000) + Duration::from_millis(900));
    write_at(&f.remote, b"remote", at(1_700_000_000) + Duration::from_millis(100));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Unchanged);
}

#[test]
fn second_sync_is_a_no_op() {
    let f = fixture();
    write_at(&f.local, b"datos1", at(1_700_000_000));

    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Uploaded);
    assert_eq!(f.engine.sync(&f.local).unwrap(), SyncOutcome::Unchanged);
}

// ---------------------------------------------------------------------------
// upload / download
// ---------------------------------------------------------------------------

#[test]
fn upload_missing_local_is_not_found() {
    let f = fixture();
    assert!(matches!(
        f.engine.upload(&f.local),
        Err(PassVaultError::NotFound(_))
    ));
}

#[test]
fn upload_overwrites_regardless_of_age() {
    let f = fixture();
    write_at(&f.remote, b"newer", at(1_800_000_000));
    write_at(&f.local, b"older", at(1_700_000_000));

    f.engine.upload(&f.local).unwrap();
    assert_eq!(fs::read(&f.remote).unwrap(), b"older");
}

#[test]
fn download_named_file() {
    let f = fixture();
    write_at(&f.remote, b"remote", at(1_700_000_000));

    let outcome = f.engine.download(&f.local, Some("vault.pvault")).unwrap();
    assert_eq!(outcome, DownloadOutcome::Downloaded("vault.pvault".into()));
    assert_eq!(fs::read(&f.local).unwrap(), b"remote");
}

#[test]
fn download_missing_name_is_not_found_and_leaves_local_alone() {
    let f = fixture();
    write_at(&f.local, b"keep me", at(1_700_000_000));

    let outcome = f.engine.download(&f.local, Some("other.pvault")).unwrap();
    assert_eq!(outcome, DownloadOutcome::NotFound);
    assert_eq!(fs::read(&f.local).unwrap(), b"keep me");
}

#[test]
fn download_from_empty_store_is_not_found() {
    let f = fixture();
    assert_eq!(f.engine.download(&f.local, None).unwrap(), DownloadOutcome::NotFound);
}

#[test]
fn download_without_name_takes_first_visible_file() {
    let f = fixture();
    let cloud = f.remote.parent().unwrap();
    write_at(&cloud.join(".hidden"), b"hidden", at(1));
    write_at(&cloud.join("b.pvault"), b"b", at(2));
    write_at(&cloud.join("a.pvault"), b"a", at(3));

    let outcome = f.engine.download(&f.local, None).unwrap();
    assert_eq!(outcome, DownloadOutcome::Downloaded("a.pvault".into()));
    assert_eq!(fs::read(&f.local).unwrap(), b"a");
}

#[test]
fn download_without_name_ignores_other_file_types() {
    let f = fixture();
    let cloud = f.remote.parent().unwrap();
    write_at(&cloud.join("README.txt"), b"notes", at(1));
    write_at(&cloud.join("backup"), b"old", at(2));
    write_at(&cloud.join("vault.pvault"), b"vault", at(3));

    let outcome = f.engine.download(&f.local, None).unwrap();
    assert_eq!(outcome, DownloadOutcome::Downloaded("vault.pvault".into()));
    assert_eq!(fs::read(&f.local).unwrap(), b"vault");
}

#[test]
fn download_without_name_finds_nothing_when_no_extension_matches() {
    let f = fixture();
    let cloud = f.remote.parent().unwrap();
    write_at(&cloud.join("README.txt"), b"notes", at(1));
    write_at(&f.local, b"mine", at(2));

    assert_eq!(f.engine.download(&f.local, None).unwrap(), DownloadOutcome::NotFound);
    assert_eq!(fs::read(&f.local).unwrap(), b"mine");
}

// ---------------------------------------------------------------------------
// Custom backend
// ---------------------------------------------------------------------------

/// Store that keeps everything in memory.
#[derive(Default)]
struct MemoryStore {
    files: RefCell<BTreeMap<String, RemoteFile>>,
}

impl RemoteStore for MemoryStore {
    fn put(&self, name: &str, bytes: &[u8], modified: SystemTime) -> Result<()> {
        self.files.borrow_mut().insert(
            name.to_string(),
            RemoteFile {
                bytes: bytes.to_vec(),
                modified,
            },
        );
        Ok(())
    }

    fn get(&self, name: &str) -> Result<RemoteFile> {
        self.files
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| PassVaultError::RemoteNotFound(name.to_string()))
    }

    fn stat(&self, name: &str) -> Result<Option<SystemTime>> {
        Ok(self.files.borrow().get(name).map(|f| f.modified))
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }
}

#[test]
fn engine_works_with_any_remote_store() {
    let tmp = TempDir::new().unwrap();
    let local = tmp.path().join("vault.pvault");
    let engine = SyncEngine::new(MemoryStore::default());

    write_at(&local, b"v1", at(1_700_000_000));
    assert_eq!(engine.sync(&local).unwrap(), SyncOutcome::Uploaded);
    assert_eq!(engine.store().get("vault.pvault").unwrap().bytes, b"v1");

    engine
        .store()
        .put("vault.pvault", b"v2", at(1_700_000_500))
        .unwrap();
    assert_eq!(engine.sync(&local).unwrap(), SyncOutcome::Downloaded);
    assert_eq!(fs::read(&local).unwrap(), b"v2");
    assert_eq!(mtime(&local), at(1_700_000_500));
}
