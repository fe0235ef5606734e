// tests/integration_backup.rs
use codesweep_core::backup::BackupManager;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_backup_and_restore() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let file = root.join("keep.txt");
    fs::write(&file, "original").unwrap();

    let mut backup = BackupManager::new(&root);
    backup.backup(&file).unwrap();
    fs::write(&file, "mutated").unwrap();

    assert!(backup.restore(&file));
    assert_eq!(fs::read_to_string(&file).unwrap(), "original");
}

#[test]
fn test_backup_is_idempotent_per_batch() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let file = root.join("keep.txt");
    fs::write(&file, "first").unwrap();

    let mut backup = BackupManager::new(&root);
    backup.backup(&file).unwrap();
    // A second edit in the same batch must not overwrite the snapshot.
    fs::write(&file, "second").unwrap();
    backup.backup(&file).unwrap();

    assert_eq!(backup.backed_up_count(), 1);
    backup.restore(&file);
    assert_eq!(fs::read_to_string(&file).unwrap(), "first");
}

#[test]
fn test_restore_all_reports_counts() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let a = root.join("a.txt");
    let b = root.join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let mut backup = BackupManager::new(&root);
    backup.backup(&a).unwrap();
    backup.backup(&b).unwrap();
    fs::remove_file(&a).unwrap();
    fs::remove_file(&b).unwrap();

    let (restored, failed) = backup.restore_all();
    assert_eq!(restored, 2);
    assert_eq!(failed, 0);
    assert!(a.exists());
    assert!(b.exists());
}

#[test]
fn test_cleanup_removes_backup_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let file = root.join("keep.txt");
    fs::write(&file, "original").unwrap();

    let mut backup = BackupManager::new(&root);
    backup.backup(&file).unwrap();
    assert!(backup.backup_dir().exists());

    backup.cleanup();
    assert!(!backup.backup_dir().exists());
}

#[test]
fn test_restore_unknown_file_is_false() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();

    let backup = BackupManager::new(&root);
    assert!(!backup.restore(&root.join("never-backed-up.txt")));
}
