// src/backup.rs
//! Snapshot-before-mutate backup for the cleanup workflow.
//!
//! Originals are copied into a timestamped directory under the project root
//! as flat name-mangled files, with a manifest of original to backup path.
//! A failed batch is restored best-effort with `restore_all`.

use crate::error::{Result, SweepError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const BACKUP_ROOT: &str = ".codesweep-backup";

pub struct BackupManager {
    backup_dir: PathBuf,
    manifest: HashMap<PathBuf, PathBuf>,
}

impl BackupManager {
    #[must_use]
    pub fn new(root_dir: &Path) -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            backup_dir: root_dir.join(BACKUP_ROOT).join(stamp.to_string()),
            manifest: HashMap::new(),
        }
    }

    /// Snapshots a file before modification. Idempotent: a file already in
    /// the manifest is not re-copied, so the first (pre-mutation) snapshot
    /// survives repeated edits in one batch.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the snapshot written.
    pub fn backup(&mut self, file_path: &Path) -> Result<()> {
        if self.manifest.contains_key(file_path) {
            return Ok(());
        }

        fs::create_dir_all(&self.backup_dir).map_err(|source| SweepError::Io {
            source,
            path: self.backup_dir.clone(),
        })?;

        // /foo/bar/baz.ts -> foo__bar__baz.ts, flat so no nested dirs needed
        let safe_name: String = file_path
            .to_string_lossy()
            .replace(['/', '\\', ':'], "__");
        let backup_path = self.backup_dir.join(safe_name);

        fs::copy(file_path, &backup_path).map_err(|source| SweepError::Io {
            source,
            path: file_path.to_path_buf(),
        })?;

        self.manifest.insert(file_path.to_path_buf(), backup_path);
        Ok(())
    }

    /// Restores a single file from its snapshot.
    pub fn restore(&self, file_path: &Path) -> bool {
        let Some(backup_path) = self.manifest.get(file_path) else {
            return false;
        };
        fs::copy(backup_path, file_path).is_ok()
    }

    /// Rolls back every backed-up file. Used when a batch fails partway.
    pub fn restore_all(&self) -> (usize, usize) {
        let mut restored = 0;
        let mut failed = 0;
        for file_path in self.manifest.keys() {
            if self.restore(file_path) {
                restored += 1;
            } else {
                failed += 1;
            }
        }
        (restored, failed)
    }

    /// Removes the backup directory after a fully successful batch.
    /// Non-critical: leftovers can be cleaned manually.
    pub fn cleanup(&self) {
        if self.backup_dir.exists() {
            let _ = fs::remove_dir_all(&self.backup_dir);
        }
    }

    #[must_use]
    pub fn backed_up_count(&self) -> usize {
        self.manifest.len()
    }

    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}
