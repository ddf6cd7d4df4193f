// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! File-backed visibility cache
//!
//! Pending requests are kept in a single JSON object keyed by user ID.
//! Every change rewrites the file atomically (temp file, then rename) so a
//! crash never leaves a partial file behind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{CacheError, CacheResult, VisibilityCache};
use crate::contact::{ContactInfo, RequireVisibleUser};
use crate::context::SyncContext;

/// Visibility cache persisted to a JSON file.
pub struct FileVisibilityCache {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileVisibilityCache {
    /// Creates a cache stored at `path`.
    ///
    /// Creates the parent directory if it doesn't exist. The file itself is
    /// only written on the first change; a missing file reads as empty.
    pub fn new(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CacheResult<BTreeMap<String, RequireVisibleUser>> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    fn save(&self, entries: &BTreeMap<String, RequireVisibleUser>) -> CacheResult<()> {
        let data = serde_json::to_string_pretty(entries)?;
        atomic_write(&self.path, data.as_bytes())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, RequireVisibleUser>) -> (T, bool),
    ) -> CacheResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CacheError::Unavailable("lock poisoned".into()))?;

        let mut entries = self.load()?;
        let (result, changed) = f(&mut entries);
        if changed {
            self.save(&entries)?;
        }
        Ok(result)
    }
}

impl VisibilityCache for FileVisibilityCache {
    fn set_require_visible_user(
        &self,
        ctx: &SyncContext,
        contact: &ContactInfo,
    ) -> CacheResult<()> {
        ctx.check()?;
        self.modify(|entries| {
            entries.insert(contact.user_id.clone(), RequireVisibleUser::from(contact));
            ((), true)
        })
    }

    fn require_visible_users(
        &self,
        ctx: &SyncContext,
    ) -> CacheResult<HashMap<String, RequireVisibleUser>> {
        ctx.check()?;
        Ok(self.load()?.into_iter().collect())
    }

    fn remove_require_visible_user(&self, ctx: &SyncContext, user_id: &str) -> CacheResult<bool> {
        ctx.check()?;
        self.modify(|entries| {
            let removed = entries.remove(user_id).is_some();
            (removed, removed)
        })
    }
}

/// Atomic file write (write to temp, then rename)
fn atomic_write(path: &Path, data: &[u8]) -> CacheResult<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, data)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
