//! # Durable Storage
//!
//! A [`KeyValueStore`] backed by a single JSON file. Every write replaces the
//! whole file through a temporary sibling, so the on-disk copy always matches
//! memory after `set` returns and a crash mid-write leaves the old copy intact.

use super::KeyValueStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the durable store inside the data directory
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Durable key-value store persisted as `storage.json`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store in `data_dir`, creating the directory if needed.
    ///
    /// A missing file yields an empty store. An unreadable or corrupted file
    /// is an error: the caller decides whether to continue without it.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let path = data_dir.join(STORAGE_FILE_NAME);
        let entries = if path.exists() {
            load_entries(&path)?
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "Opened durable store at {} ({} keys)",
            path.display(),
            entries.len()
        );

        Ok(Self { path, entries })
    }

    /// Like [`FileStore::open`], but a corrupted file is moved aside to
    /// `storage.json.corrupt` and an empty store is opened in its place.
    ///
    /// Returns the backup path when that happened, so the caller can tell the
    /// user where their old data went.
    pub fn open_or_reset(data_dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        match Self::open(data_dir) {
            Ok(store) => Ok((store, None)),
            Err(e) => {
                let path = data_dir.join(STORAGE_FILE_NAME);
                if !path.exists() {
                    return Err(e);
                }
                log::warn!("Resetting unreadable storage: {:#}", e);
                let backup = data_dir.join(format!("{}.corrupt", STORAGE_FILE_NAME));
                fs::rename(&path, &backup).with_context(|| {
                    format!("Failed to move corrupted storage to {}", backup.display())
                })?;
                Ok((Self::open(data_dir)?, Some(backup)))
            }
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize storage entries")?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp.write_all(json.as_bytes())
            .context("Failed to write storage entries")?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write storage file: {}", self.path.display()))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Get the XDG-compliant data directory for quotebox
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "quotebox")
        .context("Failed to determine application data directory")?;

    Ok(proj_dirs.data_dir().to_path_buf())
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read storage file: {}", path.display()))?;

    let entries = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse storage file: {}", path.display()))?;

    Ok(entries)
}
