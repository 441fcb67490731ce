//! JSON document store.
//!
//! # Responsibility
//! - Persist the collection as one JSON array of `{name, checked}` objects.
//! - Replace the document atomically (temp file + rename) on every write.
//!
//! # Invariants
//! - Readers never observe a partially written document.
//! - `checked` is stored as a native JSON boolean.
//! - A missing or unparsable document is `StoreError::Unavailable` on read.

use super::{apply_checked, ItemStore, StoreError, StoreResult, UpdateOutcome};
use crate::model::item::Item;
use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EMPTY_DOCUMENT: &str = "[]\n";

/// Store backed by a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens the document at `path`, creating an empty list when absent.
    ///
    /// An existing file is left untouched, even if it is not valid JSON; the
    /// read path reports that as unavailable instead.
    ///
    /// # Side effects
    /// - May create the parent directory and the document file.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let path = path.as_ref().to_path_buf();
        info!("event=store_open module=store status=start backend=json");

        if !path.exists() {
            if let Err(err) = bootstrap_document(&path) {
                error!(
                    "event=store_open module=store status=error backend=json duration_ms={} error_code=store_bootstrap_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        }

        info!(
            "event=store_open module=store status=ok backend=json duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { path })
    }

    /// Wraps `path` without touching the filesystem.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_for_write(&self) -> StoreResult<Vec<Item>> {
        self.load_all()
            .map_err(|err| StoreError::write_failed(err.to_string()))
    }

    fn write_document(&self, items: &[Item]) -> StoreResult<()> {
        let mut body = serde_json::to_string_pretty(items)
            .map_err(|err| StoreError::write_failed(format!("failed to encode items: {err}")))?;
        body.push('\n');
        atomic_write(&self.path, body.as_bytes())
    }
}

impl ItemStore for JsonFileStore {
    fn load_all(&self) -> StoreResult<Vec<Item>> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            StoreError::unavailable(format!(
                "failed to read `{}`: {err}",
                self.path.display()
            ))
        })?;

        serde_json::from_str::<Vec<Item>>(&raw).map_err(|err| {
            StoreError::unavailable(format!(
                "invalid list document `{}`: {err}",
                self.path.display()
            ))
        })
    }

    fn append_one(&self, item: &Item) -> StoreResult<()> {
        let mut items = self.read_for_write()?;
        items.push(item.clone());
        self.write_document(&items)
    }

    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome> {
        let mut items = self.read_for_write()?;
        let outcome = apply_checked(&mut items, name, checked);
        if outcome == UpdateOutcome::Applied {
            self.write_document(&items)?;
        }
        Ok(outcome)
    }

    fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        self.write_document(items)
    }
}

fn bootstrap_document(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            StoreError::write_failed(format!(
                "failed to create store directory `{}`: {err}",
                parent.display()
            ))
        })?;
    }
    atomic_write(path, EMPTY_DOCUMENT.as_bytes())
}

/// Writes `content` to a fresh sibling temp file, syncs it, then renames it
/// over `path`.
///
/// Each call gets its own temp file, so overlapping writers in one process
/// never share a half-written file.
fn atomic_write(path: &Path, content: &[u8]) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shoplist".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|err| {
            StoreError::write_failed(format!(
                "failed to create temp file in `{}`: {err}",
                dir.display()
            ))
        })?;

    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|err| {
            StoreError::write_failed(format!(
                "failed to write temp file `{}`: {err}",
                temp.path().display()
            ))
        })?;

    temp.persist(path).map_err(|err| {
        StoreError::write_failed(format!(
            "failed to replace `{}`: {}",
            path.display(),
            err.error
        ))
    })?;
    Ok(())
}
