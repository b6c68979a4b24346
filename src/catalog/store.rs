//! Catalog Store
//!
//! Owns the in-memory catalog and its backing file.
//!
//! ## Responsibilities
//! - Load the persisted catalog once, refusing to start from a corrupt file
//! - Append batches of records and persist them together
//! - Merge user edits into one record's extra fields and persist
//! - Replace the catalog file atomically so readers never see a partial write
//!
//! ## Write Path
//! ```text
//! records ──serialize──▶ {path}.tmp ──fsync──▶ rename over {path} ──▶ fsync dir
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CatalogError, Result};

use super::CatalogRecord;

/// In-memory catalog bound to one file on disk
///
/// ## Addressing
/// Records are addressed by position. Nothing reorders or removes records,
/// so an index stays valid for the life of the catalog; a future delete or
/// sort feature would break every index a caller holds.
///
/// ## Consistency
/// A mutation that fails to persist is undone in memory, so `get_all()`
/// always matches the last successful write.
#[derive(Debug)]
pub struct CatalogStore {
    /// Catalog file
    path: PathBuf,

    /// Records in insertion order
    records: Vec<CatalogRecord>,
}

impl CatalogStore {
    /// Suffix of the temporary file used while replacing the catalog
    const TEMP_SUFFIX: &'static str = ".tmp";

    /// Load the catalog at `path`
    ///
    /// - No file: empty catalog
    /// - File that is not a JSON array of records (an empty file included):
    ///   [`CatalogError::CatalogCorrupt`]
    /// - Leftover temp file from an interrupted write: removed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let temp_path = Self::temp_path_for(&path);
        if temp_path.exists() {
            tracing::warn!(
                "Removing leftover temporary catalog {} from an interrupted write",
                temp_path.display()
            );
            if let Err(e) = fs::remove_file(&temp_path) {
                tracing::warn!("Could not remove {}: {}", temp_path.display(), e);
            }
        }

        let records = match fs::read(&path) {
            Ok(bytes) => Self::decode(&path, &bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No catalog at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Loaded {} records from {}", records.len(), path.display());

        Ok(Self { path, records })
    }

    /// Append `records` in the given order, then persist the whole catalog
    ///
    /// Returns the number of records appended.
    pub fn append_and_persist(&mut self, records: Vec<CatalogRecord>) -> Result<usize> {
        let previous_len = self.records.len();
        let added = records.len();
        self.records.extend(records);

        if let Err(e) = self.persist() {
            self.records.truncate(previous_len);
            return Err(e);
        }

        tracing::info!(
            "Appended {} records ({} total) to {}",
            added,
            self.records.len(),
            self.path.display()
        );
        Ok(added)
    }

    /// Merge `updates` into the extra fields of the record at `index`, then persist
    ///
    /// Typed fields are never rewritten. An out-of-range index fails with
    /// [`CatalogError::IndexOutOfRange`] before anything is touched.
    pub fn update_and_persist(
        &mut self,
        index: usize,
        updates: BTreeMap<String, String>,
    ) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })?;

        let previous = record.extra_fields.clone();
        let field_count = updates.len();
        record.merge_extra_fields(updates);

        if let Err(e) = self.persist() {
            self.records[index].extra_fields = previous;
            return Err(e);
        }

        tracing::debug!("Updated {} fields on record {}", field_count, index);
        Ok(())
    }

    /// Read-only view of every record; no I/O
    pub fn get_all(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Record at `index`, if any
    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Write the whole catalog to a temp file and rename it over the catalog
    fn persist(&self) -> Result<()> {
        let bytes = Self::encode(&self.records)?;
        let temp_path = Self::temp_path_for(&self.path);

        let written = Self::write_synced(&temp_path, &bytes)
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        // Make the rename itself durable
        Self::sync_parent_dir(&self.path);
        Ok(())
    }

    fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn sync_parent_dir(path: &Path) {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        // Directories cannot be opened for syncing on every platform
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    /// Pretty JSON, 4-space indent, matching the legacy catalog layout
    fn encode(records: &[CatalogRecord]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut serializer)
            .map_err(|e| CatalogError::Serialization(e.to_string()))?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn decode(path: &Path, bytes: &[u8]) -> Result<Vec<CatalogRecord>> {
        serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::CatalogCorrupt(format!("{}: {}", path.display(), e)))
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(Self::TEMP_SUFFIX);
        PathBuf::from(name)
    }
}
