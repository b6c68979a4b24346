//! Engine Module
//!
//! Coordinates discovery, parsing and the catalog store.
//!
//! ## Responsibilities
//! - Load the catalog on open
//! - Scan a folder: enumerate, parse each file, append the batch once
//! - Keep per-file failures out of the batch without aborting it
//! - Serialize every catalog mutation

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::catalog::{CatalogRecord, CatalogStore};
use crate::config::Config;
use crate::discovery;
use crate::error::{CatalogError, Result};
use crate::format::{self, ScanMode};
use crate::metadata::{self, FileTimestamps};

/// A file that could not be turned into a record
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: CatalogError,
}

/// Outcome of one folder scan
#[derive(Debug)]
pub struct ScanReport {
    /// Records appended to the catalog, in discovery order
    pub appended: Vec<CatalogRecord>,

    /// Files skipped, in discovery order
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Number of candidate files the scan looked at
    pub fn candidates(&self) -> usize {
        self.appended.len() + self.failures.len()
    }
}

/// The catalog engine
///
/// ## Concurrency Model
///
/// - **Parsing**: files are independent; with `parse_threads > 1` a scan
///   spreads them over scoped worker threads and keeps discovery order.
/// - **Catalog**: the store sits behind one mutex. Each append or update
///   holds it through the in-memory change and the durable write, so at most
///   one mutation is in flight.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Catalog and its backing file
    store: Mutex<CatalogStore>,
}

impl Engine {
    /// Open the engine, loading the catalog named by `config`
    ///
    /// Fails with [`CatalogError::CatalogCorrupt`] when the catalog file
    /// exists but cannot be decoded.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        // Step 1: Make sure the catalog's directory exists
        if let Some(parent) = config.catalog_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Step 2: Load the persisted catalog (or start empty)
        let store = CatalogStore::load(&config.catalog_path)?;

        Ok(Self {
            config,
            store: Mutex::new(store),
        })
    }

    /// Open with a catalog path (convenience method)
    ///
    /// Uses default config with the specified catalog file
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.catalog_path = path.to_path_buf();
        Self::open(config)
    }

    /// Parse one file into a record without touching the catalog
    pub fn extract(&self, path: &Path) -> Result<CatalogRecord> {
        extract_file(path, self.config.scan_mode)
    }

    /// Scan `root` recursively and append every parsable file to the catalog
    ///
    /// Steps:
    /// 1. Enumerate candidate files
    /// 2. Parse each one (failures are collected, not raised)
    /// 3. Append all records and persist once
    ///
    /// Only enumeration and the final write can fail the whole scan. If no
    /// file parses, the catalog is left as it was.
    pub fn scan_folder(&self, root: &Path) -> Result<ScanReport> {
        // Step 1: Enumerate
        let candidates = discovery::enumerate_candidate_files(
            root,
            &self.config.extensions,
            self.config.follow_links,
        )?;

        tracing::info!(
            "Scanning {} candidate files under {}",
            candidates.len(),
            root.display()
        );

        // Step 2: Parse
        let outcomes = self.extract_all(&candidates)?;

        let mut appended = Vec::new();
        let mut failures = Vec::new();
        for (path, outcome) in candidates.into_iter().zip(outcomes) {
            match outcome {
                Ok(record) => appended.push(record),
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", path.display(), error);
                    failures.push(ScanFailure { path, error });
                }
            }
        }

        // Step 3: Persist the batch as a whole
        if appended.is_empty() {
            tracing::info!("Nothing to append from {}", root.display());
        } else {
            self.store.lock().append_and_persist(appended.clone())?;
        }

        Ok(ScanReport { appended, failures })
    }

    /// Snapshot of every record
    pub fn get_all(&self) -> Vec<CatalogRecord> {
        self.store.lock().get_all().to_vec()
    }

    /// Record at `index`, if any
    pub fn record(&self, index: usize) -> Option<CatalogRecord> {
        self.store.lock().get(index).cloned()
    }

    /// Merge user-edited fields into the record at `index` and persist
    pub fn update_record(&self, index: usize, updates: BTreeMap<String, String>) -> Result<()> {
        self.store.lock().update_and_persist(index, updates)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Get the catalog file path
    pub fn catalog_path(&self) -> &Path {
        &self.config.catalog_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Parse every path, sequentially or across scoped worker threads.
    /// Outcomes line up with `paths`.
    fn extract_all(&self, paths: &[PathBuf]) -> Result<Vec<Result<CatalogRecord>>> {
        let mode = self.config.scan_mode;
        let threads = self.config.parse_threads.min(paths.len()).max(1);

        if threads == 1 {
            return Ok(paths.iter().map(|path| extract_file(path, mode)).collect());
        }

        let chunk_size = paths.len().div_ceil(threads);

        crossbeam::thread::scope(|scope| -> Result<Vec<Result<CatalogRecord>>> {
            let handles: Vec<_> = paths
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move |_| {
                        chunk
                            .iter()
                            .map(|path| extract_file(path, mode))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(paths.len());
            for handle in handles {
                let chunk_outcomes = handle.join().map_err(|_| {
                    CatalogError::WorkerPanicked("parse worker exited abnormally".to_string())
                })?;
                outcomes.extend(chunk_outcomes);
            }
            Ok(outcomes)
        })
        .map_err(|_| CatalogError::WorkerPanicked("parse worker scope failed".to_string()))?
    }
}

/// Read, parse and assemble one file
///
/// Errors (`Io`, `InvalidSignature`, `Truncated`) concern this file only.
pub fn extract_file(path: &Path, mode: ScanMode) -> Result<CatalogRecord> {
    let data = fs::read(path)?;
    let parsed = format::parse_gif(data, mode)?;

    if !parsed.scan.is_complete() {
        tracing::debug!(
            "{}: data stream ended early ({:?}), keeping partial scan",
            path.display(),
            parsed.scan.end
        );
    }

    let timestamps = FileTimestamps::from_path(path)?;

    tracing::debug!(
        "Parsed {}: {} {}x{}, {} images, {} comments",
        path.display(),
        parsed.descriptor.version,
        parsed.descriptor.width,
        parsed.descriptor.height,
        parsed.scan.image_count,
        parsed.scan.comments.len()
    );

    Ok(metadata::assemble(
        &parsed.descriptor,
        parsed.scan,
        timestamps,
        path.to_string_lossy(),
    ))
}
