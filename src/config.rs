//! Configuration for gifcatalog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{CatalogError, Result};
use crate::format::ScanMode;

/// Main configuration for a catalog engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Catalog Configuration
    // -------------------------------------------------------------------------
    /// Path of the persisted catalog (a JSON array of records).
    /// Temporary files for atomic replacement live next to it:
    ///   {catalog_path}       (current catalog)
    ///   {catalog_path}.tmp   (in-flight write, renamed over the catalog)
    pub catalog_path: PathBuf,

    // -------------------------------------------------------------------------
    // Discovery Configuration
    // -------------------------------------------------------------------------
    /// File extensions (without the dot) treated as candidates, matched
    /// case-insensitively
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking a folder
    pub follow_links: bool,

    // -------------------------------------------------------------------------
    // Parser Configuration
    // -------------------------------------------------------------------------
    /// How image descriptors are stepped over by the block scanner
    pub scan_mode: ScanMode,

    /// Worker threads used to parse files during a folder scan (1 = sequential)
    pub parse_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("gif_data.json"),
            extensions: vec!["gif".to_string()],
            follow_links: true,
            scan_mode: ScanMode::Traverse,
            parse_threads: 1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values a builder cannot rule out by type alone
    pub fn validate(&self) -> Result<()> {
        if self.parse_threads == 0 {
            return Err(CatalogError::Config(
                "parse_threads must be at least 1".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(CatalogError::Config(
                "at least one candidate extension is required".to_string(),
            ));
        }
        if self.extensions.iter().any(|ext| ext.is_empty() || ext.starts_with('.')) {
            return Err(CatalogError::Config(format!(
                "extensions must be non-empty and given without a leading dot: {:?}",
                self.extensions
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the catalog file path
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog_path = path.into();
        self
    }

    /// Replace the candidate extensions
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Follow symbolic links during discovery
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.config.follow_links = follow;
        self
    }

    /// Set how the block scanner treats image descriptors
    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.config.scan_mode = mode;
        self
    }

    /// Set the number of parse worker threads
    pub fn parse_threads(mut self, threads: usize) -> Self {
        self.config.parse_threads = threads;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
