//! Error types for gifcatalog
//!
//! Provides a unified error type for parsing and catalog operations.

use thiserror::Error;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Unified error type for gifcatalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Parse Errors (scoped to a single file)
    // -------------------------------------------------------------------------
    #[error("Invalid signature: {:?}", String::from_utf8_lossy(.0))]
    InvalidSignature([u8; 6]),

    #[error("Truncated data at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("Catalog corrupt: {0}")]
    CatalogCorrupt(String),

    #[error("Record index {index} out of range (catalog holds {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Parse worker panicked: {0}")]
    WorkerPanicked(String),
}

impl CatalogError {
    /// True for errors that only concern one candidate file.
    ///
    /// A folder scan records these and moves on to the next file.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            CatalogError::Io(_) | CatalogError::InvalidSignature(_) | CatalogError::Truncated { .. }
        )
    }
}
