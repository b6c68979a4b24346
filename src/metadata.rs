//! Metadata Assembly
//!
//! Combines a parsed descriptor, a block scan and file facts into a
//! [`CatalogRecord`].

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::catalog::{CatalogRecord, COMPRESSION_TYPE, NUMERIC_FORMAT};
use crate::error::Result;
use crate::format::{BlockScanResult, ScreenDescriptor};

/// Format of catalog timestamps (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creation and modification times of a file, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTimestamps {
    pub created_at: String,
    pub modified_at: String,
}

impl FileTimestamps {
    pub fn new(created_at: impl Into<String>, modified_at: impl Into<String>) -> Self {
        Self {
            created_at: created_at.into(),
            modified_at: modified_at.into(),
        }
    }

    /// Read timestamps from the filesystem
    ///
    /// Filesystems without a birth time report the modification time as
    /// the creation time.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)?;
        let modified = meta.modified()?;
        let created = meta.created().unwrap_or(modified);

        Ok(Self {
            created_at: format_timestamp(created),
            modified_at: format_timestamp(modified),
        })
    }
}

/// Render a system time in local time as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIMESTAMP_FORMAT).to_string()
}

/// Build a catalog record. Pure: no I/O, cannot fail.
pub fn assemble(
    descriptor: &ScreenDescriptor,
    scan: BlockScanResult,
    timestamps: FileTimestamps,
    path: impl Into<String>,
) -> CatalogRecord {
    CatalogRecord {
        path: path.into(),
        version: descriptor.version,
        width: descriptor.width,
        height: descriptor.height,
        has_global_color_table: descriptor.has_global_color_table,
        color_resolution: descriptor.color_resolution,
        global_color_table_size_exponent: descriptor.global_color_table_size_exponent,
        background_color_index: descriptor.background_color_index,
        pixel_aspect_ratio: descriptor.pixel_aspect_ratio,
        color_count: descriptor.color_count(),
        created_at: timestamps.created_at,
        modified_at: timestamps.modified_at,
        compression_type: COMPRESSION_TYPE.to_string(),
        numeric_format: NUMERIC_FORMAT.to_string(),
        image_count: scan.image_count,
        comments: scan.comments,
        extra_fields: Default::default(),
    }
}
