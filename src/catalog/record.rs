//! Catalog record definitions
//!
//! The persisted shape of one extracted file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::Version;

/// Compression scheme of GIF image data (a property of the format, not measured)
pub const COMPRESSION_TYPE: &str = "LZW";

/// Byte order of GIF multi-byte fields (a property of the format, not measured)
pub const NUMERIC_FORMAT: &str = "Little Endian";

/// One entry in the catalog
///
/// The typed fields come from parsing and are never touched by edits.
/// User corrections go into `extra_fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Path the record was extracted from (not unique across the catalog)
    pub path: String,

    // -------------------------------------------------------------------------
    // Screen descriptor
    // -------------------------------------------------------------------------
    pub version: Version,
    pub width: u16,
    pub height: u16,
    pub has_global_color_table: bool,
    pub color_resolution: u8,
    pub global_color_table_size_exponent: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,

    /// 2^(color_resolution + 1) with a global color table, else 0
    pub color_count: u32,

    // -------------------------------------------------------------------------
    // File timestamps ("YYYY-MM-DD HH:MM:SS", local time)
    // -------------------------------------------------------------------------
    pub created_at: String,
    pub modified_at: String,

    // -------------------------------------------------------------------------
    // Format constants
    // -------------------------------------------------------------------------
    pub compression_type: String,
    pub numeric_format: String,

    // -------------------------------------------------------------------------
    // Data stream
    // -------------------------------------------------------------------------
    pub image_count: u32,
    pub comments: Vec<String>,

    /// User-edited fields, merged by `CatalogStore::update_and_persist`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_fields: BTreeMap<String, String>,
}

impl CatalogRecord {
    /// Merge field updates into `extra_fields`, overwriting existing keys
    pub fn merge_extra_fields(&mut self, updates: BTreeMap<String, String>) {
        self.extra_fields.extend(updates);
    }

    /// Look up an edited field
    pub fn extra_field(&self, key: &str) -> Option<&str> {
        self.extra_fields.get(key).map(String::as_str)
    }
}
