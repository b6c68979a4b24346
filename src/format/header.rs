//! Header Parser
//!
//! Decodes the signature and the Logical Screen Descriptor.
//!
//! ## Layout (13 bytes)
//! ```text
//! ┌──────────┬───────┬────────┬────────┬────────┬─────────┐
//! │ Sig (6)  │ W (2) │ H (2)  │ Pk (1) │ Bg (1) │ Asp (1) │
//! └──────────┴───────┴────────┴────────┴────────┴─────────┘
//!
//! Packed byte:  7 │ 6 5 4 │ 3 │ 2 1 0
//!              GCT│ColRes │Srt│GCT size
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

use super::ByteCursor;

/// Signature (6) + logical screen descriptor (7)
pub const HEADER_SIZE: usize = 13;

const GCT_FLAG: u8 = 0b1000_0000;
const COLOR_RESOLUTION_MASK: u8 = 0b0111_0000;
const SORT_FLAG: u8 = 0b0000_1000;
const GCT_SIZE_MASK: u8 = 0b0000_0111;

// =============================================================================
// Version
// =============================================================================

/// Recognized format revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "GIF87a")]
    Gif87a,
    #[serde(rename = "GIF89a")]
    Gif89a,
}

impl Version {
    /// The 6-byte signature for this revision
    pub fn signature(&self) -> &'static [u8; 6] {
        match self {
            Version::Gif87a => b"GIF87a",
            Version::Gif89a => b"GIF89a",
        }
    }

    /// Match a signature against the recognized revisions
    pub fn from_signature(signature: &[u8; 6]) -> Option<Self> {
        match signature {
            b"GIF87a" => Some(Version::Gif87a),
            b"GIF89a" => Some(Version::Gif89a),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Gif87a => f.write_str("GIF87a"),
            Version::Gif89a => f.write_str("GIF89a"),
        }
    }
}

// =============================================================================
// Screen Descriptor
// =============================================================================

/// Decoded signature + logical screen descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDescriptor {
    pub version: Version,
    pub width: u16,
    pub height: u16,
    pub has_global_color_table: bool,
    /// Bits per primary color, 1..=8
    pub color_resolution: u8,
    /// Informational only
    pub sort_flag: bool,
    /// 0..=7; the table holds 2^(exponent+1) RGB entries
    pub global_color_table_size_exponent: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
}

impl ScreenDescriptor {
    /// Byte length of the global color table that follows the descriptor
    /// (0 when no table is present)
    pub fn global_color_table_len(&self) -> usize {
        if self.has_global_color_table {
            color_table_len(self.global_color_table_size_exponent)
        } else {
            0
        }
    }

    /// Derived palette size recorded in the catalog:
    /// 2^(color_resolution + 1) with a global table, 0 without
    pub fn color_count(&self) -> u32 {
        if self.has_global_color_table {
            1u32 << (u32::from(self.color_resolution) + 1)
        } else {
            0
        }
    }
}

/// Length in bytes of a color table with the given 3-bit size field
pub(crate) fn color_table_len(size_exponent: u8) -> usize {
    3 * (1usize << (usize::from(size_exponent & GCT_SIZE_MASK) + 1))
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse the 13-byte header from a cursor positioned at offset 0
///
/// Advances the cursor by exactly [`HEADER_SIZE`] on success. Width and
/// height are passed through unvalidated, zero included.
pub fn parse_header(cursor: &mut ByteCursor) -> Result<ScreenDescriptor> {
    // All 13 bytes or nothing
    if cursor.remaining() < HEADER_SIZE {
        return Err(CatalogError::Truncated {
            offset: cursor.position(),
            needed: HEADER_SIZE,
            available: cursor.remaining(),
        });
    }

    let signature: [u8; 6] = cursor.read_array()?;
    let version =
        Version::from_signature(&signature).ok_or(CatalogError::InvalidSignature(signature))?;

    let width = cursor.read_u16_le()?;
    let height = cursor.read_u16_le()?;
    let packed = cursor.read_u8()?;
    let background_color_index = cursor.read_u8()?;
    let pixel_aspect_ratio = cursor.read_u8()?;

    Ok(ScreenDescriptor {
        version,
        width,
        height,
        has_global_color_table: packed & GCT_FLAG != 0,
        color_resolution: ((packed & COLOR_RESOLUTION_MASK) >> 4) + 1,
        sort_flag: packed & SORT_FLAG != 0,
        global_color_table_size_exponent: packed & GCT_SIZE_MASK,
        background_color_index,
        pixel_aspect_ratio,
    })
}

/// Step over the global color table, if the descriptor announces one
///
/// Must run between [`parse_header`] and the block scan; the data stream
/// starts right after the table.
pub fn skip_global_color_table(cursor: &mut ByteCursor, descriptor: &ScreenDescriptor) -> Result<()> {
    let len = descriptor.global_color_table_len();
    if len > 0 {
        cursor.skip(len)?;
    }
    Ok(())
}
