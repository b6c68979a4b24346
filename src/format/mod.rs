//! GIF Format Module
//!
//! Reads the structural parts of a GIF file without decoding pixels.
//!
//! ## File Layout
//! ```text
//! ┌──────────────┬──────────────────────────────┬──────────────────────┐
//! │ Signature (6)│ Logical Screen Descriptor (7)│ Global Color Table   │
//! │ GIF87a/89a   │ W(2) H(2) Pk(1) Bg(1) Asp(1) │ 3 × 2^(N+1), optional│
//! └──────────────┴──────────────────────────────┴──────────────────────┘
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ Data Stream: sequence of blocks, each starting with an introducer   │
//! │   0x2C  Image Descriptor  (9) [+ LCT] [+ LZW min (1) + sub-blocks]  │
//! │   0x21  Extension: label (1) + sub-blocks                           │
//! │   0x3B  Trailer                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Sub-block chain
//! ```text
//! ┌────────┬──────────┬────────┬──────────┬─────┬──────┐
//! │ Len (1)│ Len bytes│ Len (1)│ Len bytes│ ... │ 0x00 │
//! └────────┴──────────┴────────┴──────────┴─────┴──────┘
//! ```

mod cursor;
mod header;
mod scanner;

pub use cursor::ByteCursor;
pub use header::{parse_header, skip_global_color_table, ScreenDescriptor, Version, HEADER_SIZE};
pub use scanner::{BlockScanResult, BlockScanner, ScanEnd, ScanMode};

use bytes::Bytes;

use crate::error::Result;

// =============================================================================
// Wire Constants
// =============================================================================

/// Introducer of an Image Descriptor block
pub const IMAGE_DESCRIPTOR: u8 = 0x2C;

/// Introducer of an Extension block
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Marks the logical end of the data stream
pub const TRAILER: u8 = 0x3B;

/// Extension label for Comment extensions
pub const COMMENT_LABEL: u8 = 0xFE;

/// Size of an image descriptor after its introducer:
/// left (2) + top (2) + width (2) + height (2) + packed (1)
pub const IMAGE_DESCRIPTOR_SIZE: usize = 9;

// =============================================================================
// Parse Pipeline
// =============================================================================

/// Everything read out of one GIF buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGif {
    pub descriptor: ScreenDescriptor,
    pub scan: BlockScanResult,
}

/// Parse a whole GIF buffer: header, global color table skip, block scan.
///
/// Fails only when the header itself is unreadable. A file that ends inside
/// the global color table yields an empty scan result ending in
/// [`ScanEnd::Truncated`].
pub fn parse_gif(data: impl Into<Bytes>, mode: ScanMode) -> Result<ParsedGif> {
    let mut cursor = ByteCursor::new(data);

    let descriptor = parse_header(&mut cursor)?;

    let scan = match skip_global_color_table(&mut cursor, &descriptor) {
        Ok(()) => BlockScanner::new(mode).scan(&mut cursor),
        Err(e) => {
            tracing::debug!("Global color table cut short: {}", e);
            BlockScanResult::truncated()
        }
    };

    Ok(ParsedGif { descriptor, scan })
}
