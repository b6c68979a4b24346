//! Block Scanner
//!
//! Walks the data stream after the global color table, counting image
//! descriptors and collecting comment extensions.
//!
//! The scanner never fails. Anything it cannot make sense of ends the scan
//! and the caller gets whatever was gathered up to that point, along with a
//! [`ScanEnd`] saying why it stopped.

use crate::error::Result;

use super::header::color_table_len;
use super::{
    ByteCursor, COMMENT_LABEL, EXTENSION_INTRODUCER, IMAGE_DESCRIPTOR, IMAGE_DESCRIPTOR_SIZE,
    TRAILER,
};

/// Local color table flag in an image descriptor's packed byte
const LCT_FLAG: u8 = 0b1000_0000;

/// How the scanner steps over an image descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Skip only the 9 descriptor bytes. Frames are counted structurally;
    /// a descriptor followed by real image data stops the scan at the LZW
    /// code size byte.
    Structural,

    /// Also skip the local color table and the image-data sub-block chain,
    /// so every frame of a real file is reached.
    #[default]
    Traverse,
}

/// Why a scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// Reached the 0x3B trailer
    Trailer,
    /// Read a byte that is not a known block introducer
    UnknownIntroducer(u8),
    /// Ran out of bytes between blocks
    EndOfStream,
    /// Ran out of bytes inside a block
    Truncated,
}

/// What a scan found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScanResult {
    pub image_count: u32,
    /// Comment texts in stream order
    pub comments: Vec<String>,
    pub end: ScanEnd,
}

impl BlockScanResult {
    /// Empty result for a stream that was cut before any block
    pub fn truncated() -> Self {
        Self {
            image_count: 0,
            comments: Vec::new(),
            end: ScanEnd::Truncated,
        }
    }

    /// True if the scan reached the trailer
    pub fn is_complete(&self) -> bool {
        self.end == ScanEnd::Trailer
    }
}

/// Data-stream scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockScanner {
    mode: ScanMode,
}

impl BlockScanner {
    pub fn new(mode: ScanMode) -> Self {
        Self { mode }
    }

    /// Scanner that only steps over the fixed descriptor fields
    pub fn structural() -> Self {
        Self::new(ScanMode::Structural)
    }

    /// Scanner that steps over whole image payloads
    pub fn traversing() -> Self {
        Self::new(ScanMode::Traverse)
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Scan blocks until the trailer, an unknown byte, or the end of input
    ///
    /// The cursor must sit right after the descriptor and the global color
    /// table (see [`super::skip_global_color_table`]).
    pub fn scan(&self, cursor: &mut ByteCursor) -> BlockScanResult {
        let mut image_count = 0u32;
        let mut comments = Vec::new();

        let end = loop {
            let introducer = match cursor.read_u8() {
                Ok(byte) => byte,
                Err(_) => break ScanEnd::EndOfStream,
            };

            match introducer {
                IMAGE_DESCRIPTOR => {
                    image_count = image_count.saturating_add(1);
                    if self.skip_image(cursor).is_err() {
                        break ScanEnd::Truncated;
                    }
                }
                EXTENSION_INTRODUCER => {
                    let label = match cursor.read_u8() {
                        Ok(label) => label,
                        Err(_) => break ScanEnd::Truncated,
                    };

                    if label == COMMENT_LABEL {
                        let mut text = Vec::new();
                        let complete = read_sub_blocks(cursor, &mut text).is_ok();
                        // A comment cut short keeps what was read of it
                        if complete || !text.is_empty() {
                            comments.push(decode_text(&text));
                        }
                        if !complete {
                            break ScanEnd::Truncated;
                        }
                    } else if skip_sub_blocks(cursor).is_err() {
                        break ScanEnd::Truncated;
                    }
                }
                TRAILER => break ScanEnd::Trailer,
                other => break ScanEnd::UnknownIntroducer(other),
            }
        };

        tracing::trace!(
            "Block scan ended at offset {} ({:?}): {} images, {} comments",
            cursor.position(),
            end,
            image_count,
            comments.len()
        );

        BlockScanResult {
            image_count,
            comments,
            end,
        }
    }

    /// Step over one image, starting after its 0x2C introducer
    fn skip_image(&self, cursor: &mut ByteCursor) -> Result<()> {
        match self.mode {
            ScanMode::Structural => cursor.skip(IMAGE_DESCRIPTOR_SIZE),
            ScanMode::Traverse => {
                // left, top, width, height
                cursor.skip(IMAGE_DESCRIPTOR_SIZE - 1)?;
                let packed = cursor.read_u8()?;
                if packed & LCT_FLAG != 0 {
                    cursor.skip(color_table_len(packed))?;
                }
                // LZW minimum code size, then the compressed data
                cursor.skip(1)?;
                skip_sub_blocks(cursor)
            }
        }
    }
}

// =============================================================================
// Sub-block Helpers
// =============================================================================

/// Append the payload of a sub-block chain to `out`, consuming the
/// zero-length terminator
fn read_sub_blocks(cursor: &mut ByteCursor, out: &mut Vec<u8>) -> Result<()> {
    loop {
        let len = usize::from(cursor.read_u8()?);
        if len == 0 {
            return Ok(());
        }
        // Take what is there before failing so truncated text is kept
        let take = len.min(cursor.remaining());
        out.extend_from_slice(&cursor.read_bytes(take)?);
        if take < len {
            return cursor.skip(len - take);
        }
    }
}

/// Skip a whole sub-block chain, terminator included
fn skip_sub_blocks(cursor: &mut ByteCursor) -> Result<()> {
    loop {
        let len = usize::from(cursor.read_u8()?);
        if len == 0 {
            return Ok(());
        }
        cursor.skip(len)?;
    }
}

/// Comment decoding policy: bytes are read as UTF-8 (a superset of the
/// ASCII the format prescribes) and each invalid sequence becomes U+FFFD.
/// Bytes are joined across sub-blocks before decoding, so a character split
/// between two sub-blocks survives.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
