//! Byte Cursor
//!
//! Bounds-checked sequential reader over an immutable buffer. This is the
//! only place in the crate that does offset arithmetic.

use bytes::Bytes;

use crate::error::{CatalogError, Result};

/// Sequential reader over a fixed byte buffer
///
/// Every read checks the remaining length first. A failed read returns
/// [`CatalogError::Truncated`] and leaves the position where it was.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    buf: Bytes,
    pos: usize,
}

impl ByteCursor {
    /// Create a cursor at offset 0
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            buf: data.into(),
            pos: 0,
        }
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read a little-endian u16
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = u16::from_le_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    /// Read `n` bytes as a zero-copy slice of the underlying buffer
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        let slice = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Advance `n` bytes without reading them
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Move to an absolute offset. Seeking to exactly the end is allowed.
    pub fn seek_absolute(&mut self, offset: usize) -> Result<()> {
        if offset > self.buf.len() {
            return Err(CatalogError::Truncated {
                offset,
                needed: 0,
                available: 0,
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Bytes left between the position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(CatalogError::Truncated {
                offset: self.pos,
                needed,
                available,
            });
        }
        Ok(())
    }
}
