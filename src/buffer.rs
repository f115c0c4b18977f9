//! Growable byte store with independent read and write cursors.
//!
//! The write cursor is the end of the stored bytes and the read cursor the
//! start of the unconsumed ones. Reading everything resets both cursors to
//! zero so the allocation is reused for the next message.

use std::io;

use crate::error::BufferError;
use crate::strings::StringTable;

/// Capacity used by [`Buffer::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// A drained buffer holding more than this many bytes of capacity is shrunk
/// back down to it.
pub const RETAIN_LIMIT: usize = 512_000;

/// Owned byte buffer plus the string table of the pass using it.
///
/// Not shareable across threads while in use; one buffer per message.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    /// Stored bytes; `data.len()` is the write cursor.
    data: Vec<u8>,
    rpos: usize,
    strings: StringTable,
}

impl Buffer {
    pub fn new() -> Self {
        Self::allocate(DEFAULT_CAPACITY)
    }

    /// Empty buffer with room for `n` bytes before the first reallocation.
    pub fn allocate(n: usize) -> Self {
        Buffer {
            data: Vec::with_capacity(n),
            rpos: 0,
            strings: StringTable::new(),
        }
    }

    /// Take ownership of existing bytes; they are all unread.
    pub fn wrap(bytes: Vec<u8>) -> Self {
        Buffer {
            data: bytes,
            rpos: 0,
            strings: StringTable::new(),
        }
    }

    // ------------------------------------------------------------------
    // Cursors
    // ------------------------------------------------------------------

    /// Number of bytes written but not yet read.
    #[inline]
    pub fn unread_len(&self) -> usize {
        self.data.len() - self.rpos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.unread_len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The unread bytes, without consuming them.
    pub fn remaining_bytes(&self) -> &[u8] {
        &self.data[self.rpos..]
    }

    /// Consume the buffer and return its unread bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.rpos > 0 {
            self.data.drain(..self.rpos);
        }
        self.data
    }

    /// Reset both cursors to zero, discarding unread bytes. The string table
    /// is kept.
    pub fn rewind(&mut self) {
        self.data.clear();
        self.rpos = 0;
    }

    /// Rewind and also forget every interned string.
    pub fn clear(&mut self) {
        self.rewind();
        self.strings.clear();
    }

    fn advance(&mut self, n: usize) {
        self.rpos += n;
        if self.rpos == self.data.len() {
            self.reset_drained();
        } else if self.rpos > self.data.len() / 2 {
            // Move the unread tail to the front once most of the buffer is consumed.
            self.data.drain(..self.rpos);
            self.rpos = 0;
        }
    }

    fn reset_drained(&mut self) {
        self.data.clear();
        self.rpos = 0;
        if self.data.capacity() > RETAIN_LIMIT {
            tracing::warn!(
                capacity = self.data.capacity(),
                limit = RETAIN_LIMIT,
                "buffer drained above retain limit, shrinking"
            );
            self.data.shrink_to(RETAIN_LIMIT);
        } else {
            tracing::trace!("buffer drained, cursors reset");
        }
    }

    fn ensure_unread(&self, need: usize) -> Result<(), BufferError> {
        let have = self.unread_len();
        if have < need {
            return Err(BufferError::Underflow { need, have });
        }
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        let cap = self.data.capacity();
        let len = self.data.len();
        if cap - len >= additional {
            return Ok(());
        }
        let target = cap
            .checked_add(additional)
            .ok_or(BufferError::AllocationFailure {
                requested: additional,
            })?
            .max(cap.saturating_mul(2));
        self.data
            .try_reserve(target - len)
            .map_err(|_| BufferError::AllocationFailure {
                requested: additional,
            })?;
        tracing::trace!(from = cap, to = self.data.capacity(), "buffer grown");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw bytes
    // ------------------------------------------------------------------

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.reserve(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, BufferError> {
        self.ensure_unread(len)?;
        let out = self.data[self.rpos..self.rpos + len].to_vec();
        self.advance(len);
        Ok(out)
    }

    pub fn write_utf8(&mut self, s: &str) -> Result<(), BufferError> {
        self.write_bytes(s.as_bytes())
    }

    /// Read `len` bytes and validate them as UTF-8.
    pub fn read_utf8(&mut self, len: usize) -> Result<String, BufferError> {
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Append the unread bytes of `other`.
    pub fn extend_from(&mut self, other: &Buffer) -> Result<(), BufferError> {
        self.write_bytes(other.remaining_bytes())
    }

    // ------------------------------------------------------------------
    // Fixed-width little-endian integers
    // ------------------------------------------------------------------

    /// Write the low `width` bytes of `value`, little-endian.
    ///
    /// Signed values are passed as their two's-complement bit pattern
    /// (`v as u64`), so truncation matches fixed-width wraparound.
    pub fn write_fixed(&mut self, value: u64, width: usize) -> Result<(), BufferError> {
        if !(1..=8).contains(&width) {
            return Err(BufferError::InvalidWidth(width));
        }
        self.write_bytes(&value.to_le_bytes()[..width])
    }

    /// Read `width` little-endian bytes as an unsigned integer.
    pub fn read_fixed(&mut self, width: usize) -> Result<u64, BufferError> {
        if !(1..=8).contains(&width) {
            return Err(BufferError::InvalidWidth(width));
        }
        self.ensure_unread(width)?;
        let mut raw = [0u8; 8];
        raw[..width].copy_from_slice(&self.data[self.rpos..self.rpos + width]);
        self.advance(width);
        Ok(u64::from_le_bytes(raw))
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<(), BufferError> {
        self.write_bytes(&[value])
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, BufferError> {
        self.ensure_unread(1)?;
        let b = self.data[self.rpos];
        self.advance(1);
        Ok(b)
    }

    pub fn read_i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i32(&mut self) -> Result<i32, BufferError> {
        Ok(self.read_fixed(4)? as u32 as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, BufferError> {
        Ok(self.read_fixed(8)? as i64)
    }

    // ------------------------------------------------------------------
    // String table
    // ------------------------------------------------------------------

    /// Index of `s` in this buffer's string table, interning it if new.
    pub fn intern_string(&mut self, s: &str) -> usize {
        self.strings.intern(s)
    }

    pub fn lookup_interned(&self, index: usize) -> Result<&str, BufferError> {
        self.strings.get(index)
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn strings_mut(&mut self) -> &mut StringTable {
        &mut self.strings
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::wrap(bytes)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Buffer::wrap(bytes.to_vec())
    }
}

impl io::Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.unread_len().min(buf.len());
        if n == 0 {
            return Ok(0);
        }
        buf[..n].copy_from_slice(&self.data[self.rpos..self.rpos + n]);
        self.advance(n);
        Ok(n)
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
