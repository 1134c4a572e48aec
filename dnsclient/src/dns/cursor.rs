//! # Byte Reader
//!
//! A bounds-checked, copyable cursor over a received DNS datagram.
//!
//! Every read either returns the value and advances the position, or fails with
//! [`ReadOutOfBounds`] leaving the reader untouched. Because `ByteReader` is `Copy`,
//! a caller can fork the cursor (for example to follow a compression pointer)
//! without disturbing the position it resumes from.
use thiserror::Error;

/// Raised when a read would run past the end of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("read of {wanted} byte(s) at offset {offset} runs past the end of the message")]
pub struct ReadOutOfBounds {
    pub offset: usize,
    pub wanted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Creates a reader positioned at `pos`. The position may equal the buffer length.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, ReadOutOfBounds> {
        if pos > buf.len() {
            return Err(ReadOutOfBounds {
                offset: pos,
                wanted: 0,
            });
        }
        Ok(Self { buf, pos })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The whole underlying message, independent of the current position.
    pub fn message(&self) -> &'a [u8] {
        self.buf
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadOutOfBounds> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadOutOfBounds> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReadOutOfBounds> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadOutOfBounds> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadOutOfBounds> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(ReadOutOfBounds {
                offset: self.pos,
                wanted: len,
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ReadOutOfBounds> {
        self.read_bytes(len).map(|_| ())
    }

    /// Moves the cursor to an absolute offset inside the message.
    pub fn seek(&mut self, pos: usize) -> Result<(), ReadOutOfBounds> {
        *self = Self::at(self.buf, pos)?;
        Ok(())
    }
}
