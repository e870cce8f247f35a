//! Growable byte and offset buffers used while assembling a song
//!
//! Both buffers grow by doubling from a fixed initial capacity. Reservation
//! goes through `try_reserve_exact` so an allocation failure surfaces as
//! [`Error::OutOfMemory`] instead of aborting.

use crate::error::{Error, Result};

/// Initial capacity of a [`ByteBuffer`]
pub const BYTE_BUFFER_INITIAL: usize = 128;

/// Initial capacity of an [`OffsetBuffer`]
pub const OFFSET_BUFFER_INITIAL: usize = 16;

/// Reserve room for one more element, doubling the capacity when full
fn grow<T>(items: &mut Vec<T>, initial: usize) -> Result<()> {
    if items.len() == items.capacity() {
        let next = if items.capacity() == 0 {
            initial
        } else {
            items.capacity() * 2
        };
        items
            .try_reserve_exact(next - items.len())
            .map_err(|_| Error::OutOfMemory)?;
    }
    Ok(())
}

/// Instruction byte stream
#[derive(Debug, Default, Clone)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a single byte
    pub fn push(&mut self, value: u8) -> Result<()> {
        grow(&mut self.bytes, BYTE_BUFFER_INITIAL)?;
        self.bytes.push(value);
        Ok(())
    }

    /// Append the low 8 bits of a signed value
    pub fn push_wrapped(&mut self, value: i32) -> Result<()> {
        self.push((value & 0xFF) as u8)
    }

    /// Append a sequence of bytes
    pub fn extend(&mut self, values: &[u8]) -> Result<()> {
        for &value in values {
            self.push(value)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

/// Per-track offsets into the instruction stream
#[derive(Debug, Default, Clone)]
pub struct OffsetBuffer {
    items: Vec<u16>,
}

impl OffsetBuffer {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, value: u16) -> Result<()> {
        grow(&mut self.items, OFFSET_BUFFER_INITIAL)?;
        self.items.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<u16> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffer_doubles() {
        let mut buf = ByteBuffer::new();
        assert_eq!(buf.capacity(), 0);
        buf.push(1).unwrap();
        assert_eq!(buf.capacity(), BYTE_BUFFER_INITIAL);
        for i in 0..BYTE_BUFFER_INITIAL {
            buf.push(i as u8).unwrap();
        }
        assert_eq!(buf.len(), BYTE_BUFFER_INITIAL + 1);
        assert_eq!(buf.capacity(), BYTE_BUFFER_INITIAL * 2);
    }

    #[test]
    fn test_push_wrapped() {
        let mut buf = ByteBuffer::new();
        buf.push_wrapped(0x1FF).unwrap();
        buf.push_wrapped(-1).unwrap();
        buf.push_wrapped(256).unwrap();
        assert_eq!(buf.as_slice(), &[0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn test_offset_buffer_doubles() {
        let mut buf = OffsetBuffer::new();
        for i in 0..=OFFSET_BUFFER_INITIAL as u16 {
            buf.push(i).unwrap();
        }
        assert_eq!(buf.capacity(), OFFSET_BUFFER_INITIAL * 2);
        assert_eq!(buf.as_slice()[16], 16);
    }
}
