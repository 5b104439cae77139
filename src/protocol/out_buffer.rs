//! Output buffer for outbound frames.
//!
//! A fixed-capacity write region with an append-only cursor. Every append is
//! capacity-checked: an append that does not fit fails with
//! [`CodecError::Overrun`] and leaves the buffer untouched.
//!
//! # Example
//!
//! ```
//! use amqp_wire::protocol::OutBuffer;
//!
//! let mut buffer = OutBuffer::new(6);
//! buffer.add_u16(0x0102).unwrap();
//! buffer.add_u32(5).unwrap();
//! assert_eq!(buffer.as_slice(), &[0x01, 0x02, 0, 0, 0, 5]);
//! assert!(buffer.add_u8(0).is_err());
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::primitive::WirePrimitive;
use super::wire_format::FRAME_OVERHEAD;
use crate::error::{CodecError, Result};

/// Exclusively owned write cursor over a fixed-capacity byte region.
#[derive(Debug)]
pub struct OutBuffer {
    /// Bytes written so far.
    buffer: BytesMut,
    /// Declared capacity; never exceeded.
    capacity: usize,
}

impl OutBuffer {
    /// Create an empty buffer that accepts at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a buffer sized for one frame carrying `payload_size` bytes.
    pub fn for_frame(payload_size: u32) -> Self {
        Self::new(payload_size as usize + FRAME_OVERHEAD)
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Declared capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes that can still be appended.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// Written bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Finish writing and hand the bytes to the transport.
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    #[inline]
    fn reserve(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::Overrun { needed, remaining });
        }
        Ok(())
    }

    /// Append a raw byte sequence.
    pub fn add_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.reserve(data.len())?;
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Append the UTF-8 bytes of a string (no length prefix).
    pub fn add_str(&mut self, data: &str) -> Result<()> {
        self.add_bytes(data.as_bytes())
    }

    /// Append any wire primitive.
    #[inline]
    pub fn add<P: WirePrimitive>(&mut self, value: P) -> Result<()> {
        value.write_to(self)
    }

    pub fn add_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?;
        self.buffer.put_u8(value);
        Ok(())
    }

    pub fn add_i8(&mut self, value: i8) -> Result<()> {
        self.reserve(1)?;
        self.buffer.put_i8(value);
        Ok(())
    }

    pub fn add_u16(&mut self, value: u16) -> Result<()> {
        self.reserve(2)?;
        self.buffer.put_u16(value);
        Ok(())
    }

    pub fn add_i16(&mut self, value: i16) -> Result<()> {
        self.reserve(2)?;
        self.buffer.put_i16(value);
        Ok(())
    }

    pub fn add_u32(&mut self, value: u32) -> Result<()> {
        self.reserve(4)?;
        self.buffer.put_u32(value);
        Ok(())
    }

    pub fn add_i32(&mut self, value: i32) -> Result<()> {
        self.reserve(4)?;
        self.buffer.put_i32(value);
        Ok(())
    }

    pub fn add_u64(&mut self, value: u64) -> Result<()> {
        self.reserve(8)?;
        self.buffer.put_u64(value);
        Ok(())
    }

    pub fn add_i64(&mut self, value: i64) -> Result<()> {
        self.reserve(8)?;
        self.buffer.put_i64(value);
        Ok(())
    }

    /// Append an IEEE-754 single in network byte order.
    pub fn add_f32(&mut self, value: f32) -> Result<()> {
        self.reserve(4)?;
        self.buffer.put_f32(value);
        Ok(())
    }

    /// Append an IEEE-754 double in network byte order.
    pub fn add_f64(&mut self, value: f64) -> Result<()> {
        self.reserve(8)?;
        self.buffer.put_f64(value);
        Ok(())
    }
}
