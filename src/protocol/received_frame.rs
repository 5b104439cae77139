//! Read cursor over a received frame.
//!
//! [`ReceivedFrame`] borrows a caller-owned receive buffer and walks it with
//! a single read offset. It moves through three states as bytes arrive:
//! - fewer than 7 bytes: nothing is known about the frame
//! - header parsed: type, channel and payload size are readable
//! - complete: envelope, payload and terminator are all present
//!
//! Every `next_*` accessor either consumes exactly its width or fails with
//! [`CodecError::Truncated`] and leaves the offset where it was.
//!
//! # Example
//!
//! ```
//! use amqp_wire::protocol::ReceivedFrame;
//!
//! let bytes = [0, 0, 0, 5, b'g', b'u', b'e', b's', b't'];
//! let mut cursor = ReceivedFrame::unframed(&bytes);
//! let len = cursor.next_u32().unwrap() as usize;
//! assert_eq!(cursor.next_data(len).unwrap(), b"guest");
//! assert_eq!(cursor.position(), 9);
//! ```

use super::primitive::WirePrimitive;
use super::wire_format::{FrameHeader, FRAME_END, FRAME_HEADER_SIZE};
use crate::error::{CodecError, Result};

/// Borrowed read cursor over one frame (or one unframed byte span).
#[derive(Debug, Clone)]
pub struct ReceivedFrame<'a> {
    /// Underlying receive buffer.
    data: &'a [u8],
    /// Current read offset into `data`.
    offset: usize,
    /// Reads never go past this offset.
    end: usize,
    /// Parsed envelope, if enough bytes were present.
    header: Option<FrameHeader>,
}

impl<'a> ReceivedFrame<'a> {
    /// Create a cursor over a buffer that starts with a frame envelope.
    ///
    /// If at least 7 bytes are present the envelope is parsed and the cursor
    /// is positioned on the first payload byte. Reads are confined to the
    /// payload; the terminator is only reachable through [`frame_end`].
    ///
    /// [`frame_end`]: ReceivedFrame::frame_end
    pub fn new(data: &'a [u8]) -> Self {
        match FrameHeader::decode(data) {
            Some(header) => {
                let payload_end = FRAME_HEADER_SIZE as u64 + header.payload_size as u64;
                let end = payload_end.min(data.len() as u64) as usize;
                Self {
                    data,
                    offset: FRAME_HEADER_SIZE,
                    end,
                    header: Some(header),
                }
            }
            None => Self {
                data,
                offset: 0,
                end: 0,
                header: None,
            },
        }
    }

    /// Create a cursor over a plain byte span with no frame envelope.
    pub fn unframed(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            end: data.len(),
            header: None,
        }
    }

    /// Check if enough bytes are present to have parsed the envelope.
    #[inline]
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Check if envelope, payload and terminator are all present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.header
            .is_some_and(|header| self.data.len() as u64 >= header.total_size())
    }

    /// Parsed envelope.
    #[inline]
    pub fn header(&self) -> Option<FrameHeader> {
        self.header
    }

    /// Frame type octet (0 before the envelope is parsed).
    #[inline]
    pub fn frame_type(&self) -> u8 {
        self.header.map_or(0, |h| h.frame_type)
    }

    /// Channel number (0 before the envelope is parsed).
    #[inline]
    pub fn channel(&self) -> u16 {
        self.header.map_or(0, |h| h.channel)
    }

    /// Declared payload size (0 before the envelope is parsed).
    #[inline]
    pub fn payload_size(&self) -> u32 {
        self.header.map_or(0, |h| h.payload_size)
    }

    /// Bytes the whole frame occupies: `payload_size + 8`.
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.payload_size() as u64 + super::wire_format::FRAME_OVERHEAD as u64
    }

    /// Full payload, once the frame is complete.
    pub fn payload(&self) -> Option<&'a [u8]> {
        let header = self.header.filter(|_| self.is_complete())?;
        let start = FRAME_HEADER_SIZE;
        Some(&self.data[start..start + header.payload_size as usize])
    }

    /// Terminator octet, once the frame is complete.
    pub fn frame_end(&self) -> Option<u8> {
        let header = self.header.filter(|_| self.is_complete())?;
        Some(self.data[header.total_size() as usize - 1])
    }

    /// Current read offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Readable bytes left before the end of the payload (or span).
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.offset)
    }

    /// Check a complete frame for a known type, size limit and terminator.
    ///
    /// A `frame_max` of 0 means no limit.
    pub fn validate(&self, frame_max: u32) -> Result<()> {
        let header = match self.header {
            Some(header) if self.is_complete() => header,
            Some(header) => {
                return Err(CodecError::IncompleteFrame {
                    needed: header.total_size(),
                    available: self.data.len(),
                })
            }
            None => {
                return Err(CodecError::IncompleteFrame {
                    needed: FRAME_HEADER_SIZE as u64,
                    available: self.data.len(),
                })
            }
        };

        header.validate(frame_max)?;

        match self.frame_end() {
            Some(FRAME_END) => Ok(()),
            Some(other) => Err(CodecError::InvalidFrameEnd(other)),
            None => Err(CodecError::Protocol("frame end missing".to_string())),
        }
    }

    #[inline]
    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::Truncated { needed, remaining });
        }
        let span = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(span)
    }

    #[inline]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Borrow the next `size` bytes and advance past them.
    pub fn next_data(&mut self, size: usize) -> Result<&'a [u8]> {
        self.take(size)
    }

    /// Read any wire primitive.
    #[inline]
    pub fn next<P: WirePrimitive>(&mut self) -> Result<P> {
        P::read_from(self)
    }

    pub fn next_u8(&mut self) -> Result<u8> {
        Ok(u8::from_be_bytes(self.take_array()?))
    }

    pub fn next_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn next_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    pub fn next_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn next_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn next_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn next_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn next_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read an IEEE-754 single in network byte order.
    pub fn next_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.take_array()?))
    }

    /// Read an IEEE-754 double in network byte order.
    pub fn next_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_frame, frame_type, DEFAULT_FRAME_MAX};

    #[test]
    fn test_header_and_complete_exact_size() {
        let bytes = build_frame(frame_type::BODY, 3, b"hello");
        assert_eq!(bytes.len(), 5 + 8);

        let frame = ReceivedFrame::new(&bytes);
        assert!(frame.has_header());
        assert!(frame.is_complete());
        assert_eq!(frame.channel(), 3);
        assert_eq!(frame.payload_size(), 5);
        assert_eq!(frame.total_size(), 13);
        assert_eq!(frame.payload(), Some(&b"hello"[..]));
        assert_eq!(frame.frame_end(), Some(FRAME_END));
    }

    #[test]
    fn test_one_byte_short_is_incomplete() {
        let bytes = build_frame(frame_type::BODY, 3, b"hello");
        let frame = ReceivedFrame::new(&bytes[..bytes.len() - 1]);

        assert!(frame.has_header());
        assert!(!frame.is_complete());
        assert!(frame.payload().is_none());
        assert!(frame.frame_end().is_none());
    }

    #[test]
    fn test_header_needs_seven_bytes() {
        let bytes = build_frame(frame_type::HEARTBEAT, 0, b"");

        let frame = ReceivedFrame::new(&bytes[..6]);
        assert!(!frame.has_header());
        assert!(!frame.is_complete());

        let frame = ReceivedFrame::new(&bytes[..7]);
        assert!(frame.has_header());
        assert!(!frame.is_complete());

        let frame = ReceivedFrame::new(&bytes);
        assert!(frame.is_complete());
    }

    #[test]
    fn test_reads_advance_offset() {
        let bytes = [
            0x01, // u8
            0xFF, 0xFE, // i16
            0x00, 0x00, 0x01, 0x00, // u32
            0x80, 0, 0, 0, 0, 0, 0, 0, // i64 min
        ];
        let mut cursor = ReceivedFrame::unframed(&bytes);

        assert_eq!(cursor.next_u8().unwrap(), 1);
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.next_i16().unwrap(), -2);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.next_u32().unwrap(), 256);
        assert_eq!(cursor.next_i64().unwrap(), i64::MIN);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_truncated_read_fails_cleanly() {
        let bytes = [1, 2, 3];
        let mut cursor = ReceivedFrame::unframed(&bytes);

        let err = cursor.next_u32().unwrap_err();
        assert!(matches!(
            err,
            CodecError::Truncated {
                needed: 4,
                remaining: 3
            }
        ));

        // Offset is untouched after a failed read
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_u16().unwrap(), 0x0102);
    }

    #[test]
    fn test_next_data_borrows_buffer() {
        let bytes = b"abcdef";
        let mut cursor = ReceivedFrame::unframed(bytes);

        let span = cursor.next_data(4).unwrap();
        assert_eq!(span, b"abcd");
        assert_eq!(span.as_ptr(), bytes.as_ptr());
        assert!(cursor.next_data(3).is_err());
        assert_eq!(cursor.next_data(2).unwrap(), b"ef");
        assert_eq!(cursor.next_data(0).unwrap(), b"");
    }

    #[test]
    fn test_reads_stop_at_payload_end() {
        let bytes = build_frame(frame_type::BODY, 1, &[0xAA, 0xBB]);
        let mut frame = ReceivedFrame::new(&bytes);

        assert_eq!(frame.position(), FRAME_HEADER_SIZE);
        assert_eq!(frame.remaining(), 2);
        assert_eq!(frame.next_u16().unwrap(), 0xAABB);

        // The terminator is not readable as payload
        assert!(frame.next_u8().is_err());
    }

    #[test]
    fn test_no_reads_without_header() {
        let mut frame = ReceivedFrame::new(&[1, 0, 0]);
        assert_eq!(frame.remaining(), 0);
        assert!(frame.next_u8().is_err());
    }

    #[test]
    fn test_floats_network_order() {
        let bytes = [0x3F, 0x80, 0, 0, 0x40, 0, 0, 0, 0, 0, 0, 0];
        let mut cursor = ReceivedFrame::unframed(&bytes);
        assert_eq!(cursor.next_f32().unwrap(), 1.0);
        assert_eq!(cursor.next_f64().unwrap(), 2.0);
    }

    #[test]
    fn test_validate_good_frame() {
        let bytes = build_frame(frame_type::METHOD, 0, &[0, 10, 0, 10]);
        assert!(ReceivedFrame::new(&bytes).validate(DEFAULT_FRAME_MAX).is_ok());
    }

    #[test]
    fn test_validate_bad_frame_end() {
        let mut bytes = build_frame(frame_type::BODY, 1, b"x");
        let last = bytes.len() - 1;
        bytes[last] = 0x00;

        let err = ReceivedFrame::new(&bytes).validate(0).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFrameEnd(0x00)));
    }

    #[test]
    fn test_validate_incomplete() {
        let bytes = build_frame(frame_type::BODY, 1, b"xyz");
        let err = ReceivedFrame::new(&bytes[..9]).validate(0).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IncompleteFrame {
                needed: 11,
                available: 9
            }
        ));
    }
}
