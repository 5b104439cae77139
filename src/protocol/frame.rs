//! Owned frames and outbound frame builders.
//!
//! A [`Frame`] keeps the complete wire bytes of one frame (envelope, payload
//! and terminator) in a `bytes::Bytes`, so clones are cheap and the payload
//! can be walked with a [`ReceivedFrame`] cursor without copying.
//!
//! # Example
//!
//! ```
//! use amqp_wire::field::{Field, ShortString};
//! use amqp_wire::protocol::Frame;
//!
//! // channel.open (class 20, method 10) with its reserved short string
//! let frame = Frame::method(1, 20, 10, &[Field::from(ShortString::new("").unwrap())]).unwrap();
//! assert_eq!(frame.payload(), &[0, 20, 0, 10, 0]);
//!
//! let mut reader = frame.reader();
//! assert_eq!(reader.next_u16().unwrap(), 20);
//! ```

use bytes::Bytes;

use super::out_buffer::OutBuffer;
use super::received_frame::ReceivedFrame;
use super::wire_format::{frame_type, FrameHeader, FRAME_END, FRAME_HEADER_SIZE};
use crate::error::{CodecError, Result};
use crate::field::Field;

/// Wire bytes of a heartbeat frame.
const HEARTBEAT_BYTES: [u8; 8] = [frame_type::HEARTBEAT, 0, 0, 0, 0, 0, 0, FRAME_END];

/// A complete protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Decoded envelope.
    header: FrameHeader,
    /// Full frame bytes (zero-copy via `bytes::Bytes`).
    raw: Bytes,
}

impl Frame {
    /// Wrap bytes already known to hold exactly one complete frame.
    pub(crate) fn from_raw(header: FrameHeader, raw: Bytes) -> Self {
        debug_assert_eq!(raw.len() as u64, header.total_size());
        Self { header, raw }
    }

    /// Build a frame around an arbitrary payload.
    pub fn new(frame_type: u8, channel: u16, payload: &[u8]) -> Result<Self> {
        let payload_size = payload_size(payload.len())?;
        let header = FrameHeader::new(frame_type, channel, payload_size);

        let mut buffer = OutBuffer::for_frame(payload_size);
        buffer.add_bytes(&header.encode())?;
        buffer.add_bytes(payload)?;
        buffer.add_u8(FRAME_END)?;

        Ok(Self {
            header,
            raw: buffer.freeze(),
        })
    }

    /// Build a heartbeat frame (channel 0, empty payload).
    pub fn heartbeat() -> Self {
        Self {
            header: FrameHeader::new(frame_type::HEARTBEAT, 0, 0),
            raw: Bytes::from_static(&HEARTBEAT_BYTES),
        }
    }

    /// Build a method frame.
    ///
    /// Arguments are written untagged and in order; the output buffer is
    /// sized from their `wire_size()` up front.
    pub fn method(
        channel: u16,
        class_id: u16,
        method_id: u16,
        arguments: &[Field],
    ) -> Result<Self> {
        let arguments_size: usize = arguments.iter().map(Field::wire_size).sum();
        let payload_size = payload_size(4 + arguments_size)?;
        let header = FrameHeader::new(frame_type::METHOD, channel, payload_size);

        let mut buffer = OutBuffer::for_frame(payload_size);
        buffer.add_bytes(&header.encode())?;
        buffer.add_u16(class_id)?;
        buffer.add_u16(method_id)?;
        for argument in arguments {
            argument.encode(&mut buffer)?;
        }
        buffer.add_u8(FRAME_END)?;
        debug_assert_eq!(buffer.remaining(), 0);

        Ok(Self {
            header,
            raw: buffer.freeze(),
        })
    }

    /// Decoded envelope.
    #[inline]
    pub fn header(&self) -> FrameHeader {
        self.header
    }

    /// Frame type octet.
    #[inline]
    pub fn frame_type(&self) -> u8 {
        self.header.frame_type
    }

    /// Channel number.
    #[inline]
    pub fn channel(&self) -> u16 {
        self.header.channel
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.raw[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + self.header.payload_size as usize]
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_size(&self) -> u32 {
        self.header.payload_size
    }

    /// Full wire bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Get a clone of the wire bytes (cheap, zero-copy).
    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        self.raw.clone()
    }

    /// Cursor positioned on the first payload byte.
    pub fn reader(&self) -> ReceivedFrame<'_> {
        ReceivedFrame::new(&self.raw)
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        self.header.frame_type == frame_type::METHOD
    }

    #[inline]
    pub fn is_header(&self) -> bool {
        self.header.frame_type == frame_type::HEADER
    }

    #[inline]
    pub fn is_body(&self) -> bool {
        self.header.frame_type == frame_type::BODY
    }

    #[inline]
    pub fn is_heartbeat(&self) -> bool {
        self.header.frame_type == frame_type::HEARTBEAT
    }
}

fn payload_size(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::FrameTooLarge {
        size: len as u64,
        max: u32::MAX,
    })
}

/// Build a complete frame as a single byte vector.
///
/// # Example
///
/// ```
/// use amqp_wire::protocol::{build_frame, frame_type};
///
/// let bytes = build_frame(frame_type::BODY, 1, b"hello");
/// assert_eq!(bytes.len(), 7 + 5 + 1);
/// assert_eq!(bytes[bytes.len() - 1], 0xCE);
/// ```
pub fn build_frame(frame_type: u8, channel: u16, payload: &[u8]) -> Vec<u8> {
    debug_assert!(payload.len() <= u32::MAX as usize);
    let header = FrameHeader::new(frame_type, channel, payload.len() as u32);

    let mut buf = Vec::with_capacity(payload.len() + super::wire_format::FRAME_OVERHEAD);
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf.push(FRAME_END);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BooleanSet, LongString, ShortString, WireField};

    #[test]
    fn test_frame_new() {
        let frame = Frame::new(frame_type::BODY, 5, b"body").unwrap();

        assert!(frame.is_body());
        assert_eq!(frame.channel(), 5);
        assert_eq!(frame.payload(), b"body");
        assert_eq!(frame.payload_size(), 4);
        assert_eq!(frame.as_bytes(), build_frame(frame_type::BODY, 5, b"body"));
    }

    #[test]
    fn test_frame_empty_payload() {
        let frame = Frame::new(frame_type::BODY, 1, b"").unwrap();
        assert!(frame.payload().is_empty());
        assert_eq!(frame.as_bytes().len(), 8);
    }

    #[test]
    fn test_heartbeat() {
        let frame = Frame::heartbeat();
        assert!(frame.is_heartbeat());
        assert_eq!(frame.as_bytes(), build_frame(frame_type::HEARTBEAT, 0, b""));
        assert!(frame.reader().validate(0).is_ok());
    }

    #[test]
    fn test_method_frame_layout() {
        let arguments = [
            Field::from(ShortString::new("amq.direct").unwrap()),
            Field::from(BooleanSet::from_flags([
                true, false, true, false, false, false, false, false,
            ])),
        ];
        let frame = Frame::method(2, 40, 10, &arguments).unwrap();

        assert!(frame.is_method());
        // class + method + (1 + 10) + 1
        assert_eq!(frame.payload_size(), 4 + 11 + 1);

        let mut reader = frame.reader();
        assert_eq!(reader.next_u16().unwrap(), 40);
        assert_eq!(reader.next_u16().unwrap(), 10);
        assert_eq!(ShortString::decode(&mut reader).unwrap().as_str(), Some("amq.direct"));
        assert_eq!(reader.next_u8().unwrap(), 0b0000_0101);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.frame_end(), Some(FRAME_END));
    }

    #[test]
    fn test_method_frame_without_arguments() {
        let frame = Frame::method(0, 10, 51, &[]).unwrap();
        assert_eq!(frame.payload(), &[0, 10, 0, 51]);
    }

    #[test]
    fn test_to_bytes_zero_copy() {
        let argument = Field::from(LongString::new("x").unwrap());
        let frame = Frame::method(0, 10, 11, &[argument]).unwrap();
        let bytes = frame.to_bytes();
        assert_eq!(bytes.as_ptr(), frame.as_bytes().as_ptr());
    }
}
