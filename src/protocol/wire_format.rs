//! Frame envelope encoding and decoding.
//!
//! Every AMQP 0-9-1 frame has the same envelope:
//! ```text
//! ┌──────┬─────────┬──────────┬─────────────┬───────────┐
//! │ Type │ Channel │ Size     │ Payload     │ Frame end │
//! │ 1 B  │ 2 bytes │ 4 bytes  │ Size bytes  │ 1 byte    │
//! │      │ u16 BE  │ u32 BE   │             │ 0xCE      │
//! └──────┴─────────┴──────────┴─────────────┴───────────┘
//! ```
//!
//! All multi-byte integers are Big Endian.

use crate::error::{CodecError, Result};

/// Envelope bytes before the payload (type + channel + size).
pub const FRAME_HEADER_SIZE: usize = 7;

/// Terminator bytes after the payload.
pub const FRAME_END_SIZE: usize = 1;

/// Total envelope bytes framing a payload.
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_SIZE + FRAME_END_SIZE;

/// Frame terminator octet.
pub const FRAME_END: u8 = 0xCE;

/// Default maximum frame size offered by brokers (128 KiB).
pub const DEFAULT_FRAME_MAX: u32 = 131_072;

/// Smallest frame size a peer may negotiate.
pub const FRAME_MIN_SIZE: u32 = 4096;

/// Protocol header sent by the client before the first frame.
pub const PROTOCOL_HEADER: &[u8; 8] = b"AMQP\x00\x00\x09\x01";

/// Frame type octets.
pub mod frame_type {
    /// Method frame (class id, method id, arguments).
    pub const METHOD: u8 = 1;
    /// Content header frame.
    pub const HEADER: u8 = 2;
    /// Content body frame.
    pub const BODY: u8 = 3;
    /// Heartbeat frame (empty payload).
    pub const HEARTBEAT: u8 = 8;
}

/// Decoded frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Method,
    Header,
    Body,
    Heartbeat,
}

impl FrameType {
    /// Parse a frame type octet.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            frame_type::METHOD => Ok(Self::Method),
            frame_type::HEADER => Ok(Self::Header),
            frame_type::BODY => Ok(Self::Body),
            frame_type::HEARTBEAT => Ok(Self::Heartbeat),
            other => Err(CodecError::UnknownFrameType(other)),
        }
    }

    /// Wire octet for this frame type.
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Method => frame_type::METHOD,
            Self::Header => frame_type::HEADER,
            Self::Body => frame_type::BODY,
            Self::Heartbeat => frame_type::HEARTBEAT,
        }
    }
}

/// Decoded frame envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Raw frame type octet (see `frame_type`).
    pub frame_type: u8,
    /// Channel number (0 = connection).
    pub channel: u16,
    /// Payload length in bytes.
    pub payload_size: u32,
}

impl FrameHeader {
    /// Create a new frame header.
    pub fn new(frame_type: u8, channel: u16, payload_size: u32) -> Self {
        Self {
            frame_type,
            channel,
            payload_size,
        }
    }

    /// Encode the envelope prefix to bytes (Big Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use amqp_wire::protocol::{frame_type, FrameHeader};
    ///
    /// let header = FrameHeader::new(frame_type::METHOD, 1, 12);
    /// assert_eq!(header.encode(), [1, 0, 1, 0, 0, 0, 12]);
    /// ```
    pub fn encode(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut buf = [0u8; FRAME_HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode the envelope prefix into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `FRAME_HEADER_SIZE` (7 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        buf[0] = self.frame_type;
        buf[1..3].copy_from_slice(&self.channel.to_be_bytes());
        buf[3..7].copy_from_slice(&self.payload_size.to_be_bytes());
    }

    /// Decode the envelope prefix from bytes.
    ///
    /// Returns `None` if buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < FRAME_HEADER_SIZE {
            return None;
        }
        Some(Self {
            frame_type: buf[0],
            channel: u16::from_be_bytes([buf[1], buf[2]]),
            payload_size: u32::from_be_bytes([buf[3], buf[4], buf[5], buf[6]]),
        })
    }

    /// Bytes occupied by the whole frame (envelope + payload + terminator).
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.payload_size as u64 + FRAME_OVERHEAD as u64
    }

    /// Typed frame kind.
    pub fn kind(&self) -> Result<FrameType> {
        FrameType::from_u8(self.frame_type)
    }

    /// Validate the envelope against a negotiated frame maximum.
    ///
    /// A `frame_max` of 0 means no limit.
    pub fn validate(&self, frame_max: u32) -> Result<()> {
        self.kind()?;

        if frame_max != 0 && self.total_size() > frame_max as u64 {
            return Err(CodecError::FrameTooLarge {
                size: self.total_size(),
                max: frame_max,
            });
        }

        Ok(())
    }

    /// Check if this is a method frame.
    #[inline]
    pub fn is_method(&self) -> bool {
        self.frame_type == frame_type::METHOD
    }

    /// Check if this is a heartbeat frame.
    #[inline]
    pub fn is_heartbeat(&self) -> bool {
        self.frame_type == frame_type::HEARTBEAT
    }
}
