//! Frame buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for zero-copy buffer management.
//! Implements a state machine for handling fragmented frames:
//! - `WaitingForHeader`: Need at least 7 envelope bytes
//! - `WaitingForFrame`: Envelope parsed, need `payload_size + 8` bytes in total
//!
//! # Example
//!
//! ```
//! use amqp_wire::protocol::{build_frame, frame_type, FrameBuffer};
//!
//! let mut buffer = FrameBuffer::new();
//! let bytes = build_frame(frame_type::BODY, 1, b"hello");
//!
//! // Data arrives in chunks from the socket
//! assert!(buffer.push(&bytes[..4]).unwrap().is_empty());
//! let frames = buffer.push(&bytes[4..]).unwrap();
//! assert_eq!(frames[0].payload(), b"hello");
//! ```

use bytes::BytesMut;

use super::wire_format::{FrameHeader, DEFAULT_FRAME_MAX, FRAME_END, FRAME_HEADER_SIZE};
use super::Frame;
use crate::error::{CodecError, Result};

/// Default initial buffer capacity.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64 * 1024;

/// Configuration for a [`FrameBuffer`].
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum total frame size; 0 means unlimited.
    pub frame_max: u32,
    /// Initial buffer capacity in bytes.
    pub initial_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_max: DEFAULT_FRAME_MAX,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// State machine for frame parsing.
#[derive(Debug, Clone)]
enum State {
    /// Waiting for a complete envelope (need 7 bytes).
    WaitingForHeader,
    /// Envelope parsed, waiting for payload and terminator.
    WaitingForFrame { header: FrameHeader },
}

/// Buffer for accumulating incoming bytes and extracting complete frames.
///
/// All data is stored in a single `BytesMut` buffer; each extracted frame is
/// split off and frozen without copying.
pub struct FrameBuffer {
    /// Accumulated bytes from socket reads.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
    /// Maximum allowed total frame size.
    frame_max: u32,
}

impl FrameBuffer {
    /// Create a new frame buffer with default settings.
    ///
    /// Default capacity: 64KB, frame max: 128KB.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a new frame buffer with a custom frame maximum.
    pub fn with_frame_max(frame_max: u32) -> Self {
        Self::with_config(FrameConfig {
            frame_max,
            ..FrameConfig::default()
        })
    }

    /// Create a new frame buffer from a configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            buffer: BytesMut::with_capacity(config.initial_capacity),
            state: State::WaitingForHeader,
            frame_max: config.frame_max,
        }
    }

    /// Apply a frame maximum negotiated during `connection.tune`.
    pub fn set_frame_max(&mut self, frame_max: u32) {
        tracing::debug!("Frame max set to {}", frame_max);
        self.frame_max = frame_max;
    }

    /// Current frame maximum.
    pub fn frame_max(&self) -> u32 {
        self.frame_max
    }

    /// Push data into the buffer and extract all complete frames.
    ///
    /// Returns a vector of complete frames (may be empty if still waiting
    /// for data). Partial data is buffered for the next push.
    ///
    /// # Errors
    ///
    /// Returns error on an unknown frame type, a frame larger than
    /// `frame_max`, or a terminator other than `0xCE`. The buffer should be
    /// discarded (and the connection closed) after an error.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Frame>> {
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();

        while let Some(frame) = self.try_extract_one()? {
            frames.push(frame);
        }

        Ok(frames)
    }

    /// Try to extract a single frame from the buffer.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if a complete frame was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` on a protocol violation
    fn try_extract_one(&mut self) -> Result<Option<Frame>> {
        match &self.state {
            State::WaitingForHeader => {
                let Some(header) = FrameHeader::decode(&self.buffer) else {
                    return Ok(None);
                };

                if let Err(e) = header.validate(self.frame_max) {
                    tracing::warn!("Rejecting frame on channel {}: {}", header.channel, e);
                    return Err(e);
                }

                self.state = State::WaitingForFrame { header };
                self.try_extract_one()
            }

            State::WaitingForFrame { header } => {
                let header = *header;
                let total = header.total_size() as usize;

                if self.buffer.len() < total {
                    return Ok(None);
                }

                let frame_end = self.buffer[total - 1];
                if frame_end != FRAME_END {
                    tracing::warn!(
                        "Invalid frame end {:#04x} on channel {}",
                        frame_end,
                        header.channel
                    );
                    return Err(CodecError::InvalidFrameEnd(frame_end));
                }

                let raw = self.buffer.split_to(total).freeze();
                self.state = State::WaitingForHeader;

                tracing::trace!(
                    "Frame type {} on channel {} ({} payload bytes)",
                    header.frame_type,
                    header.channel,
                    header.payload_size
                );

                Ok(Some(Frame::from_raw(header, raw)))
            }
        }
    }

    /// Append data to the buffer without extracting frames.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes still missing before the pending frame is complete.
    ///
    /// Before the envelope arrives this counts only the envelope bytes.
    pub fn bytes_needed(&self) -> usize {
        let target = match &self.state {
            State::WaitingForHeader => FRAME_HEADER_SIZE,
            State::WaitingForFrame { header } => header.total_size() as usize,
        };
        target.saturating_sub(self.buffer.len())
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForHeader => "WaitingForHeader",
            State::WaitingForFrame { .. } => "WaitingForFrame",
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
