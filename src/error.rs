//! Error types for amqp-wire.

use thiserror::Error;

/// Main error type for all codec operations.
///
/// Every variant is scoped to the single value or frame being processed.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A cursor was asked for more bytes than remain in the input.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// An append would exceed the output buffer's capacity.
    #[error("Buffer overrun: needed {needed} bytes, {remaining} remaining")]
    Overrun { needed: usize, remaining: usize },

    /// String payload does not fit its length prefix.
    #[error("String of {len} bytes exceeds maximum length {max}")]
    StringTooLong { len: usize, max: u64 },

    /// Table or array entry carries an unknown type tag.
    #[error("Unknown field type tag: {0:#04x}")]
    UnknownFieldType(u8),

    /// Frame envelope declares an unknown frame type.
    #[error("Unknown frame type: {0}")]
    UnknownFrameType(u8),

    /// Frame terminator octet is not `0xCE`.
    #[error("Invalid frame end octet: {0:#04x}")]
    InvalidFrameEnd(u8),

    /// Declared frame size exceeds the negotiated maximum.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge { size: u64, max: u32 },

    /// Frame was processed before all of its bytes arrived.
    #[error("Incomplete frame: needed {needed} bytes, {available} available")]
    IncompleteFrame { needed: u64, available: usize },

    /// No handler accepts the given class/method pair.
    #[error("Handler not found for class {class_id} method {method_id}")]
    HandlerNotFound { class_id: u16, method_id: u16 },

    /// Other protocol violation.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type alias using CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
