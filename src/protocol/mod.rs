//! Protocol module - frame envelope, cursors and framing.
//!
//! This module implements the byte-level layer of AMQP 0-9-1:
//! - 7-byte frame envelope encoding/decoding and the `0xCE` terminator
//! - [`OutBuffer`], a capacity-checked write cursor
//! - [`ReceivedFrame`], a bounds-checked read cursor over one frame
//! - [`FrameBuffer`] for accumulating partial reads into [`Frame`]s

mod frame;
mod frame_buffer;
mod out_buffer;
mod primitive;
mod received_frame;
mod wire_format;

pub use frame::{build_frame, Frame};
pub use frame_buffer::{FrameBuffer, FrameConfig, DEFAULT_INITIAL_CAPACITY};
pub use out_buffer::OutBuffer;
pub use primitive::WirePrimitive;
pub use received_frame::ReceivedFrame;
pub use wire_format::{
    frame_type, FrameHeader, FrameType, DEFAULT_FRAME_MAX, FRAME_END, FRAME_END_SIZE,
    FRAME_HEADER_SIZE, FRAME_MIN_SIZE, FRAME_OVERHEAD, PROTOCOL_HEADER,
};
