//! # amqp-wire
//!
//! Wire codec for AMQP 0-9-1 frames and field values.
//!
//! The crate covers the byte level of the protocol and nothing above it:
//! no sockets, no connection state machine.
//!
//! ## Layout
//!
//! - [`protocol`]: frame envelope, read cursor, output buffer and a
//!   streaming frame buffer that cuts complete frames out of a byte stream
//! - [`field`]: typed values (integers, floats, decimals, boolean sets,
//!   strings, tables and arrays) with exact wire sizes
//! - [`handler`]: dispatch of complete frames by class id
//! - [`login`]: SASL PLAIN credentials
//!
//! ## Example
//!
//! ```
//! use amqp_wire::field::{Field, LongString, Table};
//! use amqp_wire::protocol::{Frame, FrameBuffer};
//!
//! let mut properties = Table::new();
//! properties.set("product", LongString::new("amqp-wire").unwrap());
//!
//! let frame = Frame::method(0, 10, 11, &[Field::from(properties)]).unwrap();
//!
//! let mut buffer = FrameBuffer::new();
//! let frames = buffer.push(frame.as_bytes()).unwrap();
//! assert_eq!(frames, vec![frame]);
//! ```

pub mod error;
pub mod field;
pub mod handler;
pub mod login;
pub mod protocol;

pub use error::{CodecError, Result};
pub use login::Login;
