//! Handler module - routing received frames.
//!
//! Provides:
//! - [`FrameHandler`] - one entry point per method class plus content and
//!   heartbeat frames
//! - [`process`] - validates a complete frame and dispatches it
//!
//! # Example
//!
//! ```
//! use amqp_wire::handler::{class_id, process, FrameHandler, MethodId};
//! use amqp_wire::protocol::{Frame, ReceivedFrame};
//! use amqp_wire::Result;
//!
//! struct Channels(Vec<u16>);
//!
//! impl FrameHandler for Channels {
//!     fn channel(&mut self, channel: u16, _: MethodId, _: &mut ReceivedFrame<'_>) -> Result<()> {
//!         self.0.push(channel);
//!         Ok(())
//!     }
//! }
//!
//! let frame = Frame::method(7, class_id::CHANNEL, 11, &[]).unwrap();
//! let mut handler = Channels(Vec::new());
//! process(&mut frame.reader(), &mut handler).unwrap();
//! assert_eq!(handler.0, vec![7]);
//! ```

mod dispatch;

pub use dispatch::{class_id, process, FrameHandler, MethodId};
