//! Fixed-width wire primitives.
//!
//! [`WirePrimitive`] ties each Rust scalar to its cursor accessor and its
//! output-buffer append, so numeric and string fields can select their wire
//! width at compile time.

use super::out_buffer::OutBuffer;
use super::received_frame::ReceivedFrame;
use crate::error::Result;

/// A scalar with a fixed network-order encoding.
pub trait WirePrimitive: Copy + Sized {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Consume `SIZE` bytes from the cursor.
    fn read_from(frame: &mut ReceivedFrame<'_>) -> Result<Self>;

    /// Append `SIZE` bytes to the buffer.
    fn write_to(self, buffer: &mut OutBuffer) -> Result<()>;
}

macro_rules! impl_wire_primitive {
    ($($ty:ty => $next:ident, $add:ident;)*) => {
        $(
            impl WirePrimitive for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn read_from(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
                    frame.$next()
                }

                #[inline]
                fn write_to(self, buffer: &mut OutBuffer) -> Result<()> {
                    buffer.$add(self)
                }
            }
        )*
    };
}

impl_wire_primitive! {
    u8 => next_u8, add_u8;
    i8 => next_i8, add_i8;
    u16 => next_u16, add_u16;
    i16 => next_i16, add_i16;
    u32 => next_u32, add_u32;
    i32 => next_i32, add_i32;
    u64 => next_u64, add_u64;
    i64 => next_i64, add_i64;
    f32 => next_f32, add_f32;
    f64 => next_f64, add_f64;
}
