//! Field module - AMQP typed values.
//!
//! Every value that can appear in a method argument list, a field table or
//! a field array is one of a closed set of types. Each concrete type
//! implements [`WireField`]: it knows its type tag, its exact wire size, how
//! to append itself to an [`OutBuffer`] and how to rebuild itself from a
//! [`ReceivedFrame`] positioned at its first byte.
//!
//! [`Field`] is the sum type over all of them, used wherever the concrete
//! type is only known at runtime (table and array entries).
//!
//! # Example
//!
//! ```
//! use amqp_wire::field::{Field, LongString, WireField};
//! use amqp_wire::protocol::{OutBuffer, ReceivedFrame};
//!
//! let value = LongString::new("guest").unwrap();
//! let mut buffer = OutBuffer::new(value.wire_size());
//! value.encode(&mut buffer).unwrap();
//! assert_eq!(buffer.as_slice(), b"\x00\x00\x00\x05guest");
//!
//! let mut cursor = ReceivedFrame::unframed(buffer.as_slice());
//! let decoded = Field::decode_as(b'S', &mut cursor).unwrap();
//! assert_eq!(decoded.as_str(), "guest");
//! ```

mod boolean_set;
mod decimal;
mod numeric;
mod proxy;
mod string;
mod table;
mod value;

use crate::error::Result;
use crate::protocol::{OutBuffer, ReceivedFrame};

pub use boolean_set::BooleanSet;
pub use decimal::Decimal;
pub use numeric::{
    Double, Float, Long, LongLong, Numeric, Octet, Short, Timestamp, UOctet, ULong, ULongLong,
    UShort,
};
pub use proxy::{FieldContainer, FieldProxy};
pub use string::{LengthPrefix, LongString, ShortString, StringField};
pub use table::{Array, Table};
pub use value::{Field, MAX_NESTING_DEPTH};

/// Wire type tags.
pub mod type_tag {
    pub const BOOLEAN: u8 = b't';
    pub const DECIMAL: u8 = b'D';
    pub const OCTET: u8 = b'b';
    pub const UOCTET: u8 = b'B';
    pub const SHORT: u8 = b'U';
    pub const USHORT: u8 = b'u';
    pub const LONG: u8 = b'I';
    pub const ULONG: u8 = b'i';
    pub const LONGLONG: u8 = b'L';
    pub const ULONGLONG: u8 = b'l';
    pub const TIMESTAMP: u8 = b'T';
    pub const FLOAT: u8 = b'f';
    pub const DOUBLE: u8 = b'd';
    pub const SHORT_STRING: u8 = b's';
    pub const LONG_STRING: u8 = b'S';
    pub const ARRAY: u8 = b'A';
    pub const TABLE: u8 = b'F';
}

/// A concrete AMQP value type with a bit-exact wire encoding.
///
/// `encode` writes exactly `wire_size()` bytes and `decode` consumes exactly
/// the bytes `encode` wrote. The type tag is not part of the encoding; it
/// only precedes the value inside tables and arrays.
pub trait WireField: Sized {
    /// Tag identifying this type inside tables and arrays.
    const TYPE_TAG: u8;

    /// Exact number of bytes `encode` writes, including any length prefix.
    fn wire_size(&self) -> usize;

    /// Append the wire representation.
    fn encode(&self, buffer: &mut OutBuffer) -> Result<()>;

    /// Consume one value from a cursor positioned at its first byte.
    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self>;
}
