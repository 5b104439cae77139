//! The `Field` sum type.
//!
//! # Views
//!
//! Two families of accessors read a field as a native value:
//!
//! - `as_*` never fail. A view the variant does not support yields the
//!   neutral value (`0`, `0.0`, `false`, `""`, an empty table/array).
//!   Integer views of integers wrap like an `as` cast; integer views of
//!   floats truncate; decimals only support the float views.
//! - `try_*` return `None` unless the variant supports the view and, for
//!   integers, the value fits the requested width.
//!
//! Callers that must tell "zero" from "wrong type" should use `try_*` or the
//! `is_*` predicates.

use std::fmt;

use super::table::{EMPTY_ARRAY, EMPTY_TABLE};
use super::{
    type_tag, Array, BooleanSet, Decimal, Double, Float, Long, LongLong, LongString, Octet, Short,
    ShortString, Table, Timestamp, UOctet, ULong, ULongLong, UShort, WireField,
};
use crate::error::{CodecError, Result};
use crate::protocol::{OutBuffer, ReceivedFrame};

/// Deepest table/array nesting accepted when decoding.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Any AMQP field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Boolean(BooleanSet),
    Decimal(Decimal),
    Octet(Octet),
    UOctet(UOctet),
    Short(Short),
    UShort(UShort),
    Long(Long),
    ULong(ULong),
    LongLong(LongLong),
    ULongLong(ULongLong),
    Timestamp(Timestamp),
    Float(Float),
    Double(Double),
    ShortString(ShortString),
    LongString(LongString),
    Array(Array),
    Table(Table),
}

/// Evaluate `$body` with `$inner` bound to the concrete value of any variant.
macro_rules! with_inner {
    ($field:expr, $inner:ident => $body:expr) => {
        match $field {
            Field::Boolean($inner) => $body,
            Field::Decimal($inner) => $body,
            Field::Octet($inner) => $body,
            Field::UOctet($inner) => $body,
            Field::Short($inner) => $body,
            Field::UShort($inner) => $body,
            Field::Long($inner) => $body,
            Field::ULong($inner) => $body,
            Field::LongLong($inner) => $body,
            Field::ULongLong($inner) => $body,
            Field::Timestamp($inner) => $body,
            Field::Float($inner) => $body,
            Field::Double($inner) => $body,
            Field::ShortString($inner) => $body,
            Field::LongString($inner) => $body,
            Field::Array($inner) => $body,
            Field::Table($inner) => $body,
        }
    };
}

fn tag_of<F: WireField>(_: &F) -> u8 {
    F::TYPE_TAG
}

macro_rules! integer_views {
    ($($soft:ident, $strict:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("View as `", stringify!($ty), "`, or 0 for non-numeric variants.")]
            pub fn $soft(&self) -> $ty {
                match (self.integer(), self.float()) {
                    (Some(value), _) => value as $ty,
                    (None, Some(value)) => value as $ty,
                    (None, None) => 0,
                }
            }

            #[doc = concat!("Integer variant whose value fits `", stringify!($ty), "`.")]
            pub fn $strict(&self) -> Option<$ty> {
                self.integer().and_then(|value| <$ty>::try_from(value).ok())
            }
        )*
    };
}

impl Field {
    /// Wire type tag.
    pub fn type_tag(&self) -> u8 {
        with_inner!(self, inner => tag_of(inner))
    }

    /// Bytes the value occupies on the wire, excluding the type tag.
    pub fn wire_size(&self) -> usize {
        with_inner!(self, inner => inner.wire_size())
    }

    /// Bytes the value occupies as a table or array entry (tag + value).
    pub fn tagged_size(&self) -> usize {
        1 + self.wire_size()
    }

    /// Append the value without its type tag (method argument form).
    pub fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        with_inner!(self, inner => inner.encode(buffer))
    }

    /// Append the type tag followed by the value (table/array entry form).
    pub fn encode_tagged(&self, buffer: &mut OutBuffer) -> Result<()> {
        buffer.add_u8(self.type_tag())?;
        self.encode(buffer)
    }

    /// Decode a value whose type tag is already known.
    pub fn decode_as(tag: u8, frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Self::decode_nested(tag, frame, 0)
    }

    /// Decode a value found inside `depth` enclosing tables or arrays.
    pub(crate) fn decode_nested(
        tag: u8,
        frame: &mut ReceivedFrame<'_>,
        depth: usize,
    ) -> Result<Self> {
        if matches!(tag, type_tag::ARRAY | type_tag::TABLE) && depth >= MAX_NESTING_DEPTH {
            return Err(CodecError::Protocol(format!(
                "field nesting exceeds {} levels",
                MAX_NESTING_DEPTH
            )));
        }

        let field = match tag {
            type_tag::BOOLEAN => Self::Boolean(BooleanSet::decode(frame)?),
            type_tag::DECIMAL => Self::Decimal(Decimal::decode(frame)?),
            type_tag::OCTET => Self::Octet(Octet::decode(frame)?),
            type_tag::UOCTET => Self::UOctet(UOctet::decode(frame)?),
            type_tag::SHORT => Self::Short(Short::decode(frame)?),
            type_tag::USHORT => Self::UShort(UShort::decode(frame)?),
            type_tag::LONG => Self::Long(Long::decode(frame)?),
            type_tag::ULONG => Self::ULong(ULong::decode(frame)?),
            type_tag::LONGLONG => Self::LongLong(LongLong::decode(frame)?),
            type_tag::ULONGLONG => Self::ULongLong(ULongLong::decode(frame)?),
            type_tag::TIMESTAMP => Self::Timestamp(Timestamp::decode(frame)?),
            type_tag::FLOAT => Self::Float(Float::decode(frame)?),
            type_tag::DOUBLE => Self::Double(Double::decode(frame)?),
            type_tag::SHORT_STRING => Self::ShortString(ShortString::decode(frame)?),
            type_tag::LONG_STRING => Self::LongString(LongString::decode(frame)?),
            type_tag::ARRAY => Self::Array(Array::decode_body(frame, depth + 1)?),
            type_tag::TABLE => Self::Table(Table::decode_body(frame, depth + 1)?),
            other => return Err(CodecError::UnknownFieldType(other)),
        };
        Ok(field)
    }

    /// Decode a type tag and the value that follows it.
    pub fn decode_tagged(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Self::decode_nested_tagged(frame, 0)
    }

    pub(crate) fn decode_nested_tagged(
        frame: &mut ReceivedFrame<'_>,
        depth: usize,
    ) -> Result<Self> {
        let tag = frame.next_u8()?;
        Self::decode_nested(tag, frame, depth)
    }

    fn integer(&self) -> Option<i128> {
        match self {
            Self::Octet(v) => Some(v.value().into()),
            Self::UOctet(v) => Some(v.value().into()),
            Self::Short(v) => Some(v.value().into()),
            Self::UShort(v) => Some(v.value().into()),
            Self::Long(v) => Some(v.value().into()),
            Self::ULong(v) => Some(v.value().into()),
            Self::LongLong(v) => Some(v.value().into()),
            Self::ULongLong(v) => Some(v.value().into()),
            Self::Timestamp(v) => Some(v.value().into()),
            _ => None,
        }
    }

    fn float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(v.value().into()),
            Self::Double(v) => Some(v.value()),
            _ => None,
        }
    }

    integer_views! {
        as_i8, try_i8 => i8;
        as_u8, try_u8 => u8;
        as_i16, try_i16 => i16;
        as_u16, try_u16 => u16;
        as_i32, try_i32 => i32;
        as_u32, try_u32 => u32;
        as_i64, try_i64 => i64;
        as_u64, try_u64 => u64;
    }

    /// View as `f64`, or 0.0 for non-numeric variants.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Decimal(v) => v.to_f64(),
            _ => match (self.integer(), self.float()) {
                (Some(value), _) => value as f64,
                (None, Some(value)) => value,
                (None, None) => 0.0,
            },
        }
    }

    /// View as `f32`, or 0.0 for non-numeric variants.
    pub fn as_f32(&self) -> f32 {
        match self {
            Self::Float(v) => v.value(),
            _ => self.as_f64() as f32,
        }
    }

    /// Float, double or decimal value.
    pub fn try_f64(&self) -> Option<f64> {
        match self {
            Self::Decimal(v) => Some(v.to_f64()),
            _ => self.float(),
        }
    }

    /// Float or decimal value.
    pub fn try_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(v.value()),
            Self::Decimal(v) => Some(v.to_f32()),
            _ => None,
        }
    }

    /// Flag 0 of a boolean set, or false.
    pub fn as_bool(&self) -> bool {
        self.try_bool().unwrap_or(false)
    }

    pub fn try_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(v.get(0)),
            _ => None,
        }
    }

    pub fn try_boolean_set(&self) -> Option<BooleanSet> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, or an empty slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.try_bytes().unwrap_or(&[])
    }

    pub fn try_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ShortString(v) => Some(v.as_bytes()),
            Self::LongString(v) => Some(v.as_bytes()),
            _ => None,
        }
    }

    /// UTF-8 string payload, or "" (also for non-UTF-8 payloads).
    pub fn as_str(&self) -> &str {
        self.try_str().unwrap_or("")
    }

    pub fn try_str(&self) -> Option<&str> {
        match self {
            Self::ShortString(v) => v.as_str(),
            Self::LongString(v) => v.as_str(),
            _ => None,
        }
    }

    /// Array value, or an empty array.
    pub fn as_array(&self) -> &Array {
        self.try_array().unwrap_or(&EMPTY_ARRAY)
    }

    pub fn try_array(&self) -> Option<&Array> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Table value, or an empty table.
    pub fn as_table(&self) -> &Table {
        self.try_table().unwrap_or(&EMPTY_TABLE)
    }

    pub fn try_table(&self) -> Option<&Table> {
        match self {
            Self::Table(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.integer().is_some()
    }

    pub fn is_float(&self) -> bool {
        self.float().is_some()
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::ShortString(_) | Self::LongString(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_inner!(self, inner => fmt::Display::fmt(inner, f))
    }
}

macro_rules! field_from {
    ($($source:ty => $variant:ident;)*) => {
        $(
            impl From<$source> for Field {
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

field_from! {
    BooleanSet => Boolean;
    Decimal => Decimal;
    Octet => Octet;
    UOctet => UOctet;
    Short => Short;
    UShort => UShort;
    Long => Long;
    ULong => ULong;
    LongLong => LongLong;
    ULongLong => ULongLong;
    Timestamp => Timestamp;
    Float => Float;
    Double => Double;
    ShortString => ShortString;
    LongString => LongString;
    Array => Array;
    Table => Table;
    bool => Boolean;
    i8 => Octet;
    u8 => UOctet;
    i16 => Short;
    u16 => UShort;
    i32 => Long;
    u32 => ULong;
    i64 => LongLong;
    u64 => ULongLong;
    f32 => Float;
    f64 => Double;
}
