//! Fixed-width numeric fields.
//!
//! One generic type covers every width; the storage type selects the wire
//! width and the const parameter carries the type tag, so decoding never
//! branches on the type at runtime.

use std::fmt;

use super::{type_tag, WireField};
use crate::error::Result;
use crate::protocol::{OutBuffer, ReceivedFrame, WirePrimitive};

/// Numeric field stored as `T` and tagged with `TAG`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Numeric<T, const TAG: u8> {
    value: T,
}

impl<T: WirePrimitive, const TAG: u8> Numeric<T, TAG> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: WirePrimitive, const TAG: u8> From<T> for Numeric<T, TAG> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: WirePrimitive, const TAG: u8> WireField for Numeric<T, TAG> {
    const TYPE_TAG: u8 = TAG;

    #[inline]
    fn wire_size(&self) -> usize {
        T::SIZE
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        self.value.write_to(buffer)
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Ok(Self::new(T::read_from(frame)?))
    }
}

impl<T: fmt::Display, const TAG: u8> fmt::Display for Numeric<T, TAG> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "numeric({})", self.value)
    }
}

pub type Octet = Numeric<i8, { type_tag::OCTET }>;
pub type UOctet = Numeric<u8, { type_tag::UOCTET }>;
pub type Short = Numeric<i16, { type_tag::SHORT }>;
pub type UShort = Numeric<u16, { type_tag::USHORT }>;
pub type Long = Numeric<i32, { type_tag::LONG }>;
pub type ULong = Numeric<u32, { type_tag::ULONG }>;
pub type LongLong = Numeric<i64, { type_tag::LONGLONG }>;
pub type ULongLong = Numeric<u64, { type_tag::ULONGLONG }>;
/// Seconds since the Unix epoch.
pub type Timestamp = Numeric<u64, { type_tag::TIMESTAMP }>;
pub type Float = Numeric<f32, { type_tag::FLOAT }>;
pub type Double = Numeric<f64, { type_tag::DOUBLE }>;

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<F: WireField>(field: &F) -> Vec<u8> {
        let mut buffer = OutBuffer::new(field.wire_size());
        field.encode(&mut buffer).unwrap();
        assert_eq!(buffer.remaining(), 0);
        buffer.as_slice().to_vec()
    }

    #[test]
    fn test_tags() {
        assert_eq!(Octet::TYPE_TAG, b'b');
        assert_eq!(UOctet::TYPE_TAG, b'B');
        assert_eq!(Short::TYPE_TAG, b'U');
        assert_eq!(UShort::TYPE_TAG, b'u');
        assert_eq!(Long::TYPE_TAG, b'I');
        assert_eq!(ULong::TYPE_TAG, b'i');
        assert_eq!(LongLong::TYPE_TAG, b'L');
        assert_eq!(ULongLong::TYPE_TAG, b'l');
        assert_eq!(Timestamp::TYPE_TAG, b'T');
        assert_eq!(Float::TYPE_TAG, b'f');
        assert_eq!(Double::TYPE_TAG, b'd');
    }

    #[test]
    fn test_wire_sizes() {
        assert_eq!(Octet::new(0).wire_size(), 1);
        assert_eq!(UShort::new(0).wire_size(), 2);
        assert_eq!(Long::new(0).wire_size(), 4);
        assert_eq!(Timestamp::new(0).wire_size(), 8);
        assert_eq!(Float::new(0.0).wire_size(), 4);
        assert_eq!(Double::new(0.0).wire_size(), 8);
    }

    #[test]
    fn test_encoding_is_network_order() {
        assert_eq!(encoded(&Short::new(-2)), [0xFF, 0xFE]);
        assert_eq!(encoded(&ULong::new(0x01020304)), [1, 2, 3, 4]);
        assert_eq!(encoded(&Octet::new(-128)), [0x80]);
    }

    #[test]
    fn test_decode_uses_declared_width() {
        let bytes = [0x12, 0x34, 0x56, 0x78];

        let mut cursor = ReceivedFrame::unframed(&bytes);
        assert_eq!(UShort::decode(&mut cursor).unwrap().value(), 0x1234);
        assert_eq!(cursor.position(), 2);

        let mut cursor = ReceivedFrame::unframed(&bytes);
        assert_eq!(ULong::decode(&mut cursor).unwrap().value(), 0x12345678);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_decode_truncated() {
        let mut cursor = ReceivedFrame::unframed(&[0, 0, 0]);
        assert!(LongLong::decode(&mut cursor).is_err());
    }

    #[test]
    fn test_set_and_display() {
        let mut value = Long::default();
        assert_eq!(value.value(), 0);
        value.set(-42);
        assert_eq!(value.to_string(), "numeric(-42)");
    }
}
