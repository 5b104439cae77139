//! Scaled fixed-point decimal.

use std::fmt;

use super::{type_tag, WireField};
use crate::error::Result;
use crate::protocol::{OutBuffer, ReceivedFrame};

/// `number / 10^places`.
///
/// Equality is structural: `Decimal::new(1, 10)` and `Decimal::new(0, 1)`
/// denote the same quantity but are not equal. The float views are computed
/// in floating point and lose precision for large mantissas or scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    places: u8,
    number: u32,
}

impl Decimal {
    pub const fn new(places: u8, number: u32) -> Self {
        Self { places, number }
    }

    /// Scale (number of decimal places).
    #[inline]
    pub fn places(&self) -> u8 {
        self.places
    }

    /// Unscaled mantissa.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn to_f64(&self) -> f64 {
        self.number as f64 / 10f64.powi(self.places as i32)
    }

    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

impl WireField for Decimal {
    const TYPE_TAG: u8 = type_tag::DECIMAL;

    #[inline]
    fn wire_size(&self) -> usize {
        5
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        buffer.add_u8(self.places)?;
        buffer.add_u32(self.number)
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        let places = frame.next_u8()?;
        let number = frame.next_u32()?;
        Ok(Self::new(places, number))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decimal({})", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_views() {
        assert_eq!(Decimal::new(2, 1234).to_f64(), 12.34);
        assert_eq!(Decimal::new(0, 0).to_f64(), 0.0);
        assert_eq!(Decimal::new(0, 7).to_f32(), 7.0);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Decimal::new(2, 1234), Decimal::new(2, 1234));
        assert_ne!(Decimal::new(1, 10), Decimal::new(0, 1));
    }

    #[test]
    fn test_wire_layout() {
        let value = Decimal::new(3, 0x01020304);
        let mut buffer = OutBuffer::new(value.wire_size());
        value.encode(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), &[3, 1, 2, 3, 4]);

        let mut cursor = ReceivedFrame::unframed(buffer.as_slice());
        assert_eq!(Decimal::decode(&mut cursor).unwrap(), value);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_decode_truncated_mantissa() {
        let mut cursor = ReceivedFrame::unframed(&[2, 0, 0]);
        assert!(Decimal::decode(&mut cursor).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(2, 1234).to_string(), "decimal(12.34)");
    }
}
