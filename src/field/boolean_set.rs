//! Eight booleans packed into one octet.

use std::fmt;

use super::{type_tag, WireField};
use crate::error::Result;
use crate::protocol::{OutBuffer, ReceivedFrame};

/// Number of flags in a set.
const FLAG_COUNT: u32 = 8;

/// Eight independent flags; flag `i` is bit `i` of the octet (LSB first).
///
/// Indices outside 0..8 are ignored: `get` returns false and `set` does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BooleanSet {
    byte: u8,
}

impl BooleanSet {
    /// All flags cleared.
    pub const fn new() -> Self {
        Self { byte: 0 }
    }

    /// Build from eight flags, flag 0 first.
    pub fn from_flags(flags: [bool; 8]) -> Self {
        let mut set = Self::new();
        for (index, flag) in flags.into_iter().enumerate() {
            set.set(index as u32, flag);
        }
        set
    }

    /// Build from the packed octet.
    pub const fn from_byte(byte: u8) -> Self {
        Self { byte }
    }

    /// Read flag `index`.
    #[inline]
    pub fn get(&self, index: u32) -> bool {
        index < FLAG_COUNT && self.byte & (1 << index) != 0
    }

    /// Write flag `index`.
    #[inline]
    pub fn set(&mut self, index: u32, value: bool) {
        if index >= FLAG_COUNT {
            return;
        }
        if value {
            self.byte |= 1 << index;
        } else {
            self.byte &= !(1 << index);
        }
    }

    /// Packed octet.
    #[inline]
    pub fn byte(&self) -> u8 {
        self.byte
    }

    /// All eight flags, flag 0 first.
    pub fn flags(&self) -> [bool; 8] {
        std::array::from_fn(|index| self.get(index as u32))
    }
}

impl From<bool> for BooleanSet {
    /// Flag 0 set to `value`, all others cleared.
    fn from(value: bool) -> Self {
        let mut set = Self::new();
        set.set(0, value);
        set
    }
}

impl WireField for BooleanSet {
    const TYPE_TAG: u8 = type_tag::BOOLEAN;

    #[inline]
    fn wire_size(&self) -> usize {
        1
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        buffer.add_u8(self.byte)
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Ok(Self::from_byte(frame.next_u8()?))
    }
}

impl fmt::Display for BooleanSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BooleanSet(")?;
        for index in 0..FLAG_COUNT {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(if self.get(index) { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}
