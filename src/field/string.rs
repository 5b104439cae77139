//! Length-prefixed strings.
//!
//! Short strings carry a one-octet length prefix (at most 255 bytes); long
//! strings carry a four-octet prefix (at most 2^32 - 1 bytes). Payloads are
//! raw bytes: long strings in particular may carry binary data such as a
//! SASL response.

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;

use super::{type_tag, WireField};
use crate::error::{CodecError, Result};
use crate::protocol::{OutBuffer, ReceivedFrame, WirePrimitive};

/// Unsigned integer used as a string length prefix.
pub trait LengthPrefix: WirePrimitive {
    /// Largest payload length the prefix can express.
    const MAX_LEN: u64;

    /// Prefix for a payload length already checked against `MAX_LEN`.
    fn from_len(len: usize) -> Self;

    fn to_len(self) -> usize;
}

impl LengthPrefix for u8 {
    const MAX_LEN: u64 = u8::MAX as u64;

    #[inline]
    fn from_len(len: usize) -> Self {
        len as u8
    }

    #[inline]
    fn to_len(self) -> usize {
        self as usize
    }
}

impl LengthPrefix for u32 {
    const MAX_LEN: u64 = u32::MAX as u64;

    #[inline]
    fn from_len(len: usize) -> Self {
        len as u32
    }

    #[inline]
    fn to_len(self) -> usize {
        self as usize
    }
}

/// Byte string with a `P`-wide length prefix, tagged with `TAG`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StringField<P, const TAG: u8> {
    data: Bytes,
    _prefix: PhantomData<P>,
}

impl<P: LengthPrefix, const TAG: u8> StringField<P, TAG> {
    /// Wrap a payload, rejecting one longer than the prefix can express.
    ///
    /// # Errors
    ///
    /// Returns `StringTooLong` instead of truncating.
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() as u64 > P::MAX_LEN {
            return Err(CodecError::StringTooLong {
                len: data.len(),
                max: P::MAX_LEN,
            });
        }
        Ok(Self {
            data,
            _prefix: PhantomData,
        })
    }

    /// Empty string.
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            _prefix: PhantomData,
        }
    }

    /// Largest payload length this string type accepts.
    pub fn max_length() -> u64 {
        P::MAX_LEN
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Get a clone of the payload (cheap, zero-copy).
    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        self.data.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<P: LengthPrefix, const TAG: u8> TryFrom<&str> for StringField<P, TAG> {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl<P: LengthPrefix, const TAG: u8> TryFrom<String> for StringField<P, TAG> {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl<P: LengthPrefix, const TAG: u8> WireField for StringField<P, TAG> {
    const TYPE_TAG: u8 = TAG;

    #[inline]
    fn wire_size(&self) -> usize {
        P::SIZE + self.data.len()
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        P::from_len(self.data.len()).write_to(buffer)?;
        buffer.add_bytes(&self.data)
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        let len = P::read_from(frame)?.to_len();
        let data = frame.next_data(len)?;
        Ok(Self {
            data: Bytes::copy_from_slice(data),
            _prefix: PhantomData,
        })
    }
}

impl<P, const TAG: u8> fmt::Display for StringField<P, TAG> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string({})", String::from_utf8_lossy(&self.data))
    }
}

pub type ShortString = StringField<u8, { type_tag::SHORT_STRING }>;
pub type LongString = StringField<u32, { type_tag::LONG_STRING }>;
