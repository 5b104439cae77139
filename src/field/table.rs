//! Field tables and field arrays.
//!
//! Both composites carry a four-octet byte length followed by their entries:
//! ```text
//! table: u32 size | (short-string key | tag | value)*
//! array: u32 size | (tag | value)*
//! ```
//! The body is decoded through a cursor over exactly `size` bytes, so a
//! malformed entry can never read into whatever follows the composite.

use std::collections::BTreeMap;
use std::fmt;

use super::proxy::{FieldContainer, FieldProxy};
use super::{type_tag, Field, ShortString, WireField};
use crate::error::{CodecError, Result};
use crate::protocol::{OutBuffer, ReceivedFrame};

/// Bytes of the length prefix in front of a table or array body.
const BODY_PREFIX_SIZE: usize = 4;

pub(crate) static EMPTY_TABLE: Table = Table::new();
pub(crate) static EMPTY_ARRAY: Array = Array::new();

fn body_size(size: usize) -> Result<u32> {
    u32::try_from(size).map_err(|_| {
        CodecError::Protocol(format!("composite body of {} bytes overflows u32", size))
    })
}

/// Keyed collection of fields, ordered by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    entries: BTreeMap<String, Field>,
}

impl Table {
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Write-only handle for assigning a native value under `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use amqp_wire::field::Table;
    ///
    /// let mut table = Table::new();
    /// table.field("x-priority").assign(10i32);
    /// assert_eq!(table.get("x-priority").unwrap().as_i32(), 10);
    /// ```
    pub fn field(&mut self, key: impl Into<String>) -> FieldProxy<'_, Self> {
        FieldProxy::new(self, key.into())
    }

    fn body_size(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| 1 + key.len() + value.tagged_size())
            .sum()
    }

    /// Decode a table that sits inside `depth - 1` enclosing composites.
    pub(crate) fn decode_body(frame: &mut ReceivedFrame<'_>, depth: usize) -> Result<Self> {
        let size = frame.next_u32()? as usize;
        let mut body = ReceivedFrame::unframed(frame.next_data(size)?);

        let mut table = Self::new();
        while body.remaining() > 0 {
            let key = ShortString::decode(&mut body)?;
            let key = key
                .as_str()
                .ok_or_else(|| CodecError::Protocol("table key is not valid UTF-8".to_string()))?
                .to_string();
            let value = Field::decode_nested_tagged(&mut body, depth)?;
            if table.entries.contains_key(&key) {
                return Err(CodecError::Protocol(format!("duplicate table key {:?}", key)));
            }
            table.entries.insert(key, value);
        }
        Ok(table)
    }
}

impl FieldContainer for Table {
    type Key = String;

    fn set_field(&mut self, key: String, value: Field) {
        self.entries.insert(key, value);
    }
}

impl WireField for Table {
    const TYPE_TAG: u8 = type_tag::TABLE;

    fn wire_size(&self) -> usize {
        BODY_PREFIX_SIZE + self.body_size()
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        if let Some(key) = self
            .entries
            .keys()
            .find(|key| key.len() as u64 > ShortString::max_length())
        {
            return Err(CodecError::StringTooLong {
                len: key.len(),
                max: ShortString::max_length(),
            });
        }

        buffer.add_u32(body_size(self.body_size())?)?;
        for (key, value) in &self.entries {
            buffer.add_u8(key.len() as u8)?;
            buffer.add_str(key)?;
            value.encode_tagged(buffer)?;
        }
        Ok(())
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Self::decode_body(frame, 1)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("table(")?;
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str(")")
    }
}

impl<K: Into<String>, V: Into<Field>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.set(key, value);
        }
        table
    }
}

/// Ordered sequence of fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    items: Vec<Field>,
}

impl Array {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, value: impl Into<Field>) {
        self.items.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.items.get(index)
    }

    /// Replace the item at `index`, or append when `index` is past the end.
    pub fn set(&mut self, index: usize, value: impl Into<Field>) {
        let value = value.into();
        match self.items.get_mut(index) {
            Some(slot) => *slot = value,
            None => self.items.push(value),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.items.iter()
    }

    /// Write-only handle for assigning a native value at `index`.
    pub fn field(&mut self, index: usize) -> FieldProxy<'_, Self> {
        FieldProxy::new(self, index)
    }

    fn body_size(&self) -> usize {
        self.items.iter().map(Field::tagged_size).sum()
    }

    /// Decode an array that sits inside `depth - 1` enclosing composites.
    pub(crate) fn decode_body(frame: &mut ReceivedFrame<'_>, depth: usize) -> Result<Self> {
        let size = frame.next_u32()? as usize;
        let mut body = ReceivedFrame::unframed(frame.next_data(size)?);

        let mut array = Self::new();
        while body.remaining() > 0 {
            array.items.push(Field::decode_nested_tagged(&mut body, depth)?);
        }
        Ok(array)
    }
}

impl FieldContainer for Array {
    type Key = usize;

    fn set_field(&mut self, key: usize, value: Field) {
        self.set(key, value);
    }
}

impl WireField for Array {
    const TYPE_TAG: u8 = type_tag::ARRAY;

    fn wire_size(&self) -> usize {
        BODY_PREFIX_SIZE + self.body_size()
    }

    fn encode(&self, buffer: &mut OutBuffer) -> Result<()> {
        buffer.add_u32(body_size(self.body_size())?)?;
        for item in &self.items {
            item.encode_tagged(buffer)?;
        }
        Ok(())
    }

    fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        Self::decode_body(frame, 1)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("array(")?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(")")
    }
}

impl From<Vec<Field>> for Array {
    fn from(items: Vec<Field>) -> Self {
        Self { items }
    }
}

impl<V: Into<Field>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
