//! Write-only assignment handles.
//!
//! A [`FieldProxy`] borrows a container together with one key and converts
//! whatever native value is assigned through it into a [`Field`]. It never
//! reads from the container.

use super::Field;

/// A container whose entries can be assigned by key.
pub trait FieldContainer {
    type Key;

    /// Store `value` under `key`, replacing any previous value.
    fn set_field(&mut self, key: Self::Key, value: Field);
}

/// Handle bound to one key of a container.
pub struct FieldProxy<'a, C: FieldContainer + ?Sized> {
    container: &'a mut C,
    key: C::Key,
}

impl<'a, C: FieldContainer + ?Sized> FieldProxy<'a, C> {
    pub fn new(container: &'a mut C, key: C::Key) -> Self {
        Self { container, key }
    }

    /// Convert `value` and store it, handing the container back for chaining.
    pub fn assign(self, value: impl Into<Field>) -> &'a mut C {
        self.container.set_field(self.key, value.into());
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Array, LongString, Table};

    #[test]
    fn test_assign_converts_native_values() {
        let mut table = Table::new();
        table.field("count").assign(3u16);
        table.field("ratio").assign(0.5f64);
        table.field("enabled").assign(true);

        assert_eq!(table.get("count"), Some(&Field::from(3u16)));
        assert_eq!(table.get("ratio").unwrap().as_f64(), 0.5);
        assert!(table.get("enabled").unwrap().as_bool());
    }

    #[test]
    fn test_assign_replaces() {
        let mut table = Table::new();
        table.field("key").assign(1i32);
        table.field("key").assign(LongString::new("two").unwrap());

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("key").unwrap().as_str(), "two");
    }

    #[test]
    fn test_assign_chains() {
        let mut array = Array::new();
        array.field(0).assign(1u8).field(1).assign(2u8);

        assert_eq!(array.len(), 2);
        assert_eq!(array.get(1).unwrap().as_u8(), 2);
    }

    #[test]
    fn test_array_assign_past_end_appends() {
        let mut array = Array::new();
        array.field(0).assign(1u8);
        array.field(10).assign(2u8);

        assert_eq!(array.len(), 2);
        assert_eq!(array.get(1).unwrap().as_u8(), 2);
    }
}
