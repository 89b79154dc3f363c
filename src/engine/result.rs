//! The property bag populated during a parse
//!
//! A [`ParseResult`] maps each [`Field`] to at most one [`FieldValue`]. A later
//! write to the same field replaces the earlier one. Backtracking never edits
//! a result in place; speculative branches take a [`snapshot`] and the whole
//! bag is swapped back if the branch fails.
//!
//! [`snapshot`]: ParseResult::snapshot

use super::field::Field;
use ahash::RandomState;
use hashbrown::HashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// A value stored under a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// Opaque textual value
    Text(String),
}

impl FieldValue {
    /// The integer, if this is an integer value
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The flag, if this is a boolean value
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The text, if this is a textual value
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// The fields parsed from a piece of text
#[derive(Clone, Default, PartialEq)]
pub struct ParseResult {
    values: HashMap<Field, FieldValue, RandomState>,
}

impl ParseResult {
    /// Create an empty result
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no fields have been populated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of populated fields
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether a value is present for `field`
    #[inline]
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Store a value, replacing any previous value for the same field
    #[inline]
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    /// Store an integer value
    #[inline]
    pub fn set_int(&mut self, field: Field, value: i64) {
        self.set(field, FieldValue::Int(value));
    }

    /// Store a boolean value
    #[inline]
    pub fn set_bool(&mut self, field: Field, value: bool) {
        self.set(field, FieldValue::Bool(value));
    }

    /// Store a textual value
    #[inline]
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        self.set(field, FieldValue::Text(value.into()));
    }

    /// Remove a field, returning its value
    #[inline]
    pub fn remove(&mut self, field: Field) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    /// The raw value for `field`
    #[inline]
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// The integer value for `field`, if present and an integer
    #[inline]
    pub fn int(&self, field: Field) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_int)
    }

    /// The boolean value for `field`, if present and a boolean
    #[inline]
    pub fn bool(&self, field: Field) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    /// The textual value for `field`, if present and text
    #[inline]
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Iterate over the populated fields in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> + '_ {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Populated fields ordered by field id
    pub fn sorted_entries(&self) -> Vec<(Field, &FieldValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(field, _)| field.id());
        entries
    }

    /// An independent copy; later writes to either side don't affect the other
    #[inline]
    pub fn snapshot(&self) -> ParseResult {
        self.clone()
    }

    /// Serialize to a JSON object keyed by field name
    #[inline]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.sorted_entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (field, value) in entries {
            map.serialize_entry(&field, value)?;
        }
        map.end()
    }
}

impl fmt::Debug for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParseResult")?;
        f.debug_map().entries(self.sorted_entries()).finish()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = (&'a Field, &'a FieldValue);
    type IntoIter = hashbrown::hash_map::Iter<'a, Field, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
