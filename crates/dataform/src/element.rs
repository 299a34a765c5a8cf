//! The tagged tree data model.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{DataReader, DataWriter, Number, ReadError, WriteError};

/// The type tag of a [`DataElement`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The null element.
    Null,
    /// A boolean.
    Boolean,
    /// A number.
    Number,
    /// A string.
    String,
    /// An ordered list of elements.
    List,
    /// A string-keyed map of elements.
    Map,
}

impl core::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ElementKind::Null => "null",
            ElementKind::Boolean => "boolean",
            ElementKind::Number => "number",
            ElementKind::String => "string",
            ElementKind::List => "list",
            ElementKind::Map => "map",
        })
    }
}

/// A node in a structured data tree.
///
/// Trees are plain value graphs: a list or map exclusively owns its children
/// and there are no back-references or cycles. A tree is either built
/// programmatically or produced by [`DataElement::read`] from any
/// [`DataReader`], and can be written to any [`DataWriter`].
///
/// # Examples
///
/// ```
/// use dataform::{DataElement, DataMap};
///
/// let mut map = DataMap::new();
/// map.put("enabled", true);
/// map.put("retries", 3);
/// let element = DataElement::Map(map);
/// assert_eq!(
///     dataform::json::to_string(&element, dataform::json::Style::compact()).unwrap(),
///     r#"{"enabled":true,"retries":3}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DataElement {
    /// The null element.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A number retaining its textual form.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered list of elements.
    List(Vec<DataElement>),
    /// A string-keyed, insertion-ordered map of elements.
    Map(DataMap),
}

impl DataElement {
    /// The type tag of this element's variant.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            DataElement::Null => ElementKind::Null,
            DataElement::Boolean(_) => ElementKind::Boolean,
            DataElement::Number(_) => ElementKind::Number,
            DataElement::String(_) => ElementKind::String,
            DataElement::List(_) => ElementKind::List,
            DataElement::Map(_) => ElementKind::Map,
        }
    }

    /// Returns `true` if this is the null element.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DataElement::Null)
    }

    /// Reads one complete element from `reader`.
    ///
    /// The next token's type is determined through non-destructive lookahead
    /// and dispatched to the matching variant reader; lists and maps recurse.
    ///
    /// # Errors
    ///
    /// Propagates any fatal [`ReadError`] from the reader.
    pub fn read<R: DataReader + ?Sized>(reader: &mut R) -> Result<Self, ReadError> {
        match reader.next_type()? {
            ElementKind::Null => {
                reader.read_null()?;
                Ok(DataElement::Null)
            }
            ElementKind::Boolean => Ok(DataElement::Boolean(reader.read_bool()?)),
            ElementKind::Number => Ok(DataElement::Number(reader.read_number()?)),
            ElementKind::String => Ok(DataElement::String(reader.read_string()?)),
            ElementKind::List => {
                let mut elements = Vec::new();
                reader.enter_list()?;
                while reader.has_next()? {
                    elements.push(DataElement::read(reader)?);
                }
                reader.leave_list()?;
                Ok(DataElement::List(elements))
            }
            ElementKind::Map => {
                let mut map = DataMap::new();
                reader.enter_map()?;
                while reader.has_next()? {
                    let key = reader.read_key()?;
                    map.put(key, DataElement::read(reader)?);
                }
                reader.leave_map()?;
                Ok(DataElement::Map(map))
            }
        }
    }

    /// Writes this element to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any fatal [`WriteError`] from the writer.
    pub fn write<W: DataWriter + ?Sized>(&self, writer: &mut W) -> Result<(), WriteError> {
        match self {
            DataElement::Null => writer.value_null(),
            DataElement::Boolean(b) => writer.value_bool(*b),
            DataElement::Number(n) => writer.value_number(n),
            DataElement::String(s) => writer.value_string(s),
            DataElement::List(elements) => {
                writer.open_list()?;
                for element in elements {
                    element.write(writer)?;
                }
                writer.close_list()
            }
            DataElement::Map(map) => {
                writer.open_map()?;
                for (key, value) in map.iter() {
                    writer.key(key)?;
                    value.write(writer)?;
                }
                writer.close_map()
            }
        }
    }

    /// The boolean payload.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a boolean; a tag mismatch here is a
    /// programming error. Recoverable checks go through the codec layer.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            DataElement::Boolean(b) => *b,
            other => mismatch(ElementKind::Boolean, other),
        }
    }

    /// The number payload.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a number.
    #[must_use]
    pub fn as_number(&self) -> &Number {
        match self {
            DataElement::Number(n) => n,
            other => mismatch(ElementKind::Number, other),
        }
    }

    /// The string payload.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DataElement::String(s) => s,
            other => mismatch(ElementKind::String, other),
        }
    }

    /// The list payload.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a list.
    #[must_use]
    pub fn as_list(&self) -> &Vec<DataElement> {
        match self {
            DataElement::List(elements) => elements,
            other => mismatch(ElementKind::List, other),
        }
    }

    /// The list payload, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a list.
    pub fn as_list_mut(&mut self) -> &mut Vec<DataElement> {
        match self {
            DataElement::List(elements) => elements,
            other => mismatch(ElementKind::List, other),
        }
    }

    /// The map payload.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a map.
    #[must_use]
    pub fn as_map(&self) -> &DataMap {
        match self {
            DataElement::Map(map) => map,
            other => mismatch(ElementKind::Map, other),
        }
    }

    /// The map payload, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the element is not a map.
    pub fn as_map_mut(&mut self) -> &mut DataMap {
        match self {
            DataElement::Map(map) => map,
            other => mismatch(ElementKind::Map, other),
        }
    }
}

fn mismatch(expected: ElementKind, actual: &DataElement) -> ! {
    panic!("expected {expected}, got {}", actual.kind())
}

impl Default for DataElement {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for DataElement {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Number> for DataElement {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DataElement {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for DataElement {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f32> for DataElement {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for DataElement {
    fn from(value: f64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for DataElement {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DataElement {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<DataElement>> for DataElement {
    fn from(value: Vec<DataElement>) -> Self {
        Self::List(value)
    }
}

impl From<DataMap> for DataElement {
    fn from(value: DataMap) -> Self {
        Self::Map(value)
    }
}

/// A string-keyed map of elements preserving insertion order.
///
/// Keys are unique: [`put`](DataMap::put) with an existing key replaces the
/// value in place, keeping the key's original position. The insertion order
/// makes serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataMap {
    entries: Vec<(String, DataElement)>,
}

impl DataMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The element stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DataElement> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map has an entry under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `element` under `key`, replacing any existing entry in place.
    pub fn put(&mut self, key: impl Into<String>, element: impl Into<DataElement>) {
        let key = key.into();
        let element = element.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = element,
            None => self.entries.push((key, element)),
        }
    }

    /// Removes and returns the entry under `key`, if any.
    pub fn remove(&mut self, key: &str) -> Option<DataElement> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataElement)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, DataElement)> for DataMap {
    fn from_iter<I: IntoIterator<Item = (String, DataElement)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, element) in iter {
            map.put(key, element);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_insertion_order() {
        let mut map = DataMap::new();
        map.put("z", 1);
        map.put("a", 2);
        map.put("m", 3);
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn put_replaces_in_place() {
        let mut map = DataMap::new();
        map.put("a", 1);
        map.put("b", 2);
        map.put("a", 10);
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&DataElement::from(10)));
    }

    #[test]
    fn remove_returns_the_entry() {
        let mut map = DataMap::new();
        map.put("a", 1);
        assert_eq!(map.remove("a"), Some(DataElement::from(1)));
        assert_eq!(map.remove("a"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(DataElement::Null.kind(), ElementKind::Null);
        assert_eq!(DataElement::from(true).kind(), ElementKind::Boolean);
        assert_eq!(DataElement::from(1).kind(), ElementKind::Number);
        assert_eq!(DataElement::from("x").kind(), ElementKind::String);
        assert_eq!(DataElement::List(Vec::new()).kind(), ElementKind::List);
        assert_eq!(DataElement::Map(DataMap::new()).kind(), ElementKind::Map);
    }

    #[test]
    #[should_panic(expected = "expected map, got list")]
    fn accessor_panics_on_tag_mismatch() {
        DataElement::List(Vec::new()).as_map();
    }

    #[test]
    fn numbers_compare_by_decimal_value() {
        assert_eq!(DataElement::from(1), DataElement::from(1.0));
        assert_ne!(DataElement::from(1), DataElement::from(2));
    }
}
