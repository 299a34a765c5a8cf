//! Streaming JSON reader and writer.
//!
//! [`JsonReader`] is a pull parser and [`JsonWriter`] a push serializer, each
//! a character-level state machine tracking nested map/list scopes on a
//! stack. They are the concrete JSON realization of the [`DataReader`] and
//! [`DataWriter`] contracts.
//!
//! Accepted text: objects `{...}`, arrays `[...]`, strings delimited by `"`
//! or `'` (the reader is lenient on the delimiter, the writer always emits
//! `"`), numbers matching `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`,
//! and the literals `true`, `false` and `null`. Escapes recognized in both
//! directions: `\" \\ \b \f \n \r \t`.
//!
//! [`DataReader`]: crate::DataReader
//! [`DataWriter`]: crate::DataWriter

mod reader;
mod writer;


use alloc::string::String;

pub use reader::JsonReader;
pub use writer::{JsonWriter, Style};

use crate::{DataElement, ReadError, StrCursor, WriteError};

/// The nesting scope of a JSON reader or writer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Before the single root value.
    Root,
    /// Inside a map that already holds at least one entry.
    Map,
    /// Inside a map with no entries yet.
    EmptyMap,
    /// Inside a list that already holds at least one element.
    List,
    /// Inside a list with no elements yet.
    EmptyList,
    /// A key has been handled; its value is pending.
    Key,
    /// The root value has been fully handled.
    Closed,
}

impl Scope {
    pub(crate) fn is_map(self) -> bool {
        matches!(self, Scope::Map | Scope::EmptyMap)
    }

    pub(crate) fn is_list(self) -> bool {
        matches!(self, Scope::List | Scope::EmptyList)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Scope::Root => "root",
            Scope::Map => "map",
            Scope::EmptyMap => "empty map",
            Scope::List => "list",
            Scope::EmptyList => "empty list",
            Scope::Key => "key",
            Scope::Closed => "closed",
        }
    }
}

/// Parses one complete JSON value from `input` into a [`DataElement`] tree.
///
/// # Errors
///
/// Returns a [`ReadError`] on malformed input.
///
/// # Examples
///
/// ```
/// let element = dataform::json::from_str(r#"{"a": [1, true]}"#).unwrap();
/// assert_eq!(element.as_map().get("a").unwrap().as_list().len(), 2);
/// ```
pub fn from_str(input: &str) -> Result<DataElement, ReadError> {
    let mut reader = JsonReader::new(StrCursor::new(input));
    DataElement::read(&mut reader)
}

/// Serializes `element` to JSON text in the given [`Style`].
///
/// # Errors
///
/// Returns a [`WriteError`] if the tree contains a non-representable number.
pub fn to_string(element: &DataElement, style: Style) -> Result<String, WriteError> {
    let mut out = String::new();
    let mut writer = JsonWriter::new(&mut out, style);
    element.write(&mut writer)?;
    Ok(out)
}
