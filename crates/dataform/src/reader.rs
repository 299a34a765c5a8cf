//! The pull-side streaming contract.

use alloc::string::String;

use crate::{ElementKind, Number, ReadError};

/// A pull source of structured data, consumed by [`DataElement::read`] and by
/// codec decoders.
///
/// Implementations track the current nesting scope; the legal call sequences
/// mirror the JSON reader's transition tables. A reader instance holds
/// per-session state and must be driven by exactly one logical read operation
/// at a time.
///
/// [`DataElement::read`]: crate::DataElement::read
pub trait DataReader {
    /// Consumes the opening of a map and enters its scope.
    ///
    /// # Errors
    ///
    /// Fatal if the reader is not positioned before a map value.
    fn enter_map(&mut self) -> Result<(), ReadError>;

    /// Consumes the closing of the current map and leaves its scope.
    ///
    /// # Errors
    ///
    /// Fatal if the current scope is not a map.
    fn leave_map(&mut self) -> Result<(), ReadError>;

    /// Consumes the opening of a list and enters its scope.
    ///
    /// # Errors
    ///
    /// Fatal if the reader is not positioned before a list value.
    fn enter_list(&mut self) -> Result<(), ReadError>;

    /// Consumes the closing of the current list and leaves its scope.
    ///
    /// # Errors
    ///
    /// Fatal if the current scope is not a list.
    fn leave_list(&mut self) -> Result<(), ReadError>;

    /// Reads the next key of the current map.
    ///
    /// # Errors
    ///
    /// Fatal if the current scope is not a map or the key is malformed.
    fn read_key(&mut self) -> Result<String, ReadError>;

    /// Reads a boolean value.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token or an illegal position.
    fn read_bool(&mut self) -> Result<bool, ReadError>;

    /// Reads a number value as an `i32`.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token, overflow, or an illegal position.
    fn read_i32(&mut self) -> Result<i32, ReadError>;

    /// Reads a number value as an `i64`.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token, overflow, or an illegal position.
    fn read_i64(&mut self) -> Result<i64, ReadError>;

    /// Reads a number value as an `f32`.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token or an illegal position.
    fn read_f32(&mut self) -> Result<f32, ReadError>;

    /// Reads a number value as an `f64`.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token or an illegal position.
    fn read_f64(&mut self) -> Result<f64, ReadError>;

    /// Reads a number value, retaining its textual form.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token or an illegal position.
    fn read_number(&mut self) -> Result<Number, ReadError>;

    /// Reads a string value.
    ///
    /// # Errors
    ///
    /// Fatal on a malformed token or an illegal position.
    fn read_string(&mut self) -> Result<String, ReadError>;

    /// Consumes a null value.
    ///
    /// # Errors
    ///
    /// Fatal if the next token is not the null literal.
    fn read_null(&mut self) -> Result<(), ReadError>;

    /// Returns `true` if there is a next element *within* the current scope.
    ///
    /// At the end of a map this returns `false` even if more elements follow
    /// the map itself. Does not consume input tokens.
    ///
    /// # Errors
    ///
    /// Fatal if a key has been read but its value has not.
    fn has_next(&mut self) -> Result<bool, ReadError>;

    /// The type of the next element, determined without consuming it.
    ///
    /// # Errors
    ///
    /// Fatal if the next token is not an element.
    fn next_type(&mut self) -> Result<ElementKind, ReadError>;
}
