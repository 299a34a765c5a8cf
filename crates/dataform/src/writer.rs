//! The push-side streaming contract.

use crate::{Number, WriteError};

/// A push sink for structured data, produced by [`DataElement::write`] and by
/// codec encoders.
///
/// Implementations track the current nesting scope; the legal call sequences
/// mirror the JSON writer's transition tables. A writer instance holds
/// per-session state and must be driven by exactly one logical write
/// operation at a time.
///
/// [`DataElement::write`]: crate::DataElement::write
pub trait DataWriter {
    /// Starts a new map.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn open_map(&mut self) -> Result<(), WriteError>;

    /// Ends the open map.
    ///
    /// # Errors
    ///
    /// Fatal if there is no map to close or a key is awaiting its value.
    fn close_map(&mut self) -> Result<(), WriteError>;

    /// Starts a new list.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn open_list(&mut self) -> Result<(), WriteError>;

    /// Ends the open list.
    ///
    /// # Errors
    ///
    /// Fatal if there is no list to close.
    fn close_list(&mut self) -> Result<(), WriteError>;

    /// Writes a key into the open map.
    ///
    /// # Errors
    ///
    /// Fatal if there is no open map or a key is awaiting its value.
    fn key(&mut self, key: &str) -> Result<(), WriteError>;

    /// Writes a boolean value.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn value_bool(&mut self, value: bool) -> Result<(), WriteError>;

    /// Writes an `i32` value.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn value_i32(&mut self, value: i32) -> Result<(), WriteError>;

    /// Writes an `i64` value.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn value_i64(&mut self, value: i64) -> Result<(), WriteError>;

    /// Writes an `f32` value.
    ///
    /// # Errors
    ///
    /// Fatal if the value is not finite or the writer is not expecting a
    /// value.
    fn value_f32(&mut self, value: f32) -> Result<(), WriteError>;

    /// Writes an `f64` value.
    ///
    /// # Errors
    ///
    /// Fatal if the value is not finite or the writer is not expecting a
    /// value.
    fn value_f64(&mut self, value: f64) -> Result<(), WriteError>;

    /// Writes a number value verbatim from its textual form.
    ///
    /// # Errors
    ///
    /// Fatal if the retained text is not a valid number literal or the
    /// writer is not expecting a value.
    fn value_number(&mut self, value: &Number) -> Result<(), WriteError>;

    /// Writes a string value.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn value_string(&mut self, value: &str) -> Result<(), WriteError>;

    /// Writes a null value.
    ///
    /// # Errors
    ///
    /// Fatal if the writer is not expecting a value.
    fn value_null(&mut self) -> Result<(), WriteError>;
}
