//! Fatal error types for the streaming reader/writer boundary.
//!
//! These errors abort the current read or write session; there is no recovery
//! path inside the engine. Recoverable shape errors live in
//! [`codec::CodecError`](crate::codec::CodecError) instead.

use alloc::string::String;

use thiserror::Error;

/// A fatal error raised while pulling data from a [`DataReader`].
///
/// [`DataReader`]: crate::DataReader
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The next character in the input did not match the grammar.
    #[error("unexpected character '{found}', expected '{expected}'")]
    UnexpectedChar {
        /// The character the grammar required here.
        expected: char,
        /// The character actually present.
        found: char,
    },

    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The operation is not legal in the reader's current scope.
    #[error("cannot {operation} in {state} state")]
    IllegalState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The scope the reader was in.
        state: &'static str,
    },

    /// An unquoted token that is neither a literal nor a number.
    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    /// A token that fails the number grammar or does not fit the requested
    /// numeric type.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// A backslash escape outside the supported escape table.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    /// A quoted token with no closing delimiter before end of input.
    #[error("unterminated string")]
    UnterminatedString,
}

/// A fatal error raised while pushing data into a [`DataWriter`].
///
/// [`DataWriter`]: crate::DataWriter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    /// The operation is not legal in the writer's current scope.
    #[error("cannot {operation} in {state} state")]
    IllegalState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The scope the writer was in.
        state: &'static str,
    },

    /// JSON has no representation for NaN or infinities.
    #[error("number {0} cannot be represented")]
    NonFinite(f64),

    /// A [`Number`](crate::Number) whose retained text fails the grammar.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// Propagated from the underlying character sink.
    #[error(transparent)]
    Fmt(#[from] core::fmt::Error),
}
