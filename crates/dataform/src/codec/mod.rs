//! Typed codecs over [`DataElement`] trees.
//!
//! A [`Codec`] pairs an [`Encoder`] and a [`Decoder`] for one application
//! type. Codecs compose: [`Codec::list_of`] lifts a codec over sequences,
//! [`Codec::nullable`] over optional values, and [`Codec::field_of`] binds a
//! codec to a named map key so that several fields can be grouped into a
//! record codec with [`group1`]..[`group4`].
//!
//! All failures in this layer are recoverable: they are carried as
//! [`CodecError`] values and propagate through every combinator by
//! short-circuiting. Composition is fail-fast; the first error wins and no
//! partial results are surfaced. The layer holds no mutable state; all
//! statefulness lives in the streaming engine.
//!
//! # Examples
//!
//! ```
//! use dataform::codec::{Codec, Decoder, Encoder, I32Codec, StringCodec, group2};
//!
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! let codec = group2(
//!     StringCodec.field_of("name").bind(|u: &User| u.name.clone()),
//!     I32Codec.field_of("age").bind(|u: &User| u.age),
//! )
//! .build(|name, age| User { name, age });
//!
//! let tree = codec.encode(&User { name: "ada".into(), age: 36 }).unwrap();
//! let user = codec.decode(&tree).unwrap();
//! assert_eq!(user.age, 36);
//! ```

mod field;
mod group;

#[cfg(test)]
mod tests;

use alloc::{string::String, vec::Vec};

use thiserror::Error;

pub use field::{BoundField, BoundFieldCodec, FieldCodec};
pub use group::{
    Group1, Group2, Group3, Group4, GroupCodec1, GroupCodec2, GroupCodec3, GroupCodec4, group1,
    group2, group3, group4,
};

use crate::{DataElement, DataMap, ElementKind, Number, NumberError};

/// A recoverable encode/decode failure.
///
/// Unlike the fatal errors of the streaming engine, codec errors are ordinary
/// values: callers decide whether to log, abort, or fall back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The element's variant does not match what the codec expects.
    #[error("expected {expected}, got {actual}")]
    Mismatch {
        /// The variant the codec expected.
        expected: ElementKind,
        /// The variant actually present.
        actual: ElementKind,
    },

    /// A field codec found no entry under its key.
    #[error("map does not have key \"{0}\"")]
    MissingKey(String),

    /// A number that cannot be represented in the target numeric type.
    #[error(transparent)]
    Number(#[from] NumberError),

    /// A custom failure from a user-defined codec.
    #[error("{0}")]
    Message(String),
}

pub(crate) fn mismatch(expected: ElementKind, actual: &DataElement) -> CodecError {
    CodecError::Mismatch {
        expected,
        actual: actual.kind(),
    }
}

/// Encodes values of type `T` into [`DataElement`] trees.
pub trait Encoder<T> {
    /// Encodes `value`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodecError`] encountered.
    fn encode(&self, value: &T) -> Result<DataElement, CodecError>;
}

/// Decodes values of type `T` out of [`DataElement`] trees.
pub trait Decoder<T> {
    /// Decodes `element`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodecError`] encountered.
    fn decode(&self, element: &DataElement) -> Result<T, CodecError>;
}

/// A paired encoder and decoder, carrying the combinators.
///
/// Implemented automatically for anything that is both an [`Encoder`] and a
/// [`Decoder`] for the same type.
pub trait Codec<T>: Encoder<T> + Decoder<T> {
    /// Lifts this codec over ordered sequences.
    ///
    /// Elements are encoded and decoded in order with the first failure
    /// aborting the whole operation.
    fn list_of(self) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec { element: self }
    }

    /// Binds this codec to a named key inside a map element.
    fn field_of(self, key: impl Into<String>) -> FieldCodec<Self>
    where
        Self: Sized,
    {
        FieldCodec::new(key.into(), self)
    }

    /// Lifts this codec over optional values.
    ///
    /// `None` encodes to the null element; decoding a null element yields
    /// `None` without consulting this codec.
    fn nullable(self) -> NullableCodec<Self>
    where
        Self: Sized,
    {
        NullableCodec { inner: self }
    }
}

impl<T, C: Encoder<T> + Decoder<T>> Codec<T> for C {}

/// Codec for `bool` against the boolean element.
#[derive(Debug, Clone, Copy)]
pub struct BoolCodec;

impl Encoder<bool> for BoolCodec {
    fn encode(&self, value: &bool) -> Result<DataElement, CodecError> {
        Ok(DataElement::Boolean(*value))
    }
}

impl Decoder<bool> for BoolCodec {
    fn decode(&self, element: &DataElement) -> Result<bool, CodecError> {
        match element {
            DataElement::Boolean(b) => Ok(*b),
            other => Err(mismatch(ElementKind::Boolean, other)),
        }
    }
}

macro_rules! numeric_codec {
    ($(#[$doc:meta] $name:ident => $ty:ty, $extract:ident;)+) => {
        $(
            #[$doc]
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Encoder<$ty> for $name {
                fn encode(&self, value: &$ty) -> Result<DataElement, CodecError> {
                    Ok(DataElement::Number(Number::from(*value)))
                }
            }

            impl Decoder<$ty> for $name {
                fn decode(&self, element: &DataElement) -> Result<$ty, CodecError> {
                    match element {
                        DataElement::Number(n) => Ok(n.$extract()?),
                        other => Err(mismatch(ElementKind::Number, other)),
                    }
                }
            }
        )+
    };
}

numeric_codec! {
    /// Codec for `i32` against the number element.
    I32Codec => i32, as_i32;
    /// Codec for `i64` against the number element.
    I64Codec => i64, as_i64;
    /// Codec for `f32` against the number element.
    F32Codec => f32, as_f32;
    /// Codec for `f64` against the number element.
    F64Codec => f64, as_f64;
}

/// Codec for `String` against the string element.
#[derive(Debug, Clone, Copy)]
pub struct StringCodec;

impl Encoder<String> for StringCodec {
    fn encode(&self, value: &String) -> Result<DataElement, CodecError> {
        Ok(DataElement::String(value.clone()))
    }
}

impl Decoder<String> for StringCodec {
    fn decode(&self, element: &DataElement) -> Result<String, CodecError> {
        match element {
            DataElement::String(s) => Ok(s.clone()),
            other => Err(mismatch(ElementKind::String, other)),
        }
    }
}

/// Codec for a `Number` element held as-is.
#[derive(Debug, Clone, Copy)]
pub struct NumberCodec;

impl Encoder<Number> for NumberCodec {
    fn encode(&self, value: &Number) -> Result<DataElement, CodecError> {
        Ok(DataElement::Number(value.clone()))
    }
}

impl Decoder<Number> for NumberCodec {
    fn decode(&self, element: &DataElement) -> Result<Number, CodecError> {
        match element {
            DataElement::Number(n) => Ok(n.clone()),
            other => Err(mismatch(ElementKind::Number, other)),
        }
    }
}

/// Lifts a codec over ordered sequences. Built by [`Codec::list_of`].
#[derive(Debug, Clone, Copy)]
pub struct ListCodec<C> {
    element: C,
}

impl<T, C: Codec<T>> Encoder<Vec<T>> for ListCodec<C> {
    fn encode(&self, values: &Vec<T>) -> Result<DataElement, CodecError> {
        let mut elements = Vec::with_capacity(values.len());
        for value in values {
            elements.push(self.element.encode(value)?);
        }
        Ok(DataElement::List(elements))
    }
}

impl<T, C: Codec<T>> Decoder<Vec<T>> for ListCodec<C> {
    fn decode(&self, element: &DataElement) -> Result<Vec<T>, CodecError> {
        match element {
            DataElement::List(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.element.decode(element)?);
                }
                Ok(values)
            }
            other => Err(mismatch(ElementKind::List, other)),
        }
    }
}

/// Lifts a codec over optional values. Built by [`Codec::nullable`].
#[derive(Debug, Clone, Copy)]
pub struct NullableCodec<C> {
    inner: C,
}

impl<T, C: Codec<T>> Encoder<Option<T>> for NullableCodec<C> {
    fn encode(&self, value: &Option<T>) -> Result<DataElement, CodecError> {
        match value {
            Some(value) => self.inner.encode(value),
            None => Ok(DataElement::Null),
        }
    }
}

impl<T, C: Codec<T>> Decoder<Option<T>> for NullableCodec<C> {
    fn decode(&self, element: &DataElement) -> Result<Option<T>, CodecError> {
        match element {
            DataElement::Null => Ok(None),
            other => self.inner.decode(other).map(Some),
        }
    }
}

/// Shared by field codecs: require a map element.
pub(crate) fn as_map(element: &DataElement) -> Result<&DataMap, CodecError> {
    match element {
        DataElement::Map(map) => Ok(map),
        other => Err(mismatch(ElementKind::Map, other)),
    }
}
