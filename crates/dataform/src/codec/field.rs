//! Field codecs: codecs bound to a named key inside a map element.

use alloc::string::String;
use core::marker::PhantomData;

use super::{Codec, CodecError, as_map};
use crate::{DataElement, DataMap};

/// A codec addressing one named entry of a map element.
///
/// Built by [`Codec::field_of`]. On its own a field codec reads and writes a
/// single entry; [`bind`](FieldCodec::bind) attaches a getter so several
/// fields can be combined into a record codec by the `group` constructors.
#[derive(Debug, Clone)]
pub struct FieldCodec<C> {
    key: String,
    codec: C,
}

impl<C> FieldCodec<C> {
    pub(super) fn new(key: String, codec: C) -> Self {
        Self { key, codec }
    }

    /// The key this codec addresses.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encodes `value` as an entry of `map` under this codec's key.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the inner codec.
    pub fn encode_field<T>(&self, value: &T, map: &mut DataMap) -> Result<(), CodecError>
    where
        C: Codec<T>,
    {
        let element = self.codec.encode(value)?;
        map.put(self.key.clone(), element);
        Ok(())
    }

    /// Decodes this codec's entry out of a map element.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::Mismatch`] if `element` is not a map, with
    /// [`CodecError::MissingKey`] if the key is absent, and otherwise
    /// propagates the inner codec's result.
    pub fn decode_field<T>(&self, element: &DataElement) -> Result<T, CodecError>
    where
        C: Codec<T>,
    {
        let map = as_map(element)?;
        let entry = map
            .get(&self.key)
            .ok_or_else(|| CodecError::MissingKey(self.key.clone()))?;
        self.codec.decode(entry)
    }

    /// Attaches a getter projecting the field's value out of a record type,
    /// making the field usable in a `group` constructor.
    pub fn bind<O, T, G>(self, getter: G) -> BoundFieldCodec<T, C, G>
    where
        C: Codec<T>,
        G: Fn(&O) -> T,
    {
        BoundFieldCodec {
            field: self,
            getter,
            _marker: PhantomData,
        }
    }
}

/// A field codec paired with a getter into a record type.
///
/// Built by [`FieldCodec::bind`].
#[derive(Debug, Clone)]
pub struct BoundFieldCodec<T, C, G> {
    field: FieldCodec<C>,
    getter: G,
    _marker: PhantomData<fn() -> T>,
}

/// One field of a record codec: knows how to place itself into a shared map
/// during encoding and how to extract its value during decoding.
pub trait BoundField<O> {
    /// The field's value type.
    type Field;

    /// Encodes this field of `value` into `map`.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying codec.
    fn encode_into(&self, value: &O, map: &mut DataMap) -> Result<(), CodecError>;

    /// Decodes this field's value out of a map element.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying codec.
    fn decode_from(&self, element: &DataElement) -> Result<Self::Field, CodecError>;
}

impl<O, T, C, G> BoundField<O> for BoundFieldCodec<T, C, G>
where
    C: Codec<T>,
    G: Fn(&O) -> T,
{
    type Field = T;

    fn encode_into(&self, value: &O, map: &mut DataMap) -> Result<(), CodecError> {
        let field = (self.getter)(value);
        self.field.encode_field(&field, map)
    }

    fn decode_from(&self, element: &DataElement) -> Result<T, CodecError> {
        self.field.decode_field(element)
    }
}
