//! Record codecs assembled from bound fields.
//!
//! A `groupN` call collects `N` bound fields; `build` attaches a constructor
//! and yields a codec for the record type. Encoding writes every field into
//! one shared map in declaration order; decoding extracts every field and
//! applies the constructor. Both directions are fail-fast.

use core::marker::PhantomData;

use super::field::BoundField;
use super::{CodecError, Decoder, Encoder};
use crate::{DataElement, DataMap};

macro_rules! impl_group {
    (
        #[doc = $doc:literal]
        $group:ident, $codec:ident, $constructor:ident:
        $($ty:ident / $field:ident . $idx:tt),+
    ) => {
        #[doc = $doc]
        ///
        /// Call [`build`](Self::build) with the record constructor to obtain
        /// the codec.
        #[derive(Debug, Clone)]
        pub struct $group<$($ty),+> {
            fields: ($($ty,)+),
        }

        #[doc = $doc]
        pub fn $constructor<$($ty),+>($($field: $ty),+) -> $group<$($ty),+> {
            $group { fields: ($($field,)+) }
        }

        impl<$($ty),+> $group<$($ty),+> {
            /// Attaches the record constructor, completing the codec.
            pub fn build<O, F>(self, ctor: F) -> $codec<O, F, $($ty),+>
            where
                $($ty: BoundField<O>,)+
                F: Fn($($ty::Field),+) -> O,
            {
                $codec {
                    fields: self.fields,
                    ctor,
                    _marker: PhantomData,
                }
            }
        }

        /// A complete record codec. Built by the matching group's `build`.
        #[derive(Debug, Clone)]
        pub struct $codec<O, F, $($ty),+>
        where
            $($ty: BoundField<O>,)+
            F: Fn($($ty::Field),+) -> O,
        {
            fields: ($($ty,)+),
            ctor: F,
            _marker: PhantomData<fn() -> O>,
        }

        impl<O, F, $($ty),+> Encoder<O> for $codec<O, F, $($ty),+>
        where
            $($ty: BoundField<O>,)+
            F: Fn($($ty::Field),+) -> O,
        {
            fn encode(&self, value: &O) -> Result<DataElement, CodecError> {
                let mut map = DataMap::new();
                $(self.fields.$idx.encode_into(value, &mut map)?;)+
                Ok(DataElement::Map(map))
            }
        }

        impl<O, F, $($ty),+> Decoder<O> for $codec<O, F, $($ty),+>
        where
            $($ty: BoundField<O>,)+
            F: Fn($($ty::Field),+) -> O,
        {
            fn decode(&self, element: &DataElement) -> Result<O, CodecError> {
                Ok((self.ctor)($(self.fields.$idx.decode_from(element)?),+))
            }
        }
    };
}

impl_group! {
    #[doc = "Groups one bound field into a record codec."]
    Group1, GroupCodec1, group1: A/a.0
}

impl_group! {
    #[doc = "Groups two bound fields into a record codec."]
    Group2, GroupCodec2, group2: A/a.0, B/b.1
}

impl_group! {
    #[doc = "Groups three bound fields into a record codec."]
    Group3, GroupCodec3, group3: A/a.0, B/b.1, C/c.2
}

impl_group! {
    #[doc = "Groups four bound fields into a record codec."]
    Group4, GroupCodec4, group4: A/a.0, B/b.1, C/c.2, D/d.3
}
