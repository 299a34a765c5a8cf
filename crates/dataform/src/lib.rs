//! Format-agnostic structured data: a tagged tree model, streaming
//! reader/writer contracts, a complete streaming JSON implementation of those
//! contracts, and a typed codec combinator framework on top.
//!
//! The crate is organized in three layers:
//!
//! - [`DataElement`] is an ordinary tree of JSON-like values (null, boolean,
//!   number, string, list, string-keyed map). It can be built in memory, read
//!   from any [`DataReader`], and written to any [`DataWriter`].
//! - The [`json`] module provides [`json::JsonReader`] and
//!   [`json::JsonWriter`], character-level state machines implementing the
//!   reader/writer contracts for JSON text.
//! - The [`codec`] module maps application types to and from [`DataElement`]
//!   trees with composable, fail-fast encoders and decoders.
//!
//! # Example
//!
//! ```
//! use dataform::codec::{Codec, Decoder, Encoder, I32Codec, StringCodec, group2};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     label: String,
//!     value: i32,
//! }
//!
//! let codec = group2(
//!     StringCodec.field_of("label").bind(|p: &Point| p.label.clone()),
//!     I32Codec.field_of("value").bind(|p: &Point| p.value),
//! )
//! .build(|label, value| Point { label, value });
//!
//! let point = Point { label: "answer".into(), value: 42 };
//! let tree = codec.encode(&point).unwrap();
//! let json = dataform::json::to_string(&tree, dataform::json::Style::compact()).unwrap();
//! assert_eq!(json, r#"{"label":"answer","value":42}"#);
//!
//! let back = codec.decode(&dataform::json::from_str(&json).unwrap()).unwrap();
//! assert_eq!(back, point);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod codec;
mod cursor;
mod element;
mod error;
pub mod json;
mod number;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use cursor::{CharsCursor, Cursor, StrCursor};
pub use element::{DataElement, DataMap, ElementKind};
pub use error::{ReadError, WriteError};
pub use number::{Number, NumberError};
pub use reader::DataReader;
pub use writer::DataWriter;
