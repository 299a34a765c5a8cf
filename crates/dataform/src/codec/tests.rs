use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::cell::Cell;

use rstest::rstest;

use super::{
    BoolCodec, Codec, CodecError, Decoder, Encoder, F64Codec, I32Codec, I64Codec, NumberCodec,
    StringCodec, group1, group2, group3, group4,
};
use crate::{DataElement, DataMap, ElementKind, Number};

/// Counts decode attempts and fails once a threshold is reached.
struct Probe<'a> {
    decodes: &'a Cell<usize>,
    fail_from: usize,
}

impl<'a> Probe<'a> {
    fn new(decodes: &'a Cell<usize>) -> Self {
        Self {
            decodes,
            fail_from: usize::MAX,
        }
    }

    fn failing_from(decodes: &'a Cell<usize>, fail_from: usize) -> Self {
        Self { decodes, fail_from }
    }
}

impl Encoder<i32> for Probe<'_> {
    fn encode(&self, value: &i32) -> Result<DataElement, CodecError> {
        I32Codec.encode(value)
    }
}

impl Decoder<i32> for Probe<'_> {
    fn decode(&self, element: &DataElement) -> Result<i32, CodecError> {
        let seen = self.decodes.get();
        self.decodes.set(seen + 1);
        if seen >= self.fail_from {
            return Err(CodecError::Message("probe failure".into()));
        }
        I32Codec.decode(element)
    }
}

/// Always fails, both directions.
struct FailCodec;

impl Encoder<i32> for FailCodec {
    fn encode(&self, _: &i32) -> Result<DataElement, CodecError> {
        Err(CodecError::Message("encode rejected".into()))
    }
}

impl Decoder<i32> for FailCodec {
    fn decode(&self, _: &DataElement) -> Result<i32, CodecError> {
        Err(CodecError::Message("decode rejected".into()))
    }
}

#[test]
fn bool_round_trip() {
    let encoded = BoolCodec.encode(&true).unwrap();
    assert_eq!(encoded, DataElement::Boolean(true));
    assert!(BoolCodec.decode(&encoded).unwrap());
}

#[rstest]
#[case(0)]
#[case(i32::MIN)]
#[case(i32::MAX)]
fn i32_round_trip(#[case] value: i32) {
    let encoded = I32Codec.encode(&value).unwrap();
    assert_eq!(I32Codec.decode(&encoded).unwrap(), value);
}

#[test]
fn string_round_trip() {
    let value = "hello".to_string();
    let encoded = StringCodec.encode(&value).unwrap();
    assert_eq!(StringCodec.decode(&encoded).unwrap(), value);
}

#[test]
fn f64_round_trip() {
    let encoded = F64Codec.encode(&1.5).unwrap();
    assert_eq!(F64Codec.decode(&encoded).unwrap(), 1.5);
}

#[test]
fn number_codec_preserves_text() {
    let number = Number::parse("1.20e1").unwrap();
    let encoded = NumberCodec.encode(&number).unwrap();
    assert_eq!(NumberCodec.decode(&encoded).unwrap().as_str(), "1.20e1");
}

#[test]
fn mismatch_reports_both_kinds() {
    let err = I32Codec
        .decode(&DataElement::String("oops".into()))
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::Mismatch {
            expected: ElementKind::Number,
            actual: ElementKind::String,
        }
    );
    assert_eq!(err.to_string(), "expected number, got string");
}

#[test]
fn narrow_decode_is_recoverable() {
    let wide = DataElement::Number(Number::from(i64::MAX));
    assert!(matches!(
        I32Codec.decode(&wide),
        Err(CodecError::Number(_))
    ));
    assert_eq!(I64Codec.decode(&wide).unwrap(), i64::MAX);
}

#[test]
fn list_round_trip() {
    let codec = I32Codec.list_of();
    let encoded = codec.encode(&vec![1, 2, 3]).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), vec![1, 2, 3]);
}

#[test]
fn list_decode_requires_list() {
    let codec = I32Codec.list_of();
    assert_eq!(
        codec.decode(&DataElement::Boolean(true)).unwrap_err(),
        CodecError::Mismatch {
            expected: ElementKind::List,
            actual: ElementKind::Boolean,
        }
    );
}

#[test]
fn list_decode_stops_at_first_failure() {
    let decodes = Cell::new(0);
    let codec = Probe::new(&decodes).list_of();
    let element = DataElement::List(vec![
        DataElement::from(1),
        DataElement::String("x".into()),
        DataElement::from(3),
    ]);
    assert!(codec.decode(&element).is_err());
    // The third element is never attempted.
    assert_eq!(decodes.get(), 2);
}

#[test]
fn field_reads_named_entry() {
    let codec = I32Codec.field_of("age");
    let mut map = DataMap::new();
    map.put("age".to_string(), DataElement::from(36));
    assert_eq!(codec.decode_field(&DataElement::Map(map)).unwrap(), 36);
}

#[test]
fn field_missing_key() {
    let codec = I32Codec.field_of("age");
    let err = codec
        .decode_field::<i32>(&DataElement::Map(DataMap::new()))
        .unwrap_err();
    assert_eq!(err, CodecError::MissingKey("age".into()));
    assert_eq!(err.to_string(), "map does not have key \"age\"");
}

#[test]
fn field_requires_map() {
    let codec = I32Codec.field_of("age");
    assert_eq!(
        codec.decode_field::<i32>(&DataElement::Null).unwrap_err(),
        CodecError::Mismatch {
            expected: ElementKind::Map,
            actual: ElementKind::Null,
        }
    );
}

#[test]
fn fields_share_one_map() {
    let mut map = DataMap::new();
    I32Codec.field_of("x").encode_field(&1, &mut map).unwrap();
    I32Codec.field_of("y").encode_field(&2, &mut map).unwrap();
    let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["x", "y"]);
}

#[test]
fn nullable_none_is_null() {
    let codec = I32Codec.nullable();
    assert_eq!(codec.encode(&None).unwrap(), DataElement::Null);
    assert_eq!(codec.encode(&Some(7)).unwrap(), DataElement::from(7));
}

#[test]
fn nullable_null_skips_inner_decoder() {
    let decodes = Cell::new(0);
    let codec = Probe::new(&decodes).nullable();
    assert_eq!(codec.decode(&DataElement::Null).unwrap(), None);
    assert_eq!(decodes.get(), 0);
    assert_eq!(codec.decode(&DataElement::from(7)).unwrap(), Some(7));
    assert_eq!(decodes.get(), 1);
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

fn point_codec() -> impl Codec<Point> {
    group2(
        I32Codec.field_of("x").bind(|p: &Point| p.x),
        I32Codec.field_of("y").bind(|p: &Point| p.y),
    )
    .build(|x, y| Point { x, y })
}

#[test]
fn group2_round_trip() {
    let codec = point_codec();
    let point = Point { x: 3, y: -4 };
    let encoded = codec.encode(&point).unwrap();
    let map = encoded.as_map();
    assert_eq!(map.get("x").unwrap(), &DataElement::from(3));
    assert_eq!(map.get("y").unwrap(), &DataElement::from(-4));
    assert_eq!(codec.decode(&encoded).unwrap(), point);
}

#[test]
fn group1_round_trip() {
    let codec = group1(I32Codec.field_of("value").bind(|v: &i32| *v)).build(|value| value);
    let encoded = codec.encode(&42).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), 42);
}

#[derive(Debug, Clone, PartialEq)]
struct User {
    name: String,
    age: i32,
    nickname: Option<String>,
}

fn user_codec() -> impl Codec<User> {
    group3(
        StringCodec.field_of("name").bind(|u: &User| u.name.clone()),
        I32Codec.field_of("age").bind(|u: &User| u.age),
        StringCodec
            .nullable()
            .field_of("nickname")
            .bind(|u: &User| u.nickname.clone()),
    )
    .build(|name, age, nickname| User {
        name,
        age,
        nickname,
    })
}

#[rstest]
#[case(Some("lovelace".to_string()))]
#[case(None)]
fn group3_with_nullable_field(#[case] nickname: Option<String>) {
    let codec = user_codec();
    let user = User {
        name: "ada".into(),
        age: 36,
        nickname,
    };
    let encoded = codec.encode(&user).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), user);
}

#[test]
fn group_encode_preserves_field_order() {
    let codec = user_codec();
    let user = User {
        name: "ada".into(),
        age: 36,
        nickname: None,
    };
    let encoded = codec.encode(&user).unwrap();
    let keys: Vec<&str> = encoded.as_map().iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["name", "age", "nickname"]);
}

#[test]
fn group_decode_missing_field() {
    let codec = point_codec();
    let mut map = DataMap::new();
    map.put("x".to_string(), DataElement::from(1));
    assert_eq!(
        codec.decode(&DataElement::Map(map)).unwrap_err(),
        CodecError::MissingKey("y".into())
    );
}

#[test]
fn group_encode_stops_at_first_failure() {
    let decodes = Cell::new(0);
    let codec = group2(
        FailCodec.field_of("a").bind(|v: &i32| *v),
        Probe::new(&decodes).field_of("b").bind(|v: &i32| *v),
    )
    .build(|a, _| a);
    assert_eq!(
        codec.encode(&1).unwrap_err(),
        CodecError::Message("encode rejected".into())
    );
}

#[test]
fn group_decode_stops_at_first_failure() {
    let decodes = Cell::new(0);
    let codec = group2(
        Probe::failing_from(&decodes, 0).field_of("a").bind(|v: &i32| *v),
        Probe::new(&decodes).field_of("b").bind(|v: &i32| *v),
    )
    .build(|a, _| a);
    let mut map = DataMap::new();
    map.put("a".to_string(), DataElement::from(1));
    map.put("b".to_string(), DataElement::from(2));
    assert!(codec.decode(&DataElement::Map(map)).is_err());
    // Only the failing first field was consulted.
    assert_eq!(decodes.get(), 1);
}

#[test]
fn group4_round_trip() {
    #[derive(Debug, Clone, PartialEq)]
    struct Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    }

    let codec = group4(
        I32Codec.field_of("x").bind(|r: &Rect| r.x),
        I32Codec.field_of("y").bind(|r: &Rect| r.y),
        I32Codec.field_of("w").bind(|r: &Rect| r.w),
        I32Codec.field_of("h").bind(|r: &Rect| r.h),
    )
    .build(|x, y, w, h| Rect { x, y, w, h });

    let rect = Rect {
        x: 0,
        y: 1,
        w: 10,
        h: 20,
    };
    let encoded = codec.encode(&rect).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), rect);
}

#[test]
fn nested_record_in_list() {
    let codec = point_codec().list_of();
    let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
    let encoded = codec.encode(&points).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), points);
}
