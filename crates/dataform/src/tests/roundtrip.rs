use quickcheck::QuickCheck;

use crate::{
    DataElement,
    json::{Style, from_str, to_string},
};

/// Property: serializing any tree and parsing the result back must yield an
/// equal tree, in both compact and pretty styles.
#[test]
fn tree_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(element: DataElement) -> bool {
        let compact = to_string(&element, Style::compact()).unwrap();
        let pretty = to_string(&element, Style::pretty("  ")).unwrap();
        from_str(&compact).unwrap() == element && from_str(&pretty).unwrap() == element
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(DataElement) -> bool);
}

/// Property: compact serialization is a fixed point: parse and re-serialize
/// returns the identical text.
#[test]
fn compact_text_fixed_point_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(element: DataElement) -> bool {
        let text = to_string(&element, Style::compact()).unwrap();
        let reparsed = from_str(&text).unwrap();
        to_string(&reparsed, Style::compact()).unwrap() == text
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(DataElement) -> bool);
}
