use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{DataElement, DataMap, Number};

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Number::from(i64::arbitrary(g))
        } else {
            let mut value = f64::arbitrary(g);
            while !value.is_finite() {
                value = f64::arbitrary(g);
            }
            Number::from(value)
        }
    }
}

impl Arbitrary for DataElement {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_element(g: &mut Gen, depth: usize) -> DataElement {
            let variants = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % variants {
                0 => DataElement::Null,
                1 => DataElement::Boolean(bool::arbitrary(g)),
                2 => DataElement::Number(Number::arbitrary(g)),
                3 => DataElement::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 3;
                    DataElement::List((0..len).map(|_| gen_element(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 3;
                    let mut map = DataMap::new();
                    for _ in 0..len {
                        map.put(String::arbitrary(g), gen_element(g, depth - 1));
                    }
                    DataElement::Map(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_element(g, depth)
    }
}
