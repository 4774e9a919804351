//! Property tests: values that have a single textual form read back
//! as the same value.

use ednrw::value::{float, integer, keyword, map, string};
use ednrw::{decode, encode, Value};
use proptest::prelude::*;

fn roundtrip(value: &Value) -> bool {
    match encode(value) {
        Ok(text) => match decode(&text) {
            Ok(back) => *value == back,
            Err(e) => {
                eprintln!("Decode failed: {}", e);
                eprintln!("Encoded was: {}", text);
                false
            }
        },
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&string(&s)));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&integer(n)));
    }

    #[test]
    // NaN payloads other than the canonical one don't survive
    fn prop_f64(x in any::<f64>().prop_filter("not NaN", |x| !x.is_nan())) {
        prop_assert!(roundtrip(&float(x)));
    }

    #[test]
    fn prop_keyword(name in "[a-z][a-z0-9_.*/+!?-]{0,12}") {
        prop_assert!(roundtrip(&keyword(&name)));
    }

    #[test]
    fn prop_vector(v in prop::collection::vec(any::<i64>(), 0..20)) {
        prop_assert!(roundtrip(&Value::Vector(v.into_iter().map(integer).collect())));
    }

    #[test]
    fn prop_string_keyed_map(
        entries in prop::collection::vec((any::<String>(), any::<i64>()), 0..10)
    ) {
        let m = map(entries.into_iter().map(|(k, v)| (string(&k), integer(v))));
        prop_assert!(roundtrip(&m));
    }

    #[test]
    fn prop_nested_map(
        entries in prop::collection::vec(("[a-z]{1,5}", prop::collection::vec(any::<i64>(), 0..4)), 0..6)
    ) {
        let m = map(entries.into_iter().map(|(k, v)| {
            (string(&k), Value::Vector(v.into_iter().map(integer).collect()))
        }));
        prop_assert!(roundtrip(&Value::Vector(vec![m, Value::Nil, Value::Bool(true)])));
    }
}
