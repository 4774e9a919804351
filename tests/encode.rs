use anyhow::Result;
use chrono::FixedOffset;
use ednrw::settings::{ENCODE_SETTINGS, TIMESTAMP_ENCODE_SETTINGS};
use ednrw::value::{float, integer, keyword, map, pair, string, symbol};
use ednrw::{decode, encode, encode_with, EncodeError, EncodeSettings, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn list(items: Vec<Value>) -> Value {
    Value::List(items)
}

#[test]
fn atoms() -> Result<()> {
    assert_eq!(encode(&integer(150))?, "150");
    assert_eq!(encode(&integer(-3))?, "-3");
    assert_eq!(encode(&float(1.5))?, "1.5");
    assert_eq!(encode(&float(1.0))?, "1.0");
    assert_eq!(encode(&float(-0.25))?, "-0.25");
    assert_eq!(encode(&Value::Bool(true))?, "true");
    assert_eq!(encode(&Value::Bool(false))?, "false");
    assert_eq!(encode(&Value::Nil)?, "nil");
    assert_eq!(encode(&keyword("foo"))?, ":foo");
    Ok(())
}

#[test]
fn symbols_become_strings() -> Result<()> {
    assert_eq!(encode(&symbol("foo"))?, "\"foo\"");
    Ok(())
}

#[test]
fn strings() -> Result<()> {
    assert_eq!(encode(&string("hello world"))?, "\"hello world\"");
    assert_eq!(encode(&string("a\nb"))?, "\"a\\nb\"");
    assert_eq!(encode(&string("q\"\\\t\r\x08\x0C"))?, r#""q\"\\\t\r\b\f""#);
    assert_eq!(encode(&string("é\u{1}\u{7f}"))?, r#""\u00e9\u0001\u007f""#);
    assert_eq!(encode(&string("😀"))?, r#""\ud83d\ude00""#);
    Ok(())
}

#[test]
fn containers() -> Result<()> {
    assert_eq!(encode(&list(vec![string("hello"), string("world")]))?,
               "(\"hello\" \"world\")");
    assert_eq!(encode(&Value::Vector(vec![string("hello"), string("world")]))?,
               "[\"hello\" \"world\"]");
    assert_eq!(encode(&Value::Vector(vec![]))?, "[]");
    assert_eq!(encode(&Value::Set(vec![integer(1), integer(2)]))?, "#{1 2}");
    assert_eq!(encode(&Value::Map(Default::default()))?, "{}");
    assert_eq!(encode(&map([(string("a"), integer(1)),
                            (string("b"), Value::Vector(vec![Value::Nil]))]))?,
               "{\"a\" 1 \"b\" [nil]}");
    assert_eq!(encode(&pair(integer(1), integer(2)))?, "(1 2)");
    Ok(())
}

#[test]
fn list_shapes() -> Result<()> {
    assert_eq!(encode(&list(vec![]))?, "nil");
    // association list
    assert_eq!(encode(&list(vec![pair(symbol("a"), integer(1)),
                                 pair(symbol("b"), integer(2))]))?,
               "{\"a\" 1 \"b\" 2}");
    // a single pair is an odd count
    assert_eq!(encode(&list(vec![pair(string("a"), integer(1))]))?,
               "((\"a\" 1))");
    // flat key/value list
    assert_eq!(encode(&list(vec![keyword("a"), integer(1), keyword("b"), integer(2)]))?,
               "{:a 1 :b 2}");
    assert_eq!(encode(&list(vec![keyword("a"), integer(1), keyword("b")]))?,
               "(:a 1 :b)");
    assert_eq!(encode(&list(vec![keyword("a"), integer(1), integer(2), integer(3)]))?,
               "(:a 1 2 3)");
    assert_eq!(encode(&list(vec![integer(1), keyword("a")]))?, "(1 :a)");
    Ok(())
}

#[test]
fn timestamps() -> Result<()> {
    // 1700000000 seconds = 25939 * 2^16 + 61696
    let instant = list(vec![integer(25939), integer(61696)]);
    assert_eq!(encode(&instant)?, "(25939 61696)");
    assert_eq!(encode_with(&instant, &TIMESTAMP_ENCODE_SETTINGS)?,
               "#inst \"2023-11-14T22:13:20+00:00\"");
    let cet = EncodeSettings {
        timestamp_offset: FixedOffset::east_opt(3600).unwrap(),
        ..TIMESTAMP_ENCODE_SETTINGS
    };
    assert_eq!(encode_with(&instant, &cet)?, "#inst \"2023-11-14T23:13:20+01:00\"");
    // not two integers
    assert_eq!(encode_with(&list(vec![integer(1), float(2.0)]), &TIMESTAMP_ENCODE_SETTINGS)?,
               "(1 2.0)");
    assert_eq!(encode_with(&list(vec![integer(1), integer(2), integer(3)]),
                           &TIMESTAMP_ENCODE_SETTINGS)?,
               "(1 2 3)");
    // a flat key/value list wins over a timestamp
    assert_eq!(encode_with(&list(vec![keyword("t"), integer(2)]), &TIMESTAMP_ENCODE_SETTINGS)?,
               "{:t 2}");
    Ok(())
}

#[test]
fn configured_nil_and_false() -> Result<()> {
    let settings = EncodeSettings {
        nil: keyword("null"),
        false_value: keyword("no"),
        ..ENCODE_SETTINGS
    };
    assert_eq!(encode_with(&Value::Vector(vec![keyword("null"), keyword("no"), keyword("x")]),
                           &settings)?,
               "[nil false :x]");
    Ok(())
}

#[test]
fn non_finite_floats() -> Result<()> {
    assert_eq!(encode(&float(f64::NAN))?, "##NaN");
    assert_eq!(encode(&Value::Vector(vec![float(f64::INFINITY), float(f64::NEG_INFINITY)]))?,
               "[##Inf ##-Inf]");
    let v = decode("[1e999]")?;
    assert_eq!(encode(&v)?, "[##Inf]");
    assert_eq!(decode(&encode(&v)?)?, v);
    Ok(())
}

fn nested_vectors(depth: usize) -> Value {
    (0..depth).fold(integer(1), |v, _| Value::Vector(vec![v]))
}

#[test]
fn nesting_limit() -> Result<()> {
    let settings = EncodeSettings { max_depth: 3, ..ENCODE_SETTINGS };
    assert_eq!(encode_with(&nested_vectors(3), &settings)?, "[[[1]]]");
    assert!(matches!(encode_with(&nested_vectors(4), &settings),
                     Err(EncodeError::UnencodableValue(_))));
    // pairs and lists count as well
    assert!(encode_with(&pair(integer(1), nested_vectors(3)), &settings).is_err());
    assert!(encode_with(&list(vec![nested_vectors(3)]), &settings).is_err());
    // the default limit applies to values built in code
    assert!(encode(&nested_vectors(600)).is_err());
    Ok(())
}

fn hash_of(v: &Value) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

#[test]
fn map_hash_ignores_order() -> Result<()> {
    let ab = decode("{:a 1 :b 2}")?;
    let ba = decode("{:b 2 :a 1}")?;
    assert_eq!(hash_of(&ab), hash_of(&ba));
    // same size, different entries
    assert_ne!(hash_of(&decode("{:a 1}")?), hash_of(&decode("{:a 2}")?));
    assert_ne!(hash_of(&decode("{:a 1}")?), hash_of(&decode("{:b 1}")?));

    let mut outer = map([(ab, string("first"))]);
    let Value::Map(m) = &mut outer else { panic!("not a map") };
    m.insert(ba, string("second"));
    assert_eq!(m.len(), 1);
    assert_eq!(outer.get(&map([(string("b"), integer(2)), (string("a"), integer(1))])),
               Some(&string("second")));
    Ok(())
}
