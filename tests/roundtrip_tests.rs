//! Round-trip tests: encode(value) -> decode() should give back an equal value.
//!
//! Integer widths collapse on the wire (U16..I64 travel as VARINT), so
//! equality here is the numeric equality `Value` implements.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashMap;
use tunm_proto::codec::{decode_field, encode_field};
use tunm_proto::{decode_proto, encode_proto, Buffer, Value};

fn roundtrip(value: &Value) -> Value {
    let mut buf = Buffer::new();
    encode_field(&mut buf, value).unwrap();
    let decoded = decode_field(&mut buf).unwrap();
    assert!(buf.is_empty(), "trailing bytes after {:?}", value);
    decoded
}

#[test]
fn test_roundtrip_scalars() {
    for v in [
        Value::Int(0),
        Value::Int(255),
        Value::Int(-1),
        Value::Int(-128),
        Value::Int(-129),
        Value::Int(256),
        Value::Int(i64::MIN),
        Value::Int(i64::MAX),
        Value::U64(u64::MAX),
        Value::U16(0x1234),
        Value::I32(-90),
        Value::Bool(true),
        Value::Bool(false),
        Value::Double(3.5),
        Value::Float(1.5),
        Value::from("tunm"),
        Value::from(""),
        Value::Raw(vec![1, 2, 3]),
    ] {
        assert_eq!(roundtrip(&v), v);
    }
}

#[test]
fn test_roundtrip_range_array() {
    let arr = Value::Arr((0..10).map(Value::Int).collect());
    assert_eq!(roundtrip(&arr), arr);
}

#[test]
fn test_roundtrip_nested() {
    let inner = Value::map_from([
        ("name", Value::from("tickbh")),
        ("proto", Value::from("tunm")),
        ("index", Value::Int(1)),
    ]);
    let value = Value::Arr(vec![
        Value::from("tunm"),
        inner.clone(),
        Value::Arr(vec![inner, Value::Nil, Value::Raw(vec![0xFF])]),
        Value::map_from([(Value::Int(1000), Value::Double(-2.25))]),
    ]);
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_roundtrip_keeps_nil_map_entries() {
    let mut map = HashMap::new();
    map.insert(Value::from("a"), Value::Int(1));
    map.insert(Value::from("b"), Value::Nil);
    map.insert(Value::Nil, Value::from("c"));
    let value = Value::Map(map);
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_roundtrip_float_keeps_three_digits() {
    for f in [0.7f32, 0.1, -0.3, 12345.123, 999.999] {
        assert_eq!(roundtrip(&Value::Float(f)), Value::Float(f));
    }
}

#[test]
fn test_float_precision_is_three_digits() {
    match roundtrip(&Value::Float(0.12345)) {
        Value::Float(f) => assert!((f - 0.123).abs() < 1e-6),
        other => panic!("expected float, got {:?}", other),
    }
    match roundtrip(&Value::Double(0.123456789)) {
        Value::Double(d) => assert!((d - 0.123456).abs() < 1e-12),
        other => panic!("expected double, got {:?}", other),
    }
}

#[test]
fn test_shared_buffer_many_fields() {
    let mut buf = Buffer::new();
    let values: Vec<Value> = (0..200)
        .map(|i| Value::from(format!("s{}", i % 7)))
        .collect();
    for v in &values {
        encode_field(&mut buf, v).unwrap();
    }
    assert_eq!(buf.strings().len(), 7);
    for v in &values {
        assert_eq!(&decode_field(&mut buf).unwrap(), v);
    }
    assert!(buf.is_empty());
}

fn key_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Nil),
        4 => any::<i64>().prop_map(Value::Int),
        4 => "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::U64),
        any::<i16>().prop_map(Value::I16),
        "\\PC{0,12}".prop_map(Value::from),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(Value::Raw),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(
                prop_oneof![1 => Just(Value::Nil), 5 => inner.clone()],
                0..6
            )
            .prop_map(Value::Arr),
            proptest::collection::hash_map(
                key_strategy(),
                prop_oneof![1 => Just(Value::Nil), 5 => inner],
                0..6
            )
            .prop_map(Value::Map),
        ]
    })
}

proptest! {
    #[test]
    fn prop_field_roundtrip(value in value_strategy()) {
        let mut buf = Buffer::new();
        encode_field(&mut buf, &value).unwrap();
        let decoded = decode_field(&mut buf).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert!(buf.is_empty());
    }

    #[test]
    fn prop_proto_roundtrip(name in "[a-z_]{1,16}", value in value_strategy()) {
        let mut buf = Buffer::new();
        encode_proto(&mut buf, &name, &value).unwrap();
        let (decoded_name, decoded) = decode_proto(&mut buf).unwrap();
        prop_assert_eq!(decoded_name, name);
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_float_within_three_digits(f in -10_000.0f32..10_000.0) {
        match roundtrip(&Value::Float(f)) {
            // Floor loses under 1e-3; f32 rounding at this magnitude adds about as much.
            Value::Float(d) => prop_assert!((f - d).abs() < 3e-3, "{} -> {}", f, d),
            other => prop_assert!(false, "expected float, got {:?}", other),
        }
    }

    #[test]
    fn prop_double_within_six_digits(v in -1.0e6f64..1.0e6) {
        match roundtrip(&Value::Double(v)) {
            Value::Double(d) => prop_assert!((v - d).abs() < 1.001e-6, "{} -> {}", v, d),
            other => prop_assert!(false, "expected double, got {:?}", other),
        }
    }

    #[test]
    fn prop_garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = Buffer::wrap(bytes);
        let _ = decode_field(&mut buf);
        let mut buf = Buffer::wrap(buf.into_bytes());
        let _ = decode_proto(&mut buf);
    }
}
