//! Decoder behavior on valid vectors and on malformed or truncated input.

use pretty_assertions::assert_eq;
use tunm_proto::codec::wire::MAX_DEPTH;
use tunm_proto::codec::{self, decode_field};
use tunm_proto::{BufferError, Buffer, DecodeError, Value};

fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut buf = Buffer::from(bytes);
    decode_field(&mut buf)
}

#[test]
fn test_decode_u16_pair() {
    let mut buf = Buffer::from(&[10u8, 1, 10, 232, 72][..]);
    assert_eq!(decode_field(&mut buf).unwrap(), Value::Int(-1));
    assert_eq!(decode_field(&mut buf).unwrap(), Value::Int(0x1234));
    assert!(buf.is_empty());
}

#[test]
fn test_decode_float() {
    match decode(&[11, 35, 95, 188, 0]).unwrap() {
        Value::Float(f) => assert!((f - 12345.123).abs() < 0.001),
        other => panic!("expected float, got {:?}", other),
    }
}

#[test]
fn test_decode_double() {
    assert_eq!(
        decode(&[12, 224, 94, 248, 255, 255, 255, 255, 255]).unwrap(),
        Value::Double(-0.5)
    );
}

#[test]
fn test_decode_str_raw_utf8() {
    let text = "this is tunm proto, 中文测试";
    let mut bytes = vec![64];
    bytes.extend_from_slice(text.as_bytes());
    let mut buf = Buffer::wrap(bytes);
    assert_eq!(codec::decode_str_raw(&mut buf).unwrap(), text);
}

#[test]
fn test_decode_nested() {
    // [ 1, [ 2 ], nil ]
    let bytes = [16, 6, 2, 1, 16, 2, 2, 2, 0];
    assert_eq!(
        decode(&bytes).unwrap(),
        Value::Arr(vec![
            Value::Int(1),
            Value::Arr(vec![Value::Int(2)]),
            Value::Nil,
        ])
    );
}

#[test]
fn test_decode_str_idx_uses_table() {
    let mut buf = Buffer::from(&[14u8, 2, 14, 0][..]);
    buf.intern_string("a");
    buf.intern_string("b");
    assert_eq!(decode_field(&mut buf).unwrap(), Value::from("b"));
    assert_eq!(decode_field(&mut buf).unwrap(), Value::from("a"));
}

#[test]
fn test_unknown_tag() {
    assert!(matches!(decode(&[18]), Err(DecodeError::UnknownType(18))));
    assert!(matches!(decode(&[255]), Err(DecodeError::UnknownType(255))));
}

#[test]
fn test_empty_input_underflows() {
    assert!(matches!(
        decode(&[]),
        Err(DecodeError::Buffer(BufferError::Underflow { need: 1, have: 0 }))
    ));
}

#[test]
fn test_truncated_fixed_width() {
    assert!(matches!(
        decode(&[11, 1, 2]),
        Err(DecodeError::Buffer(BufferError::Underflow { need: 4, have: 2 }))
    ));
    assert!(matches!(
        decode(&[2]),
        Err(DecodeError::Buffer(BufferError::Underflow { .. }))
    ));
}

#[test]
fn test_truncated_varint() {
    assert!(matches!(
        decode(&[10, 0x80, 0x80]),
        Err(DecodeError::Buffer(BufferError::Underflow { .. }))
    ));
}

#[test]
fn test_overlong_varint() {
    let mut bytes = vec![10];
    bytes.extend(std::iter::repeat(0x80).take(12));
    bytes.push(0);
    assert!(matches!(decode(&bytes), Err(DecodeError::VarintOverflow)));
}

#[test]
fn test_string_index_out_of_range() {
    let err = decode(&[14, 6]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::StringIndexOutOfRange { index: 3, len: 0 }
    ));

    // Negative indices are rejected the same way.
    let err = decode(&[14, 1]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::StringIndexOutOfRange { index: -1, len: 0 }
    ));
}

#[test]
fn test_negative_length() {
    assert!(matches!(decode(&[15, 1]), Err(DecodeError::InvalidLength(-1))));
    assert!(matches!(decode(&[16, 3]), Err(DecodeError::InvalidLength(-2))));
}

#[test]
fn test_raw_longer_than_input() {
    assert!(matches!(
        decode(&[15, 20, 1, 2]),
        Err(DecodeError::Buffer(BufferError::Underflow { need: 10, have: 2 }))
    ));
}

#[test]
fn test_huge_array_count_fails_cleanly() {
    // Claims 2^40 elements but carries one.
    let mut buf = Buffer::new();
    codec::encode_type(&mut buf, tunm_proto::TypeTag::Arr).unwrap();
    codec::encode_varint(&mut buf, 1i128 << 40).unwrap();
    codec::encode_field(&mut buf, &Value::Int(1)).unwrap();
    let err = decode_field(&mut buf).unwrap_err();
    assert!(matches!(err, DecodeError::Buffer(BufferError::Underflow { .. })));
}

#[test]
fn test_invalid_utf8() {
    assert!(matches!(
        decode(&[13, 4, 0xFF, 0xFE]),
        Err(DecodeError::Buffer(BufferError::InvalidUtf8(_)))
    ));
}

#[test]
fn test_map_duplicate_key_last_wins() {
    // { 1: 2, 1: 3 }
    let bytes = [17, 4, 2, 1, 2, 2, 2, 1, 2, 3];
    let value = decode(&bytes).unwrap();
    assert_eq!(value, Value::map_from([(Value::Int(1), Value::Int(3))]));
}

#[test]
fn test_deep_nesting_fails_cleanly() {
    // 200k open array headers; recursion would exhaust the stack.
    let bytes = [16u8, 2].repeat(200_000);
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::DepthLimitExceeded(MAX_DEPTH))
    ));

    // Maps count toward the same limit: { 1: { 1: ... } }
    let bytes = [17u8, 2, 2, 1].repeat(MAX_DEPTH + 1);
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::DepthLimitExceeded(MAX_DEPTH))
    ));
}

#[test]
fn test_nesting_within_limit_decodes() {
    let mut bytes = [16u8, 2].repeat(MAX_DEPTH - 1);
    bytes.extend_from_slice(&[16, 0]);
    let value = decode(&bytes).unwrap();

    let mut levels = 0;
    let mut current = &value;
    while let Value::Arr(items) = current {
        levels += 1;
        match items.first() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    assert_eq!(levels, MAX_DEPTH);
}
