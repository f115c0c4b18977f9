//! Envelope tests: name, string table and payload as one message.

use pretty_assertions::assert_eq;
use tunm_proto::{decode_proto, encode_proto, Buffer, BufferError, DecodeError, Proto, Value};

fn cmd_test_op_payload() -> Value {
    Value::Arr(vec![
        Value::from("tunm"),
        Value::Int(1000),
        Value::from("tunm"),
        Value::Double(3.5),
        Value::Raw(vec![1, 2]),
    ])
}

#[test]
fn test_envelope_bytes() {
    let mut buf = Buffer::new();
    encode_proto(&mut buf, "cmd_test_op", &cmd_test_op_payload()).unwrap();

    let mut expected = vec![22];
    expected.extend_from_slice(b"cmd_test_op");
    expected.extend_from_slice(&[2, 8, b't', b'u', b'n', b'm']);
    expected.extend_from_slice(&[
        16, 10, // array of 5
        14, 0, // "tunm"
        10, 208, 15, // 1000
        14, 0, // "tunm" again
        12, 224, 103, 53, 0, 0, 0, 0, 0, // 3.5
        15, 4, 1, 2, // raw
    ]);
    assert_eq!(buf.remaining_bytes(), expected.as_slice());
}

#[test]
fn test_envelope_roundtrip() {
    let payload = Value::Arr(vec![
        Value::from("tunm"),
        Value::map_from([
            ("name", Value::from("tickbh")),
            ("proto", Value::from("tunm")),
            ("index", Value::Int(1)),
        ]),
        Value::Arr((0..10).map(Value::Int).collect()),
    ]);

    let mut buf = Buffer::new();
    encode_proto(&mut buf, "cmd_test_op", &payload).unwrap();
    let (name, decoded) = decode_proto(&mut buf).unwrap();

    assert_eq!(name, "cmd_test_op");
    assert_eq!(decoded, payload);
    assert!(buf.is_empty());

    // The decoded table stays on the buffer.
    let mut table: Vec<&str> = buf.strings().iter().collect();
    table.sort_unstable();
    assert_eq!(table, vec!["index", "name", "proto", "tickbh", "tunm"]);
}

#[test]
fn test_back_to_back_envelopes() {
    let mut buf = Buffer::new();
    encode_proto(&mut buf, "first", &Value::from("a")).unwrap();
    encode_proto(&mut buf, "second", &Value::Arr(vec![Value::from("b"), Value::from("c")]))
        .unwrap();

    let (name, payload) = decode_proto(&mut buf).unwrap();
    assert_eq!(name, "first");
    assert_eq!(payload, Value::from("a"));

    let (name, payload) = decode_proto(&mut buf).unwrap();
    assert_eq!(name, "second");
    assert_eq!(payload, Value::Arr(vec![Value::from("b"), Value::from("c")]));
    assert_eq!(buf.strings().len(), 2);
}

#[test]
fn test_encode_does_not_touch_target_table() {
    let mut buf = Buffer::new();
    buf.intern_string("local");
    encode_proto(&mut buf, "op", &Value::from("x")).unwrap();
    assert_eq!(buf.strings().iter().collect::<Vec<_>>(), vec!["local"]);
}

#[test]
fn test_empty_name_and_nil_payload() {
    let bytes = Proto::new("", Value::Nil).to_bytes().unwrap();
    assert_eq!(bytes, vec![0, 0]);
    let proto = Proto::from_bytes(&bytes).unwrap();
    assert_eq!(proto.name, "");
    assert_eq!(proto.payload, Value::Nil);
}

#[test]
fn test_proto_struct_roundtrip() {
    let proto = Proto::new("cmd_login", Value::map_from([("user", "tickbh")]));
    let bytes = proto.to_bytes().unwrap();
    assert_eq!(Proto::from_bytes(&bytes).unwrap(), proto);
}

#[test]
fn test_payload_index_past_table() {
    // Name "op", empty table, payload STR_IDX 0.
    let err = Proto::from_bytes(&[4, b'o', b'p', 0, 14, 0]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::StringIndexOutOfRange { index: 0, len: 0 }
    ));
}

#[test]
fn test_truncated_name() {
    let err = Proto::from_bytes(&[20, b'a']).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Buffer(BufferError::Underflow { need: 10, have: 1 })
    ));
}

#[test]
fn test_negative_table_count() {
    let err = Proto::from_bytes(&[2, b'a', 1]).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidLength(-1)));
}
