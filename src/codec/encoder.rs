use crate::buffer::Buffer;
use crate::error::EncodeError;
use crate::types::TypeTag;
use crate::value::Value;

use super::wire::*;

/// Pick the wire tag for a value when the caller does not supply one.
///
/// Width-less integers go through a fixed ladder: `0..256` is U8, then
/// `-128..128` is I8, everything else I64. Because U8 is tested first, a
/// negative value that misses the I8 range always lands on I64 even if it
/// would fit I16 or I32. Other tunm producers classify the same way and the
/// wire bytes depend on it, so the ladder is kept as is.
pub fn infer_tag(value: &Value) -> TypeTag {
    match *value {
        Value::Int(v) => {
            if (0..256).contains(&v) {
                TypeTag::U8
            } else if (-128..128).contains(&v) {
                TypeTag::I8
            } else {
                TypeTag::I64
            }
        }
        ref other => other.declared_tag(),
    }
}

/// Write a bare tag byte.
#[inline]
pub fn encode_type(buffer: &mut Buffer, tag: TypeTag) -> Result<(), EncodeError> {
    buffer.write_u8(tag.code())?;
    Ok(())
}

/// Untagged string: varint byte length then UTF-8 bytes.
pub fn encode_str_raw(buffer: &mut Buffer, s: &str) -> Result<(), EncodeError> {
    encode_varint(buffer, s.len() as i128)?;
    buffer.write_utf8(s)?;
    Ok(())
}

/// Untagged blob: varint length then the bytes.
pub fn encode_raw(buffer: &mut Buffer, bytes: &[u8]) -> Result<(), EncodeError> {
    encode_varint(buffer, bytes.len() as i128)?;
    buffer.write_bytes(bytes)?;
    Ok(())
}

/// Encode one tagged field using the inferred tag.
pub fn encode_field(buffer: &mut Buffer, value: &Value) -> Result<(), EncodeError> {
    encode_field_as(buffer, value, infer_tag(value))
}

/// Encode one tagged field with an explicit tag.
///
/// Strings are interned into `buffer`'s string table and written as
/// STR_IDX. Integer tags of 16 bits and wider are written as VARINT. A
/// standalone NIL writes nothing; inside ARR and MAP it is a bare tag byte.
pub fn encode_field_as(
    buffer: &mut Buffer,
    value: &Value,
    tag: TypeTag,
) -> Result<(), EncodeError> {
    let unsupported = || EncodeError::UnsupportedType {
        tag,
        actual: value.type_name(),
    };

    match tag {
        TypeTag::Nil => match value {
            Value::Nil => Ok(()),
            _ => Err(unsupported()),
        },
        TypeTag::Bool => match value {
            Value::Bool(b) => {
                encode_type(buffer, tag)?;
                buffer.write_u8(u8::from(*b))?;
                Ok(())
            }
            _ => Err(unsupported()),
        },
        TypeTag::U8 | TypeTag::I8 => {
            let v = value.as_integer().ok_or_else(unsupported)?;
            encode_type(buffer, tag)?;
            buffer.write_fixed(v as u64, 1)?;
            Ok(())
        }
        TypeTag::U16
        | TypeTag::I16
        | TypeTag::U32
        | TypeTag::I32
        | TypeTag::U64
        | TypeTag::I64
        | TypeTag::Varint => {
            let v = value.as_integer().ok_or_else(unsupported)?;
            encode_type(buffer, TypeTag::Varint)?;
            encode_varint(buffer, v)
        }
        TypeTag::Float => {
            let f = value.as_f64().ok_or_else(unsupported)?;
            encode_type(buffer, tag)?;
            encode_float(buffer, f as f32)
        }
        TypeTag::Double => {
            let d = value.as_f64().ok_or_else(unsupported)?;
            encode_type(buffer, tag)?;
            encode_double(buffer, d)
        }
        TypeTag::Str | TypeTag::StrIdx => match value {
            Value::Str(s) => {
                let idx = buffer.intern_string(s);
                encode_type(buffer, TypeTag::StrIdx)?;
                encode_varint(buffer, idx as i128)
            }
            _ => Err(unsupported()),
        },
        TypeTag::Raw => match value {
            Value::Raw(bytes) => {
                encode_type(buffer, tag)?;
                encode_raw(buffer, bytes)
            }
            _ => Err(unsupported()),
        },
        TypeTag::Arr => match value {
            Value::Arr(items) => {
                encode_type(buffer, tag)?;
                encode_varint(buffer, items.len() as i128)?;
                for item in items {
                    encode_element(buffer, item)?;
                }
                Ok(())
            }
            _ => Err(unsupported()),
        },
        TypeTag::Map => match value {
            Value::Map(map) => {
                encode_type(buffer, tag)?;
                encode_varint(buffer, map.len() as i128)?;
                for (k, v) in map {
                    encode_element(buffer, k)?;
                    encode_element(buffer, v)?;
                }
                Ok(())
            }
            _ => Err(unsupported()),
        },
    }
}

/// Container slots always take a field, so NIL is written as a bare tag
/// byte and the element count stays exact.
fn encode_element(buffer: &mut Buffer, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Nil => encode_type(buffer, TypeTag::Nil),
        other => encode_field(buffer, other),
    }
}
