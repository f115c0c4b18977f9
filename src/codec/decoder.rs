use std::collections::HashMap;

use crate::buffer::Buffer;
use crate::error::DecodeError;
use crate::types::TypeTag;
use crate::value::Value;

use super::wire::*;

/// Read one tag byte.
#[inline]
pub fn decode_type(buffer: &mut Buffer) -> Result<TypeTag, DecodeError> {
    TypeTag::try_from(buffer.read_u8()?)
}

/// Untagged string written by `encode_str_raw`.
pub fn decode_str_raw(buffer: &mut Buffer) -> Result<String, DecodeError> {
    let len = decode_len(buffer)?;
    Ok(buffer.read_utf8(len)?)
}

/// Untagged blob written by `encode_raw`.
pub fn decode_raw(buffer: &mut Buffer) -> Result<Vec<u8>, DecodeError> {
    let len = decode_len(buffer)?;
    Ok(buffer.read_bytes(len)?)
}

/// Decode one tagged field, resolving STR_IDX against `buffer`'s string table.
///
/// Containers nested more than [`MAX_DEPTH`] levels fail with
/// `DepthLimitExceeded`.
pub fn decode_field(buffer: &mut Buffer) -> Result<Value, DecodeError> {
    decode_field_at(buffer, 0)
}

/// Decode the body of a field whose tag byte was already consumed.
pub fn decode_by_tag(buffer: &mut Buffer, tag: TypeTag) -> Result<Value, DecodeError> {
    decode_tag_at(buffer, tag, 0)
}

fn decode_field_at(buffer: &mut Buffer, depth: usize) -> Result<Value, DecodeError> {
    let tag = decode_type(buffer)?;
    decode_tag_at(buffer, tag, depth)
}

/// `depth` counts the containers already open around this field.
fn decode_tag_at(buffer: &mut Buffer, tag: TypeTag, depth: usize) -> Result<Value, DecodeError> {
    if matches!(tag, TypeTag::Arr | TypeTag::Map) && depth >= MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded(MAX_DEPTH));
    }
    match tag {
        TypeTag::Nil => Ok(Value::Nil),
        TypeTag::Bool => Ok(Value::Bool(buffer.read_u8()? != 0)),
        TypeTag::U8 => Ok(Value::U8(buffer.read_u8()?)),
        TypeTag::I8 => Ok(Value::I8(buffer.read_i8()?)),
        // Producers may emit the narrow tags directly; all of them carry a varint.
        TypeTag::U16
        | TypeTag::I16
        | TypeTag::U32
        | TypeTag::I32
        | TypeTag::U64
        | TypeTag::I64
        | TypeTag::Varint => integer_value(decode_varint(buffer)?),
        TypeTag::Float => Ok(Value::Float(decode_float(buffer)?)),
        TypeTag::Double => Ok(Value::Double(decode_double(buffer)?)),
        TypeTag::Str => Ok(Value::Str(decode_str_raw(buffer)?)),
        TypeTag::StrIdx => {
            let idx = decode_varint(buffer)?;
            let len = buffer.strings().len();
            let resolved = usize::try_from(idx)
                .ok()
                .and_then(|i| buffer.lookup_interned(i).ok());
            match resolved {
                Some(s) => Ok(Value::Str(s.to_owned())),
                None => Err(DecodeError::StringIndexOutOfRange { index: idx, len }),
            }
        }
        TypeTag::Raw => Ok(Value::Raw(decode_raw(buffer)?)),
        TypeTag::Arr => {
            let count = decode_len(buffer)?;
            // Every element takes at least one byte.
            let mut arr = Vec::with_capacity(count.min(buffer.unread_len()));
            for _ in 0..count {
                arr.push(decode_field_at(buffer, depth + 1)?);
            }
            Ok(Value::Arr(arr))
        }
        TypeTag::Map => {
            let count = decode_len(buffer)?;
            let mut map = HashMap::with_capacity(count.min(buffer.unread_len() / 2));
            for _ in 0..count {
                let key = decode_field_at(buffer, depth + 1)?;
                let value = decode_field_at(buffer, depth + 1)?;
                map.insert(key, value);
            }
            Ok(Value::Map(map))
        }
    }
}

fn integer_value(v: i128) -> Result<Value, DecodeError> {
    if let Ok(i) = i64::try_from(v) {
        Ok(Value::Int(i))
    } else if let Ok(u) = u64::try_from(v) {
        Ok(Value::U64(u))
    } else {
        Err(DecodeError::IntegerOutOfRange(v))
    }
}
