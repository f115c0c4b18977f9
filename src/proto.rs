//! The proto envelope: a command name, the string table, then one payload field.
//!
//! ```text
//! [varint name_len][name][varint count][count x (varint len, bytes)][payload field]
//! ```
//!
//! No outer length prefix is written; framing belongs to the transport.

use crate::buffer::Buffer;
use crate::codec::{decode_field, decode_str_raw, encode_field, encode_str_raw, encode_varint};
use crate::codec::wire::decode_len;
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Append an envelope for `name` and `payload` to `buffer`.
///
/// The payload is encoded into a scratch buffer first so that its string
/// table is complete before the table is written ahead of it.
pub fn encode_proto(buffer: &mut Buffer, name: &str, payload: &Value) -> Result<(), EncodeError> {
    let mut scratch = Buffer::new();
    encode_field(&mut scratch, payload)?;

    encode_str_raw(buffer, name)?;
    encode_varint(buffer, scratch.strings().len() as i128)?;
    for s in scratch.strings().iter() {
        encode_str_raw(buffer, s)?;
    }
    buffer.extend_from(&scratch)?;

    tracing::debug!(
        name,
        strings = scratch.strings().len(),
        payload_bytes = scratch.unread_len(),
        "encoded proto"
    );
    Ok(())
}

/// Read one envelope from `buffer`, returning the command name and payload.
///
/// `buffer`'s string table is replaced by the envelope's table, which stays
/// available afterwards. An envelope with no payload bytes yields
/// `Value::Nil`.
pub fn decode_proto(buffer: &mut Buffer) -> Result<(String, Value), DecodeError> {
    let name = decode_str_raw(buffer)?;
    let count = decode_len(buffer)?;

    buffer.strings_mut().clear();
    for _ in 0..count {
        let s = decode_str_raw(buffer)?;
        buffer.strings_mut().push(s);
    }

    let payload = if buffer.is_empty() {
        Value::Nil
    } else {
        decode_field(buffer)?
    };

    tracing::debug!(name = %name, strings = count, "decoded proto");
    Ok((name, payload))
}

/// An owned envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proto {
    pub name: String,
    pub payload: Value,
}

impl Proto {
    pub fn new(name: impl Into<String>, payload: impl Into<Value>) -> Self {
        Proto {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Encode into a fresh byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buffer = Buffer::new();
        encode_proto(&mut buffer, &self.name, &self.payload)?;
        Ok(buffer.into_bytes())
    }

    /// Decode one envelope from the start of `data`; trailing bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut buffer = Buffer::from(data);
        let (name, payload) = decode_proto(&mut buffer)?;
        Ok(Proto { name, payload })
    }
}
