//! Serde integration for tunm serialization.
//!
//! Any `#[derive(Serialize, Deserialize)]` type can be turned into a
//! [`Value`] tree and carried as the payload of a proto envelope. Structs
//! become maps keyed by field name, so every field name is interned once
//! per message.
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Login {
//!     user: String,
//!     level: u32,
//! }
//!
//! let login = Login { user: "tickbh".into(), level: 7 };
//! let bytes = tunm_proto::serde::to_bytes("cmd_login", &login).unwrap();
//! let (name, decoded): (String, Login) = tunm_proto::serde::from_bytes(&bytes).unwrap();
//! assert_eq!(name, "cmd_login");
//! assert_eq!(login, decoded);
//! ```

mod de;
mod error;
mod ser;

pub use de::ValueDeserializer;
pub use error::SerdeError;
pub use ser::ValueSerializer;

use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;
use crate::proto::{decode_proto, encode_proto};
use crate::value::Value;

/// Serialize `value` as the payload of an envelope named `name`.
pub fn to_bytes<T: Serialize>(name: &str, value: &T) -> Result<Vec<u8>, SerdeError> {
    let payload = ser::ValueSerializer::serialize(value)?;
    let mut buffer = Buffer::new();
    encode_proto(&mut buffer, name, &payload)?;
    Ok(buffer.into_bytes())
}

/// Decode one envelope and deserialize its payload into `T`.
pub fn from_bytes<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<(String, T), SerdeError> {
    let mut buffer = Buffer::from(data);
    let (name, payload) = decode_proto(&mut buffer)?;
    let value = de::ValueDeserializer::deserialize(&payload)?;
    Ok((name, value))
}

/// Serialize a value to a [`Value`] without encoding to bytes.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, SerdeError> {
    ser::ValueSerializer::serialize(value)
}

/// Deserialize a [`Value`] to a Rust type.
///
/// Useful with payloads decoded through [`crate::proto::decode_proto`].
pub fn from_value<T: for<'de> Deserialize<'de>>(value: &Value) -> Result<T, SerdeError> {
    de::ValueDeserializer::deserialize(value)
}
