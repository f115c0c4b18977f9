//! tunm-proto: a compact, self-describing binary format for RPC messages.
//!
//! Every field carries a one-byte type tag. Integers of 16 bits and wider
//! travel as zigzag varints, floats as fixed-point integers, and strings
//! are interned into a per-message table and referenced by index. A
//! message (a "proto") is a command name, the string table, then a single
//! payload field.
//!
//! # Quick Start
//!
//! ```rust
//! use tunm_proto::{decode_proto, encode_proto, Buffer, Value};
//!
//! let payload = Value::Arr(vec![
//!     Value::from("tunm"),
//!     Value::Int(1000),
//!     Value::map_from([("name", Value::from("tickbh"))]),
//! ]);
//!
//! let mut buffer = Buffer::new();
//! encode_proto(&mut buffer, "cmd_test_op", &payload).unwrap();
//!
//! let (name, decoded) = decode_proto(&mut buffer).unwrap();
//! assert_eq!(name, "cmd_test_op");
//! assert_eq!(decoded, payload);
//! ```

pub mod error;
pub mod types;
pub mod value;
pub mod strings;
pub mod buffer;
pub mod codec;
pub mod proto;

#[cfg(feature = "serde")]
pub mod serde;

pub use buffer::Buffer;
pub use codec::{decode_field, encode_field, encode_field_as};
pub use error::{BufferError, DecodeError, EncodeError, ProtoError};
pub use proto::{decode_proto, encode_proto, Proto};
pub use types::TypeTag;
pub use value::Value;
