pub mod wire;
pub mod encoder;
pub mod decoder;

pub use encoder::{encode_field, encode_field_as, encode_raw, encode_str_raw, encode_type, infer_tag};
pub use decoder::{decode_by_tag, decode_field, decode_raw, decode_str_raw, decode_type};
pub use wire::{decode_varint, encode_varint};
