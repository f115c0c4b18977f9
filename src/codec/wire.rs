//! Variable-length and fixed-point number codecs shared by every field type.

use crate::buffer::Buffer;
use crate::error::{DecodeError, EncodeError};

/// Upper bound on the groups of one varint (84 payload bits).
pub const VARINT_MAX_GROUPS: usize = 12;
/// FLOAT keeps three fractional digits.
pub const FLOAT_SCALE: f64 = 1_000.0;
/// DOUBLE keeps six fractional digits.
pub const DOUBLE_SCALE: f64 = 1_000_000.0;
/// Deepest ARR/MAP nesting the decoder accepts; the outermost container is level 1.
pub const MAX_DEPTH: usize = 128;

/// Zigzag map: 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4 ...
#[inline]
pub fn zigzag(value: i128) -> u128 {
    if value >= 0 {
        (value as u128) << 1
    } else {
        ((-(value + 1)) as u128) * 2 + 1
    }
}

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(m: u128) -> i128 {
    if m & 1 == 1 {
        -((m >> 1) as i128) - 1
    } else {
        (m >> 1) as i128
    }
}

/// Write `value` zigzag-mapped as base-128 groups, low group first. Every
/// byte but the last has its high bit set.
pub fn encode_varint(buffer: &mut Buffer, value: i128) -> Result<(), EncodeError> {
    let mut m = zigzag(value);
    let mut groups = [0u8; VARINT_MAX_GROUPS];
    for (i, slot) in groups.iter_mut().enumerate() {
        let b = (m & 0x7F) as u8;
        m >>= 7;
        if m == 0 {
            *slot = b;
            buffer.write_bytes(&groups[..=i])?;
            return Ok(());
        }
        *slot = b | 0x80;
    }
    Err(EncodeError::VarintOverflow(value))
}

/// Read one varint written by [`encode_varint`].
pub fn decode_varint(buffer: &mut Buffer) -> Result<i128, DecodeError> {
    let mut m: u128 = 0;
    for i in 0..VARINT_MAX_GROUPS {
        let b = buffer.read_u8()?;
        m |= ((b & 0x7F) as u128) << (7 * i);
        if b & 0x80 == 0 {
            return Ok(unzigzag(m));
        }
    }
    Err(DecodeError::VarintOverflow)
}

/// Read a varint that must be a length, count or index.
pub fn decode_len(buffer: &mut Buffer) -> Result<usize, DecodeError> {
    let v = decode_varint(buffer)?;
    usize::try_from(v).map_err(|_| DecodeError::InvalidLength(v))
}

/// `floor(value * 1000)` as a 4-byte signed integer.
///
/// Scaled in `f32`: widening first would expose the binary error of values
/// like `0.7` (0.69999998...) and floor them one step low.
pub fn encode_float(buffer: &mut Buffer, value: f32) -> Result<(), EncodeError> {
    let scaled = (value * FLOAT_SCALE as f32).floor() as i32;
    buffer.write_fixed(scaled as u32 as u64, 4)?;
    Ok(())
}

pub fn decode_float(buffer: &mut Buffer) -> Result<f32, DecodeError> {
    let scaled = buffer.read_i32()?;
    Ok((scaled as f64 / FLOAT_SCALE) as f32)
}

/// `floor(value * 1_000_000)` as an 8-byte signed integer.
pub fn encode_double(buffer: &mut Buffer, value: f64) -> Result<(), EncodeError> {
    let scaled = (value * DOUBLE_SCALE).floor() as i64;
    buffer.write_fixed(scaled as u64, 8)?;
    Ok(())
}

pub fn decode_double(buffer: &mut Buffer) -> Result<f64, DecodeError> {
    let scaled = buffer.read_i64()?;
    Ok(scaled as f64 / DOUBLE_SCALE)
}
