use crate::types::TypeTag;

/// Errors from the byte buffer and its string table.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("buffer underflow: need {need} bytes, have {have}")]
    Underflow { need: usize, have: usize },

    #[error("cannot grow buffer by {requested} bytes")]
    AllocationFailure { requested: usize },

    #[error("invalid fixed integer width {0}, expected 1..=8")]
    InvalidWidth(usize),

    #[error("string index {index} out of range, table has {len} entries")]
    StringIndexOutOfRange { index: usize, len: usize },

    #[error("invalid utf-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Errors from the value encoder.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("unsupported type: cannot encode {actual} as {tag}")]
    UnsupportedType { tag: TypeTag, actual: &'static str },

    #[error("varint overflow: {0} needs more than 12 groups")]
    VarintOverflow(i128),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Errors from the value decoder.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown type tag {0}")]
    UnknownType(u8),

    #[error("string index {index} out of range, table has {len} entries")]
    StringIndexOutOfRange { index: i128, len: usize },

    #[error("varint overflow: more than 12 groups")]
    VarintOverflow,

    #[error("invalid length {0}")]
    InvalidLength(i128),

    #[error("integer {0} out of range")]
    IntegerOutOfRange(i128),

    #[error("containers nested deeper than {0} levels")]
    DepthLimitExceeded(usize),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Top-level error type that wraps all sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for tunm operations.
pub type Result<T> = std::result::Result<T, ProtoError>;
