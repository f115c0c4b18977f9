use std::fmt::Display;

use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Errors from mapping Rust types onto [`Value`] trees and envelopes.
#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Custom(String),
}

impl SerdeError {
    pub(crate) fn mismatch(expected: &'static str, actual: &Value) -> Self {
        SerdeError::TypeMismatch {
            expected,
            actual: actual.type_name(),
        }
    }
}

impl serde::ser::Error for SerdeError {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

impl serde::de::Error for SerdeError {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}
