use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::TypeTag;

/// Dynamic value type for tunm, similar to `serde_json::Value`.
///
/// Integer variants carry the width they should be written with. `Int` has
/// no declared width and is classified by magnitude when encoded; it is also
/// what the VARINT wire form decodes to.
///
/// Integers compare numerically across widths, so `U16(5) == Int(5)`.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    /// Integer without a declared width.
    Int(i64),
    /// Three fractional digits survive the wire.
    Float(f32),
    /// Six fractional digits survive the wire.
    Double(f64),
    Str(String),
    Raw(Vec<u8>),
    Arr(Vec<Value>),
    Map(HashMap<Value, Value>),
}

impl Value {
    /// Build a map value from key-value pairs.
    pub fn map_from<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a map entry by string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(&Value::Str(key.to_owned())),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Numeric value of any integer variant.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::U8(v) => Some(v as i128),
            Value::I8(v) => Some(v as i128),
            Value::U16(v) => Some(v as i128),
            Value::I16(v) => Some(v as i128),
            Value::U32(v) => Some(v as i128),
            Value::I32(v) => Some(v as i128),
            Value::U64(v) => Some(v as i128),
            Value::I64(v) | Value::Int(v) => Some(v as i128),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Either float variant widened to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Value::Raw(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Arr(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<Value, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// The tag naming this value's shape (before any wire rewriting).
    pub fn declared_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Bool(_) => TypeTag::Bool,
            Value::U8(_) => TypeTag::U8,
            Value::I8(_) => TypeTag::I8,
            Value::U16(_) => TypeTag::U16,
            Value::I16(_) => TypeTag::I16,
            Value::U32(_) => TypeTag::U32,
            Value::I32(_) => TypeTag::I32,
            Value::U64(_) => TypeTag::U64,
            Value::I64(_) => TypeTag::I64,
            Value::Int(_) => TypeTag::Varint,
            Value::Float(_) => TypeTag::Float,
            Value::Double(_) => TypeTag::Double,
            Value::Str(_) => TypeTag::Str,
            Value::Raw(_) => TypeTag::Raw,
            Value::Arr(_) => TypeTag::Arr,
            Value::Map(_) => TypeTag::Map,
        }
    }

    /// Returns a short type description string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            other => other.declared_tag().name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
            return a == b;
        }
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Raw(a), Value::Raw(b)) => a == b,
            (Value::Arr(a), Value::Arr(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(v) = self.as_integer() {
            state.write_u8(0xFF);
            v.hash(state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Str(v) => v.hash(state),
            Value::Raw(v) => v.hash(state),
            Value::Arr(v) => v.hash(state),
            // Entry order is unspecified; the length is order-independent.
            Value::Map(v) => v.len().hash(state),
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "\"{}\"", v),
            Value::Raw(v) => write!(f, "<raw {} bytes>", v.len()),
            Value::Arr(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{ ")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, " }}")
            }
            other => match other.as_integer() {
                Some(v) => write!(f, "{}", v),
                None => Ok(()),
            },
        }
    }
}

// Conversion traits
macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => Float,
    f64 => Double,
    String => Str,
    Vec<u8> => Raw,
    Vec<Value> => Arr,
    HashMap<Value, Value> => Map,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Raw(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_integer()
            .ok_or("expected integer")
            .and_then(|i| i64::try_from(i).map_err(|_| "integer out of range"))
    }
}

impl TryFrom<Value> for u64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_integer()
            .ok_or("expected integer")
            .and_then(|i| u64::try_from(i).map_err(|_| "integer out of range"))
    }
}

impl TryFrom<Value> for bool {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bool(b) => Ok(b),
            _ => Err("expected bool"),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Float(f) => Ok(f as f64),
            Value::Double(d) => Ok(d),
            other => other
                .as_integer()
                .map(|i| i as f64)
                .ok_or("expected float or double"),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Str(s) => Ok(s),
            _ => Err("expected string"),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Raw(b) => Ok(b),
            _ => Err("expected raw"),
        }
    }
}
