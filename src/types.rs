use std::fmt;

use crate::error::DecodeError;

/// One-byte wire discriminator written in front of every tagged field.
///
/// The numeric codes are part of the wire format and never change.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    Nil = 0,
    Bool = 1,
    U8 = 2,
    I8 = 3,
    U16 = 4,
    I16 = 5,
    U32 = 6,
    I32 = 7,
    U64 = 8,
    I64 = 9,
    Varint = 10,
    Float = 11,
    Double = 12,
    Str = 13,
    StrIdx = 14,
    Raw = 15,
    Arr = 16,
    Map = 17,
}

impl TypeTag {
    /// All tags in code order.
    pub const ALL: [TypeTag; 18] = [
        TypeTag::Nil,
        TypeTag::Bool,
        TypeTag::U8,
        TypeTag::I8,
        TypeTag::U16,
        TypeTag::I16,
        TypeTag::U32,
        TypeTag::I32,
        TypeTag::U64,
        TypeTag::I64,
        TypeTag::Varint,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::Str,
        TypeTag::StrIdx,
        TypeTag::Raw,
        TypeTag::Arr,
        TypeTag::Map,
    ];

    /// The wire code of this tag.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short lowercase name, matching the names used by other tunm ports.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Nil => "nil",
            TypeTag::Bool => "bool",
            TypeTag::U8 => "u8",
            TypeTag::I8 => "i8",
            TypeTag::U16 => "u16",
            TypeTag::I16 => "i16",
            TypeTag::U32 => "u32",
            TypeTag::I32 => "i32",
            TypeTag::U64 => "u64",
            TypeTag::I64 => "i64",
            TypeTag::Varint => "varint",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Str => "str",
            TypeTag::StrIdx => "str_idx",
            TypeTag::Raw => "raw",
            TypeTag::Arr => "arr",
            TypeTag::Map => "map",
        }
    }

    /// Reverse of [`TypeTag::name`].
    pub fn from_name(name: &str) -> Option<TypeTag> {
        TypeTag::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// `U8..=I8`: one-byte fixed-width integers.
    #[inline]
    pub fn is_fixed_byte(self) -> bool {
        (TypeTag::U8..=TypeTag::I8).contains(&self)
    }

    /// `U16..=I64`: integer widths that travel as VARINT on the wire.
    #[inline]
    pub fn is_varint_band(self) -> bool {
        (TypeTag::U16..=TypeTag::I64).contains(&self)
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TypeTag::ALL
            .get(code as usize)
            .copied()
            .ok_or(DecodeError::UnknownType(code))
    }
}

impl From<TypeTag> for u8 {
    fn from(tag: TypeTag) -> u8 {
        tag.code()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
