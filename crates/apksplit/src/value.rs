// crates/apksplit/src/value.rs

//! Compiled (typed) resource values as they appear on binary XML attributes.

use crate::types::{DataType, ResourceId};
use alloc::string::String;
use core::fmt;

/// A fixed-size primitive value: a type tag and 32 bits of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryPrimitive {
    pub data_type: DataType,
    pub data: u32,
}

impl BinaryPrimitive {
    pub const fn new(data_type: DataType, data: u32) -> Self {
        Self { data_type, data }
    }

    /// A decimal integer primitive.
    pub const fn int_dec(data: u32) -> Self {
        Self::new(DataType::IntDec, data)
    }

    /// A boolean primitive. The binary format stores `true` as all ones.
    pub const fn boolean(value: bool) -> Self {
        Self::new(DataType::IntBoolean, if value { 0xffff_ffff } else { 0 })
    }
}

/// A reference to another resource (`@type/name` in source form).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub id: Option<ResourceId>,
    pub name: Option<String>,
}

/// Any compiled item that can be attached to an XML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    String(String),
    BinaryPrimitive(BinaryPrimitive),
    Reference(Reference),
}

impl Item {
    /// Returns the string payload if this item is a compiled string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Item::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the primitive if this item is a binary primitive.
    pub fn as_primitive(&self) -> Option<&BinaryPrimitive> {
        match self {
            Item::BinaryPrimitive(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::String(s) => write!(f, "(string) \"{}\"", s),
            Item::BinaryPrimitive(p) => match p.data_type {
                DataType::IntBoolean => write!(f, "(boolean) {}", p.data != 0),
                DataType::IntHex => write!(f, "(integer) 0x{:08x}", p.data),
                t if t.is_integer() => write!(f, "(integer) {}", p.data as i32),
                t => write!(f, "(primitive {:?}) 0x{:08x}", t, p.data),
            },
            Item::Reference(r) => match (&r.name, r.id) {
                (Some(name), _) => write!(f, "(reference) @{}", name),
                (None, Some(id)) => write!(f, "(reference) @{}", id),
                (None, None) => write!(f, "(reference) @null"),
            },
        }
    }
}
