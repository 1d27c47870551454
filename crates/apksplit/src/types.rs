// crates/apksplit/src/types.rs

use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifies a resource in the platform resource table as `0xPPTTEEEE`
/// (package, type, entry).
///
/// The newtype keeps raw attribute identifiers apart from the plain integers
/// that travel alongside them in compiled attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Builds an identifier from its package, type and entry components.
    pub const fn new(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        ResourceId(((package_id as u32) << 24) | ((type_id as u32) << 16) | entry_id as u32)
    }

    pub const fn package_id(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn type_id(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn entry_id(self) -> u16 {
        self.0 as u16
    }

    /// An identifier is valid when both the package and type components are set.
    pub const fn is_valid(self) -> bool {
        self.package_id() != 0 && self.type_id() != 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

// --- Framework attribute identifiers ---
// These must match the platform's public resource table exactly.

/// `android:hasCode`
pub const ATTR_HAS_CODE: ResourceId = ResourceId(0x0101_000c);

/// `android:versionCode`
pub const ATTR_VERSION_CODE: ResourceId = ResourceId(0x0101_021b);

/// `android:revisionCode`
pub const ATTR_REVISION_CODE: ResourceId = ResourceId(0x0101_04d5);

/// Namespace URI bound to the `android` prefix in manifests.
pub const SCHEMA_ANDROID: &str = "http://schemas.android.com/apk/res/android";

// --- Platform versions referenced by qualifier compatibility rules ---

pub const SDK_DONUT: u16 = 4;
pub const SDK_FROYO: u16 = 8;
pub const SDK_HONEYCOMB_MR2: u16 = 13;
pub const SDK_JELLY_BEAN_MR1: u16 = 17;
pub const SDK_LOLLIPOP: u16 = 21;
pub const SDK_MARSHMALLOW: u16 = 23;
pub const SDK_O: u16 = 26;

/// The type tag carried by a compiled primitive value (`Res_value::dataType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DataType {
    Null = 0x00,
    Reference = 0x01,
    Attribute = 0x02,
    String = 0x03,
    Float = 0x04,
    Dimension = 0x05,
    Fraction = 0x06,
    DynamicReference = 0x07,
    DynamicAttribute = 0x08,
    IntDec = 0x10,
    IntHex = 0x11,
    IntBoolean = 0x12,
    IntColorArgb8 = 0x1c,
    IntColorRgb8 = 0x1d,
    IntColorArgb4 = 0x1e,
    IntColorRgb4 = 0x1f,
}

impl DataType {
    /// First tag of the integer range (inclusive).
    pub const FIRST_INT: u8 = 0x10;
    /// Last tag of the integer range (inclusive).
    pub const LAST_INT: u8 = 0x1f;

    /// Whether the tag lies in the integer range. Booleans and colours are
    /// integers as far as the binary format is concerned.
    pub const fn is_integer(self) -> bool {
        let tag = self as u8;
        tag >= Self::FIRST_INT && tag <= Self::LAST_INT
    }
}

/// Error type for an unknown `Res_value` type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid resource value type tag: {0:#04x}")]
pub struct InvalidDataTypeError(pub u8);

impl TryFrom<u8> for DataType {
    type Error = InvalidDataTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(DataType::Null),
            0x01 => Ok(DataType::Reference),
            0x02 => Ok(DataType::Attribute),
            0x03 => Ok(DataType::String),
            0x04 => Ok(DataType::Float),
            0x05 => Ok(DataType::Dimension),
            0x06 => Ok(DataType::Fraction),
            0x07 => Ok(DataType::DynamicReference),
            0x08 => Ok(DataType::DynamicAttribute),
            0x10 => Ok(DataType::IntDec),
            0x11 => Ok(DataType::IntHex),
            0x12 => Ok(DataType::IntBoolean),
            0x1c => Ok(DataType::IntColorArgb8),
            0x1d => Ok(DataType::IntColorRgb8),
            0x1e => Ok(DataType::IntColorArgb4),
            0x1f => Ok(DataType::IntColorRgb4),
            other => Err(InvalidDataTypeError(other)),
        }
    }
}
