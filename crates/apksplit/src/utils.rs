// crates/apksplit/src/utils.rs

//! Textual parsers for the integer-like values found in manifests.

use crate::types::DataType;
use crate::value::BinaryPrimitive;

/// Preview platforms that are addressed by codename rather than number.
const SDK_CODENAMES: &[(&str, i32)] = &[
    ("O", 26),
    ("P", 28),
    ("Q", 29),
    ("R", 30),
    ("S", 31),
    ("Sv2", 32),
    ("Tiramisu", 33),
    ("UpsideDownCake", 34),
    ("VanillaIceCream", 35),
    ("Baklava", 36),
];

/// Parses an integer the way the resource compiler does.
///
/// Surrounding whitespace is ignored. Decimal values may carry a leading `-`
/// and must fit in an `i32`; `0x` hexadecimal values must fit in a `u32`.
/// The result is tagged `IntDec` or `IntHex` and holds the two's-complement
/// bit pattern.
pub fn parse_int_value(text: &str) -> Option<BinaryPrimitive> {
    let s = text.trim();
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    if let Some(hex) = digits.strip_prefix("0x") {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let val = u32::from_str_radix(hex, 16).ok()?;
        let data = if neg { val.wrapping_neg() } else { val };
        return Some(BinaryPrimitive::new(DataType::IntHex, data));
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    let val = if neg { -magnitude } else { magnitude };
    let val = i32::try_from(val).ok()?;
    Some(BinaryPrimitive::new(DataType::IntDec, val as u32))
}

/// Parses an integer and returns only its 32-bit payload.
pub fn parse_int(text: &str) -> Option<u32> {
    parse_int_value(text).map(|p| p.data)
}

/// Parses a platform version: either an integer or a known preview codename.
pub fn parse_sdk_version(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if let Some(value) = parse_int_value(trimmed) {
        return Some(value.data as i32);
    }
    SDK_CODENAMES
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, version)| *version)
}
