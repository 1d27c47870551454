// crates/apksplit-xml/src/manifest/extract.rs

//! Typed reads of single attributes. A compiled value, when present, is the
//! only thing consulted; the source text is a fallback for uncompiled
//! attributes.

use crate::error::ExtractError;
use crate::model::{Attribute, AttributeValue};
use apksplit::Item;
use apksplit::utils::{parse_int, parse_sdk_version};

/// Reads a non-empty string.
pub fn extract_compiled_string(attr: &Attribute) -> Result<String, ExtractError> {
    match attr.value_repr() {
        AttributeValue::Compiled(Item::String(s)) if s.is_empty() => {
            Err(ExtractError::EmptyValue { compiled: true })
        }
        AttributeValue::Compiled(Item::String(s)) => Ok(s.clone()),
        AttributeValue::Compiled(_) => Err(ExtractError::WrongCompiledType {
            expected: "a string",
        }),
        AttributeValue::Text(text) => Ok(text.to_string()),
        AttributeValue::None => Err(ExtractError::EmptyValue { compiled: false }),
    }
}

/// Reads an integer. Compiled values must carry an integer type tag.
pub fn extract_compiled_int(attr: &Attribute) -> Result<u32, ExtractError> {
    match attr.value_repr() {
        AttributeValue::Compiled(Item::BinaryPrimitive(p)) if p.data_type.is_integer() => {
            Ok(p.data)
        }
        AttributeValue::Compiled(_) => Err(ExtractError::WrongCompiledType {
            expected: "an integer",
        }),
        AttributeValue::Text(text) => parse_int(text).ok_or_else(|| ExtractError::NotAnInteger {
            text: text.to_string(),
        }),
        AttributeValue::None => Err(ExtractError::NotAnInteger {
            text: String::new(),
        }),
    }
}

/// Reads a platform version: an integer, or a string holding a number or a
/// release codename.
pub fn extract_sdk_version(attr: &Attribute) -> Result<i32, ExtractError> {
    match attr.value_repr() {
        AttributeValue::Compiled(Item::BinaryPrimitive(p)) if p.data_type.is_integer() => {
            Ok(p.data as i32)
        }
        AttributeValue::Compiled(Item::String(s)) => {
            parse_sdk_version(s).ok_or_else(|| ExtractError::NotASdkVersion {
                text: s.clone(),
                compiled: true,
            })
        }
        AttributeValue::Compiled(_) => Err(ExtractError::WrongCompiledType {
            expected: "an integer or string",
        }),
        AttributeValue::Text(text) => {
            parse_sdk_version(text).ok_or_else(|| ExtractError::NotASdkVersion {
                text: text.to_string(),
                compiled: false,
            })
        }
        AttributeValue::None => Err(ExtractError::NotASdkVersion {
            text: String::new(),
            compiled: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apksplit::types::DataType;
    use apksplit::{BinaryPrimitive, Reference, ResourceId};

    fn text(value: &str) -> Attribute {
        Attribute::new("", "a", value)
    }

    fn compiled(value: &str, item: Item) -> Attribute {
        Attribute::new("", "a", value).compiled(ResourceId(0x0101_0000), item)
    }

    #[test]
    fn test_string_prefers_compiled() {
        let attr = compiled("from-text", Item::String("from-compiled".into()));
        assert_eq!(extract_compiled_string(&attr).unwrap(), "from-compiled");
        assert_eq!(extract_compiled_string(&text("com.example")).unwrap(), "com.example");
    }

    #[test]
    fn test_string_failures() {
        assert_eq!(
            extract_compiled_string(&compiled("x", Item::String(String::new()))),
            Err(ExtractError::EmptyValue { compiled: true })
        );
        assert_eq!(
            extract_compiled_string(&compiled("x", Item::BinaryPrimitive(BinaryPrimitive::int_dec(1)))),
            Err(ExtractError::WrongCompiledType {
                expected: "a string"
            })
        );
        assert_eq!(
            extract_compiled_string(&text("")),
            Err(ExtractError::EmptyValue { compiled: false })
        );
    }

    #[test]
    fn test_int_compiled_types() {
        let dec = compiled("0", Item::BinaryPrimitive(BinaryPrimitive::int_dec(42)));
        assert_eq!(extract_compiled_int(&dec), Ok(42));

        let hex = compiled(
            "0",
            Item::BinaryPrimitive(BinaryPrimitive::new(DataType::IntHex, 0x10)),
        );
        assert_eq!(extract_compiled_int(&hex), Ok(0x10));

        let boolean = compiled("0", Item::BinaryPrimitive(BinaryPrimitive::boolean(true)));
        assert_eq!(extract_compiled_int(&boolean), Ok(0xffff_ffff));

        let float = compiled(
            "0",
            Item::BinaryPrimitive(BinaryPrimitive::new(DataType::Float, 0)),
        );
        assert_eq!(
            extract_compiled_int(&float),
            Err(ExtractError::WrongCompiledType {
                expected: "an integer"
            })
        );

        let string = compiled("12", Item::String("12".into()));
        assert!(matches!(
            extract_compiled_int(&string),
            Err(ExtractError::WrongCompiledType { .. })
        ));
    }

    #[test]
    fn test_int_text() {
        assert_eq!(extract_compiled_int(&text("12")), Ok(12));
        assert_eq!(extract_compiled_int(&text("0x1f")), Ok(0x1f));
        assert_eq!(
            extract_compiled_int(&text("1.5")),
            Err(ExtractError::NotAnInteger { text: "1.5".into() })
        );
        assert_eq!(
            extract_compiled_int(&text("")),
            Err(ExtractError::NotAnInteger {
                text: String::new()
            })
        );
    }

    #[test]
    fn test_sdk_version() {
        let int = compiled("x", Item::BinaryPrimitive(BinaryPrimitive::int_dec(21)));
        assert_eq!(extract_sdk_version(&int), Ok(21));

        let codename = compiled("x", Item::String("O".into()));
        assert_eq!(extract_sdk_version(&codename), Ok(26));

        let bad = compiled("21", Item::String("Zeta".into()));
        assert_eq!(
            extract_sdk_version(&bad),
            Err(ExtractError::NotASdkVersion {
                text: "Zeta".into(),
                compiled: true
            })
        );

        let reference = compiled(
            "@integer/min",
            Item::Reference(Reference {
                id: None,
                name: Some("integer/min".into()),
            }),
        );
        assert_eq!(
            extract_sdk_version(&reference),
            Err(ExtractError::WrongCompiledType {
                expected: "an integer or string"
            })
        );

        assert_eq!(extract_sdk_version(&text("28")), Ok(28));
        assert_eq!(extract_sdk_version(&text("Tiramisu")), Ok(33));
        assert!(matches!(
            extract_sdk_version(&text("tiramisu")),
            Err(ExtractError::NotASdkVersion { compiled: false, .. })
        ));
    }
}
