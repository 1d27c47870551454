// src/lib.rs

#![doc = "XML documents for split packaging."]
#![doc = ""]
#![doc = "This library provides a namespace-aware XML tree and the manifest logic"]
#![doc = "built on it:"]
#![doc = "- `load_xml_from_str` / `save_xml_to_string`: reading and writing documents."]
#![doc = "- `extract_app_info_from_manifest`: validated application identity from a manifest."]
#![doc = "- `generate_split_manifest`: the manifest of a resource-only split."]

// --- Crate Modules ---

mod builder;
mod error;
mod model;
mod parser;
mod types;

pub mod manifest;

// --- Public API Re-exports ---

pub use builder::save_xml_to_string;
pub use error::{ExtractError, ManifestError, XmlError};
pub use manifest::{
    extract_app_info_from_manifest, extract_compiled_int, extract_compiled_string,
    extract_sdk_version, generate_split_manifest,
};
pub use model::{AaptAttribute, Attribute, AttributeValue, Element, Namespace, Node, Text, XmlResource};
pub use parser::load_xml_from_str;
pub use types::AppInfo;
