// crates/apksplit-xml/src/types.rs

//! Public data structures read from, or written into, manifests.

use serde::{Deserialize, Serialize};

/// Application identity declared by a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// The `package` attribute of `<manifest>`.
    pub package: String,

    /// `android:versionCode`, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<u32>,

    /// `android:revisionCode`, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_code: Option<u32>,

    /// The `split` attribute of `<manifest>`, when this is a split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_name: Option<String>,

    /// `android:minSdkVersion` from `<uses-sdk>`, or 0 when absent.
    #[serde(default)]
    pub min_sdk_version: i32,
}

impl AppInfo {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }
}
