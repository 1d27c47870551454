// crates/apksplit-xml/src/manifest/mod.rs

//! Reading application identity out of a manifest, and writing split
//! manifests.

mod extract;
mod synthesize;

pub use extract::{extract_compiled_int, extract_compiled_string, extract_sdk_version};
pub use synthesize::generate_split_manifest;

use crate::error::{ExtractError, ManifestError};
use crate::model::{Attribute, Element, XmlResource};
use crate::types::AppInfo;
use apksplit::diag::{DiagMessage, Diagnostics, Source};
use apksplit::types::SCHEMA_ANDROID;

/// Reads the application identity from a manifest document.
///
/// Stops at the first problem. Every failure except an empty document is
/// also reported to `diag`. A wrong root or a missing package is anchored at
/// the file; a bad value is anchored at the line of the element carrying it.
pub fn extract_app_info_from_manifest(
    doc: &XmlResource,
    diag: &mut dyn Diagnostics,
) -> Result<AppInfo, ManifestError> {
    let Some(manifest) = doc.find_root_element() else {
        return Err(ManifestError::EmptyDocument);
    };

    if !manifest.namespace_uri.is_empty() || manifest.name != "manifest" {
        return Err(report(diag, doc.source.clone(), ManifestError::WrongRootElement));
    }

    let at_manifest = || doc.source.with_line(manifest.line);

    let Some(package) = manifest.find_attribute("", "package") else {
        return Err(report(diag, doc.source.clone(), ManifestError::MissingPackage));
    };
    let package = extract_compiled_string(package)
        .map_err(|e| report(diag, at_manifest(), ManifestError::InvalidPackageName(e)))?;

    let mut app_info = AppInfo::new(package);

    app_info.version_code = optional(manifest, SCHEMA_ANDROID, "versionCode", extract_compiled_int)
        .map_err(|e| report(diag, at_manifest(), ManifestError::InvalidVersionCode(e)))?;

    app_info.revision_code =
        optional(manifest, SCHEMA_ANDROID, "revisionCode", extract_compiled_int)
            .map_err(|e| report(diag, at_manifest(), ManifestError::InvalidRevisionCode(e)))?;

    app_info.split_name = optional(manifest, "", "split", extract_compiled_string)
        .map_err(|e| report(diag, at_manifest(), ManifestError::InvalidSplitName(e)))?;

    if let Some(uses_sdk) = manifest.find_child("", "uses-sdk") {
        if let Some(min_sdk) =
            optional(uses_sdk, SCHEMA_ANDROID, "minSdkVersion", extract_sdk_version).map_err(
                |e| {
                    report(
                        diag,
                        doc.source.with_line(uses_sdk.line),
                        ManifestError::InvalidMinSdkVersion(e),
                    )
                },
            )?
        {
            app_info.min_sdk_version = min_sdk;
        }
    }

    log::debug!(
        "{}: package '{}', minSdkVersion {}",
        doc.source,
        app_info.package,
        app_info.min_sdk_version
    );
    Ok(app_info)
}

/// Runs `extract` on an attribute if the element has it.
fn optional<T>(
    el: &Element,
    namespace_uri: &str,
    name: &str,
    extract: fn(&Attribute) -> Result<T, ExtractError>,
) -> Result<Option<T>, ExtractError> {
    el.find_attribute(namespace_uri, name).map(extract).transpose()
}

fn report(diag: &mut dyn Diagnostics, source: Source, err: ManifestError) -> ManifestError {
    diag.error(DiagMessage::at(source, err.to_string()));
    err
}
