// crates/apksplit-xml/src/manifest/synthesize.rs

use crate::model::{Attribute, Element, Namespace, XmlResource};
use crate::types::AppInfo;
use apksplit::types::{ATTR_HAS_CODE, ATTR_REVISION_CODE, ATTR_VERSION_CODE, SCHEMA_ANDROID};
use apksplit::{BinaryPrimitive, Item, SplitConstraints};

/// Builds the manifest of a resource-only split.
///
/// The `split` attribute is `[<split name>.]config.<configs joined by '_'>`.
/// `versionCode` and `revisionCode` are written with their compiled form so
/// the document can be flattened without an attribute compiler.
pub fn generate_split_manifest(app_info: &AppInfo, constraints: &SplitConstraints) -> XmlResource {
    let mut manifest = Element::new("", "manifest");
    manifest
        .attributes
        .push(Attribute::new("", "package", app_info.package.as_str()));

    if let Some(version_code) = app_info.version_code {
        manifest.attributes.push(
            Attribute::new(SCHEMA_ANDROID, "versionCode", version_code.to_string()).compiled(
                ATTR_VERSION_CODE,
                Item::BinaryPrimitive(BinaryPrimitive::int_dec(version_code)),
            ),
        );
    }

    if let Some(revision_code) = app_info.revision_code {
        manifest.attributes.push(
            Attribute::new(SCHEMA_ANDROID, "revisionCode", revision_code.to_string()).compiled(
                ATTR_REVISION_CODE,
                Item::BinaryPrimitive(BinaryPrimitive::int_dec(revision_code)),
            ),
        );
    }

    let mut split_name = String::new();
    if let Some(name) = &app_info.split_name {
        split_name.push_str(name);
        split_name.push('.');
    }
    split_name.push_str("config.");
    split_name.push_str(&constraints.joined_name());
    manifest
        .attributes
        .push(Attribute::new("", "split", split_name));

    if let Some(name) = &app_info.split_name {
        manifest
            .attributes
            .push(Attribute::new("", "configForSplit", name.as_str()));
    }

    let mut application = Element::new("", "application");
    application.attributes.push(
        Attribute::new(SCHEMA_ANDROID, "hasCode", "false").compiled(
            ATTR_HAS_CODE,
            Item::BinaryPrimitive(BinaryPrimitive::boolean(false)),
        ),
    );
    manifest.append_child(application);

    let mut android = Namespace::new("android", SCHEMA_ANDROID);
    android.append_child(manifest);

    XmlResource {
        root: Some(android.into()),
        ..Default::default()
    }
}
