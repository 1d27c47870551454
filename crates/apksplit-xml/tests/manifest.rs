// crates/apksplit-xml/tests/manifest.rs

use apksplit::diag::Source;
use apksplit::{
    CollectingDiagnostics, ConfigDescription, SplitOptions, adjust_split_constraints_for_min_sdk,
    parse_split_parameter,
};
use apksplit_xml::{
    AppInfo, ManifestError, extract_app_info_from_manifest, generate_split_manifest,
    load_xml_from_str, save_xml_to_string,
};
use std::fs;
use std::path::PathBuf;

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn init_logging() {
    let _ = env_logger::Builder::new()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[test]
fn test_full_manifest() {
    init_logging();
    let doc = load_xml_from_str(
        &load_test_file("AndroidManifest.xml"),
        Source::new("AndroidManifest.xml"),
    )
    .expect("Failed to parse manifest");

    let mut diag = CollectingDiagnostics::new();
    let info = extract_app_info_from_manifest(&doc, &mut diag).expect("valid manifest");

    assert_eq!(
        info,
        AppInfo {
            package: "com.example.app".into(),
            version_code: Some(1042),
            revision_code: Some(3),
            split_name: Some("feature_maps".into()),
            min_sdk_version: 33,
        }
    );
    assert!(diag.is_empty());

    // Two namespace declarations wrap the manifest element.
    let manifest = doc.find_root_element().unwrap();
    assert_eq!(manifest.line, 3);
    assert_eq!(manifest.find_child("", "uses-sdk").unwrap().line, 10);
    let application = manifest.find_child("", "application").unwrap();
    assert_eq!(
        application
            .find_attribute("http://schemas.android.com/apk/res/android", "label")
            .unwrap()
            .value,
        "Example & Co"
    );
    assert!(
        application
            .find_attribute("http://schemas.android.com/tools", "ignore")
            .is_some()
    );
}

#[test]
fn test_minimal_manifest() {
    init_logging();
    let doc = load_xml_from_str(&load_test_file("minimal.xml"), Source::new("minimal.xml"))
        .expect("Failed to parse manifest");
    let mut diag = CollectingDiagnostics::new();
    let info = extract_app_info_from_manifest(&doc, &mut diag).unwrap();
    assert_eq!(info, AppInfo::new("com.example"));
    assert_eq!(info.min_sdk_version, 0);
}

#[test]
fn test_resources_file_is_not_a_manifest() {
    init_logging();
    let doc = load_xml_from_str(&load_test_file("resources.xml"), Source::new("resources.xml"))
        .expect("Failed to parse resources");
    let mut diag = CollectingDiagnostics::new();
    let err = extract_app_info_from_manifest(&doc, &mut diag).unwrap_err();
    assert_eq!(err, ManifestError::WrongRootElement);
    assert_eq!(
        diag.entries()[0].1.to_string(),
        "resources.xml: root tag must be <manifest>"
    );
}

#[test]
fn test_split_manifest_pipeline() {
    init_logging();
    let mut diag = CollectingDiagnostics::new();
    let base = load_xml_from_str(
        &load_test_file("AndroidManifest.xml"),
        Source::new("AndroidManifest.xml"),
    )
    .unwrap();
    let app_info = extract_app_info_from_manifest(&base, &mut diag).unwrap();

    let split = parse_split_parameter(
        "out/maps-xhdpi.apk:xhdpi,land-v34",
        &SplitOptions::default(),
        &mut diag,
    )
    .unwrap();
    let adjusted =
        adjust_split_constraints_for_min_sdk(app_info.min_sdk_version, &[split.constraints]);

    let doc = generate_split_manifest(&app_info, &adjusted[0]);
    let xml = save_xml_to_string(&doc).expect("Failed to write manifest");

    assert!(xml.contains("xmlns:android=\"http://schemas.android.com/apk/res/android\""));
    assert!(xml.contains("split=\"feature_maps.config.xhdpi_land-v34\""));
    assert!(xml.contains("configForSplit=\"feature_maps\""));
    assert!(xml.contains("android:versionCode=\"1042\""));
    assert!(xml.contains("android:revisionCode=\"3\""));
    assert!(xml.contains("<application android:hasCode=\"false\"/>"));

    // The written split manifest reads back as the same identity.
    let reread = load_xml_from_str(&xml, Source::new("split.xml")).unwrap();
    let split_info = extract_app_info_from_manifest(&reread, &mut diag).unwrap();
    assert_eq!(split_info.package, app_info.package);
    assert_eq!(split_info.version_code, Some(1042));
    assert_eq!(
        split_info.split_name.as_deref(),
        Some("feature_maps.config.xhdpi_land-v34")
    );
    assert!(diag.is_empty());

    // The v4 bump on xhdpi is below minSdkVersion 33 and is dropped.
    assert_eq!(
        adjusted[0].configs().cloned().collect::<Vec<_>>(),
        vec![
            ConfigDescription::parse("xhdpi").unwrap().without_sdk_version(),
            ConfigDescription::parse("land-v34").unwrap(),
        ]
    );
}
