// crates/apksplit/tests/properties.rs

use apksplit::{ConfigDescription, SplitConstraints, adjust_split_constraints_for_min_sdk};
use proptest::prelude::*;

fn arb_qualifier_string() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("mcc310"), Just("mcc310-mnc00")],
        prop_oneof![Just(""), Just("en"), Just("fr-rCA"), Just("b+sr+Latn"), Just("b+es+419")],
        prop_oneof![Just(""), Just("ldrtl"), Just("sw600dp"), Just("w720dp-h480dp")],
        prop_oneof![Just(""), Just("large"), Just("round"), Just("port"), Just("land")],
        prop_oneof![Just(""), Just("night"), Just("watch"), Just("vrheadset")],
        prop_oneof![Just(""), Just("ldpi"), Just("xhdpi"), Just("anydpi"), Just("420dpi")],
        prop_oneof![Just(""), Just("finger"), Just("keyssoft-qwerty")],
        prop_oneof![Just(""), Just("v4"), Just("v13"), Just("v21"), Just("v28")],
    )
        .prop_map(|(a, b, c, d, e, f, g, h)| {
            [a, b, c, d, e, f, g, h]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("-")
        })
}

fn arb_config() -> impl Strategy<Value = ConfigDescription> {
    arb_qualifier_string().prop_map(|text| {
        ConfigDescription::parse(&text).unwrap_or_else(|e| panic!("{}: {}", text, e))
    })
}

fn arb_splits() -> impl Strategy<Value = Vec<SplitConstraints>> {
    prop::collection::vec(
        prop::collection::vec(arb_config(), 0..4)
            .prop_map(|configs| configs.into_iter().collect::<SplitConstraints>()),
        0..4,
    )
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(config in arb_config()) {
        let text = config.to_string();
        let reparsed = ConfigDescription::parse(&text);
        prop_assert_eq!(reparsed, Ok(config));
    }

    #[test]
    fn ordering_agrees_with_equality(a in arb_config(), b in arb_config()) {
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
        prop_assert_eq!(a.diff(&b).is_empty(), a == b);
    }

    #[test]
    fn without_sdk_version_only_touches_version(config in arb_config()) {
        let stripped = config.without_sdk_version();
        prop_assert_eq!(stripped.sdk_version, 0);
        prop_assert!((config.diff(&stripped) - apksplit::ConfigAxes::VERSION).is_empty());
    }

    #[test]
    fn sdk_adjustment_is_idempotent(min_sdk in 0i32..30, splits in arb_splits()) {
        let once = adjust_split_constraints_for_min_sdk(min_sdk, &splits);
        let twice = adjust_split_constraints_for_min_sdk(min_sdk, &once);
        prop_assert_eq!(once.len(), splits.len());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sdk_adjustment_leaves_no_redundant_version(min_sdk in 0i32..30, splits in arb_splits()) {
        for split in adjust_split_constraints_for_min_sdk(min_sdk, &splits) {
            for config in split.configs() {
                prop_assert!(config.sdk_version == 0 || i32::from(config.sdk_version) > min_sdk);
            }
        }
    }
}
