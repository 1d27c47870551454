// crates/apksplit/src/config/mod.rs

//! Device configuration descriptors.
//!
//! A [`ConfigDescription`] is the parsed form of a resource directory qualifier
//! string such as `en-rUS-land-xhdpi-v21`. It is a plain value: ordered,
//! hashable, and comparable axis by axis through [`ConfigDescription::diff`].

mod locale;
mod qualifiers;

pub use locale::LocaleValue;
pub use qualifiers::{
    DENSITY_ANY, DENSITY_DEFAULT, DENSITY_HIGH, DENSITY_LOW, DENSITY_MEDIUM, DENSITY_NONE,
    DENSITY_TV, DENSITY_XHIGH, DENSITY_XXHIGH, DENSITY_XXXHIGH, Hdr, Keyboard, KeysHidden,
    LayoutDirection, NavHidden, Navigation, Orientation, ScreenLong, ScreenRound, ScreenSize,
    Touchscreen, UiModeNight, UiModeType, WideColorGamut,
};

use crate::error::ParseConfigError;
use crate::types::{
    SDK_DONUT, SDK_FROYO, SDK_HONEYCOMB_MR2, SDK_JELLY_BEAN_MR1, SDK_LOLLIPOP, SDK_MARSHMALLOW,
    SDK_O,
};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt;
use qualifiers::{density_qualifier, parse_density, parse_digits};

/// Mobile network code value used for an explicit `mnc00`.
pub const MNC_ZERO: u16 = 0xffff;

bitflags! {
    /// Configuration axes, as reported by [`ConfigDescription::diff`].
    /// Bit values match the platform's `CONFIG_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigAxes: u32 {
        const MCC = 0x0001;
        const MNC = 0x0002;
        const LOCALE = 0x0004;
        const TOUCHSCREEN = 0x0008;
        const KEYBOARD = 0x0010;
        const KEYBOARD_HIDDEN = 0x0020;
        const NAVIGATION = 0x0040;
        const ORIENTATION = 0x0080;
        const DENSITY = 0x0100;
        const SCREEN_SIZE = 0x0200;
        const VERSION = 0x0400;
        const SCREEN_LAYOUT = 0x0800;
        const UI_MODE = 0x1000;
        const SMALLEST_SCREEN_SIZE = 0x2000;
        const LAYOUTDIR = 0x4000;
        const SCREEN_ROUND = 0x8000;
        const COLOR_MODE = 0x1_0000;
    }
}

/// A device configuration. Zero / `Any` on an axis means "unspecified".
///
/// Field order defines the derived ordering and follows the platform's
/// comparison order, so sets of descriptors iterate deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigDescription {
    pub mcc: u16,
    pub mnc: u16,
    pub locale: LocaleValue,
    pub orientation: Orientation,
    pub touchscreen: Touchscreen,
    pub density: u16,
    pub keyboard: Keyboard,
    pub navigation: Navigation,
    pub keys_hidden: KeysHidden,
    pub nav_hidden: NavHidden,
    pub screen_width: u16,
    pub screen_height: u16,
    pub sdk_version: u16,
    pub layout_direction: LayoutDirection,
    pub screen_long: ScreenLong,
    pub screen_size: ScreenSize,
    pub ui_mode_night: UiModeNight,
    pub ui_mode_type: UiModeType,
    pub smallest_screen_width_dp: u16,
    pub screen_width_dp: u16,
    pub screen_height_dp: u16,
    pub screen_round: ScreenRound,
    pub hdr: Hdr,
    pub wide_color_gamut: WideColorGamut,
}

type QualifierParser = fn(&str, &mut ConfigDescription) -> bool;

/// Parsers for the qualifiers that precede the locale.
const PRE_LOCALE: &[QualifierParser] = &[parse_mcc, parse_mnc];

/// Parsers for the qualifiers that follow the locale, in mandatory order.
const POST_LOCALE: &[QualifierParser] = &[
    |t, c| parse_enum(t, &mut c.layout_direction, LayoutDirection::from_qualifier),
    |t, c| parse_dp(t, "sw", &mut c.smallest_screen_width_dp),
    |t, c| parse_dp(t, "w", &mut c.screen_width_dp),
    |t, c| parse_dp(t, "h", &mut c.screen_height_dp),
    |t, c| parse_enum(t, &mut c.screen_size, ScreenSize::from_qualifier),
    |t, c| parse_enum(t, &mut c.screen_long, ScreenLong::from_qualifier),
    |t, c| parse_enum(t, &mut c.screen_round, ScreenRound::from_qualifier),
    |t, c| parse_enum(t, &mut c.wide_color_gamut, WideColorGamut::from_qualifier),
    |t, c| parse_enum(t, &mut c.hdr, Hdr::from_qualifier),
    |t, c| parse_enum(t, &mut c.orientation, Orientation::from_qualifier),
    |t, c| parse_enum(t, &mut c.ui_mode_type, UiModeType::from_qualifier),
    |t, c| parse_enum(t, &mut c.ui_mode_night, UiModeNight::from_qualifier),
    |t, c| match parse_density(t) {
        Some(d) => {
            c.density = d;
            true
        }
        None => false,
    },
    |t, c| parse_enum(t, &mut c.touchscreen, Touchscreen::from_qualifier),
    |t, c| parse_enum(t, &mut c.keys_hidden, KeysHidden::from_qualifier),
    |t, c| parse_enum(t, &mut c.keyboard, Keyboard::from_qualifier),
    |t, c| parse_enum(t, &mut c.nav_hidden, NavHidden::from_qualifier),
    |t, c| parse_enum(t, &mut c.navigation, Navigation::from_qualifier),
    parse_screen_dimensions,
    parse_version,
];

fn parse_enum<T>(token: &str, slot: &mut T, from: fn(&str) -> Option<T>) -> bool {
    match from(token) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn parse_mcc(token: &str, config: &mut ConfigDescription) -> bool {
    match token.strip_prefix("mcc") {
        Some(digits) if digits.len() == 3 => match parse_digits(digits) {
            Some(value) => {
                config.mcc = value;
                true
            }
            None => false,
        },
        _ => false,
    }
}

fn parse_mnc(token: &str, config: &mut ConfigDescription) -> bool {
    match token.strip_prefix("mnc") {
        Some(digits) if (1..=3).contains(&digits.len()) => match parse_digits(digits) {
            Some(0) => {
                config.mnc = MNC_ZERO;
                true
            }
            Some(value) => {
                config.mnc = value;
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// `<prefix><N>dp`, e.g. `sw600dp`.
fn parse_dp(token: &str, prefix: &str, slot: &mut u16) -> bool {
    let Some(value) = token
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("dp"))
        .and_then(parse_digits)
    else {
        return false;
    };
    *slot = value;
    true
}

/// `<W>x<H>` with the larger dimension first.
fn parse_screen_dimensions(token: &str, config: &mut ConfigDescription) -> bool {
    let Some((w, h)) = token.split_once('x') else {
        return false;
    };
    match (parse_digits(w), parse_digits(h)) {
        (Some(w), Some(h)) if w >= h => {
            config.screen_width = w;
            config.screen_height = h;
            true
        }
        _ => false,
    }
}

fn parse_version(token: &str, config: &mut ConfigDescription) -> bool {
    match token.strip_prefix('v').and_then(parse_digits) {
        Some(v) => {
            config.sdk_version = v;
            true
        }
        None => false,
    }
}

impl ConfigDescription {
    /// The configuration with every axis unspecified.
    pub fn default_config() -> &'static ConfigDescription {
        static DEFAULT: ConfigDescription = ConfigDescription {
            mcc: 0,
            mnc: 0,
            locale: LocaleValue {
                language: String::new(),
                region: String::new(),
                script: String::new(),
                variant: String::new(),
            },
            orientation: Orientation::Any,
            touchscreen: Touchscreen::Any,
            density: 0,
            keyboard: Keyboard::Any,
            navigation: Navigation::Any,
            keys_hidden: KeysHidden::Any,
            nav_hidden: NavHidden::Any,
            screen_width: 0,
            screen_height: 0,
            sdk_version: 0,
            layout_direction: LayoutDirection::Any,
            screen_long: ScreenLong::Any,
            screen_size: ScreenSize::Any,
            ui_mode_night: UiModeNight::Any,
            ui_mode_type: UiModeType::Any,
            smallest_screen_width_dp: 0,
            screen_width_dp: 0,
            screen_height_dp: 0,
            screen_round: ScreenRound::Any,
            hdr: Hdr::Any,
            wide_color_gamut: WideColorGamut::Any,
        };
        &DEFAULT
    }

    /// Parses a `-`-separated qualifier string. Qualifiers are case-insensitive
    /// and must appear in the canonical order. The empty string is the default
    /// configuration.
    ///
    /// The platform version is raised to the first release that understands
    /// every qualifier used, so `xhdpi` parses as `xhdpi-v4`.
    pub fn parse(text: &str) -> Result<Self, ParseConfigError> {
        let mut config = ConfigDescription::default();
        if text.is_empty() {
            return Ok(config);
        }

        let err = || ParseConfigError {
            text: text.to_string(),
        };
        let parts: Vec<String> = text.split('-').map(|p| p.to_ascii_lowercase()).collect();
        let mut idx = 0;

        for parser in PRE_LOCALE {
            if idx < parts.len() && parser(&parts[idx], &mut config) {
                idx += 1;
            }
        }

        let (locale, consumed) =
            LocaleValue::from_qualifier_parts(&parts[idx..]).map_err(|_| err())?;
        if consumed > 0 {
            config.locale = locale;
            idx += consumed;
        }

        for parser in POST_LOCALE {
            if idx < parts.len() && parser(&parts[idx], &mut config) {
                idx += 1;
            }
        }

        if idx != parts.len() {
            return Err(err());
        }

        config.apply_version_for_compatibility();
        Ok(config)
    }

    /// Raises `sdk_version` to the first platform release that supports the
    /// qualifiers in use.
    fn apply_version_for_compatibility(&mut self) {
        let min_sdk = if self.ui_mode_type == UiModeType::VrHeadset
            || !self.wide_color_gamut.is_any()
            || !self.hdr.is_any()
        {
            SDK_O
        } else if !self.screen_round.is_any() {
            SDK_MARSHMALLOW
        } else if self.density == DENSITY_ANY
            || !self.locale.script.is_empty()
            || !self.locale.variant.is_empty()
        {
            SDK_LOLLIPOP
        } else if !self.layout_direction.is_any() {
            SDK_JELLY_BEAN_MR1
        } else if self.smallest_screen_width_dp != 0
            || self.screen_width_dp != 0
            || self.screen_height_dp != 0
        {
            SDK_HONEYCOMB_MR2
        } else if !self.ui_mode_type.is_any() || !self.ui_mode_night.is_any() {
            SDK_FROYO
        } else if !self.screen_size.is_any()
            || !self.screen_long.is_any()
            || self.density != DENSITY_DEFAULT
        {
            SDK_DONUT
        } else {
            0
        };

        if min_sdk > self.sdk_version {
            self.sdk_version = min_sdk;
        }
    }

    /// Returns a copy with the platform version axis cleared.
    pub fn without_sdk_version(&self) -> Self {
        let mut copy = self.clone();
        copy.sdk_version = 0;
        copy
    }

    /// Whether every axis is unspecified.
    pub fn is_default(&self) -> bool {
        self == Self::default_config()
    }

    /// The set of axes on which `self` and `other` differ.
    pub fn diff(&self, other: &ConfigDescription) -> ConfigAxes {
        let mut axes = ConfigAxes::empty();
        let mut mark = |differs: bool, axis: ConfigAxes| {
            if differs {
                axes |= axis;
            }
        };

        mark(self.mcc != other.mcc, ConfigAxes::MCC);
        mark(self.mnc != other.mnc, ConfigAxes::MNC);
        mark(self.locale != other.locale, ConfigAxes::LOCALE);
        mark(self.orientation != other.orientation, ConfigAxes::ORIENTATION);
        mark(self.density != other.density, ConfigAxes::DENSITY);
        mark(self.touchscreen != other.touchscreen, ConfigAxes::TOUCHSCREEN);
        mark(
            self.keys_hidden != other.keys_hidden || self.nav_hidden != other.nav_hidden,
            ConfigAxes::KEYBOARD_HIDDEN,
        );
        mark(self.keyboard != other.keyboard, ConfigAxes::KEYBOARD);
        mark(self.navigation != other.navigation, ConfigAxes::NAVIGATION);
        mark(
            self.screen_width != other.screen_width
                || self.screen_height != other.screen_height
                || self.screen_width_dp != other.screen_width_dp
                || self.screen_height_dp != other.screen_height_dp,
            ConfigAxes::SCREEN_SIZE,
        );
        mark(self.sdk_version != other.sdk_version, ConfigAxes::VERSION);
        mark(
            self.screen_size != other.screen_size || self.screen_long != other.screen_long,
            ConfigAxes::SCREEN_LAYOUT,
        );
        mark(
            self.layout_direction != other.layout_direction,
            ConfigAxes::LAYOUTDIR,
        );
        mark(
            self.ui_mode_type != other.ui_mode_type || self.ui_mode_night != other.ui_mode_night,
            ConfigAxes::UI_MODE,
        );
        mark(
            self.smallest_screen_width_dp != other.smallest_screen_width_dp,
            ConfigAxes::SMALLEST_SCREEN_SIZE,
        );
        mark(self.screen_round != other.screen_round, ConfigAxes::SCREEN_ROUND);
        mark(
            self.hdr != other.hdr || self.wide_color_gamut != other.wide_color_gamut,
            ConfigAxes::COLOR_MODE,
        );
        axes
    }

    /// The qualifier tokens of this configuration, in canonical order.
    fn qualifiers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();

        if self.mcc != 0 {
            out.push(format!("mcc{}", self.mcc));
        }
        match self.mnc {
            0 => {}
            MNC_ZERO => out.push("mnc00".to_string()),
            mnc => out.push(format!("mnc{}", mnc)),
        }
        if !self.locale.language.is_empty() {
            out.push(self.locale.to_string());
        }
        out.extend(self.layout_direction.qualifier().map(String::from));
        if self.smallest_screen_width_dp != 0 {
            out.push(format!("sw{}dp", self.smallest_screen_width_dp));
        }
        if self.screen_width_dp != 0 {
            out.push(format!("w{}dp", self.screen_width_dp));
        }
        if self.screen_height_dp != 0 {
            out.push(format!("h{}dp", self.screen_height_dp));
        }
        out.extend(
            [
                self.screen_size.qualifier(),
                self.screen_long.qualifier(),
                self.screen_round.qualifier(),
                self.wide_color_gamut.qualifier(),
                self.hdr.qualifier(),
                self.orientation.qualifier(),
                self.ui_mode_type.qualifier(),
                self.ui_mode_night.qualifier(),
            ]
            .into_iter()
            .flatten()
            .map(String::from),
        );
        out.extend(density_qualifier(self.density));
        out.extend(
            [
                self.touchscreen.qualifier(),
                self.keys_hidden.qualifier(),
                self.keyboard.qualifier(),
                self.nav_hidden.qualifier(),
                self.navigation.qualifier(),
            ]
            .into_iter()
            .flatten()
            .map(String::from),
        );
        if self.screen_width != 0 || self.screen_height != 0 {
            out.push(format!("{}x{}", self.screen_width, self.screen_height));
        }
        if self.sdk_version != 0 {
            out.push(format!("v{}", self.sdk_version));
        }
        out
    }
}

impl fmt::Display for ConfigDescription {
    /// The canonical qualifier string; empty for the default configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualifiers().join("-"))
    }
}

impl core::str::FromStr for ConfigDescription {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigDescription::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ConfigDescription {
        ConfigDescription::parse(text).unwrap_or_else(|e| panic!("{}: {}", text, e))
    }

    #[test]
    fn test_empty_is_default() {
        let config = parse("");
        assert!(config.is_default());
        assert_eq!(config.to_string(), "");
    }

    #[test]
    fn test_density_adds_version() {
        let config = parse("xhdpi");
        assert_eq!(config.density, DENSITY_XHIGH);
        assert_eq!(config.sdk_version, SDK_DONUT);
        assert_eq!(config.to_string(), "xhdpi-v4");
    }

    #[test]
    fn test_explicit_version_is_kept_when_higher() {
        let config = parse("xhdpi-v21");
        assert_eq!(config.sdk_version, 21);
        let config = parse("anydpi-v4");
        assert_eq!(config.sdk_version, SDK_LOLLIPOP);
    }

    #[test]
    fn test_locale_does_not_add_version() {
        let config = parse("en-rUS");
        assert_eq!(config.locale.language, "en");
        assert_eq!(config.locale.region, "US");
        assert_eq!(config.sdk_version, 0);
        assert_eq!(config.to_string(), "en-rUS");
    }

    #[test]
    fn test_full_qualifier_string() {
        let text = "mcc310-mnc4-en-rUS-ldrtl-sw600dp-w720dp-h1024dp-large-long-round-widecg-highdr-port-television-night-xhdpi-finger-keyssoft-qwerty-navhidden-dpad-1024x768-v26";
        let config = parse(text);
        assert_eq!(config.mcc, 310);
        assert_eq!(config.mnc, 4);
        assert_eq!(config.layout_direction, LayoutDirection::Rtl);
        assert_eq!(config.smallest_screen_width_dp, 600);
        assert_eq!(config.ui_mode_type, UiModeType::Television);
        assert_eq!(config.navigation, Navigation::Dpad);
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.screen_height, 768);
        assert_eq!(config.to_string(), text);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse("EN-rus-LAND"), parse("en-rUS-land"));
    }

    #[test]
    fn test_out_of_order_fails() {
        assert!(ConfigDescription::parse("land-en").is_err());
        assert!(ConfigDescription::parse("xhdpi-port").is_err());
    }

    #[test]
    fn test_garbage_fails() {
        let err = ConfigDescription::parse("not-a-config").unwrap_err();
        assert_eq!(err.text, "not-a-config");
        assert!(ConfigDescription::parse("en-").is_err());
        assert!(ConfigDescription::parse("en-r12").is_err());
        assert!(ConfigDescription::parse("480x800").is_err());
    }

    #[test]
    fn test_mnc_zero() {
        let config = parse("mcc310-mnc00");
        assert_eq!(config.mnc, MNC_ZERO);
        assert_eq!(config.to_string(), "mcc310-mnc00");
    }

    #[test]
    fn test_car_is_ui_mode() {
        let config = parse("car");
        assert_eq!(config.ui_mode_type, UiModeType::Car);
        assert!(config.locale.is_empty());
        assert_eq!(config.sdk_version, SDK_FROYO);
    }

    #[test]
    fn test_bcp47_locale_adds_lollipop() {
        let config = parse("b+sr+Latn");
        assert_eq!(config.sdk_version, SDK_LOLLIPOP);
        assert_eq!(config.to_string(), "b+sr+Latn-v21");
    }

    #[test]
    fn test_diff_density_only() {
        let config = parse("hdpi").without_sdk_version();
        assert_eq!(
            config.diff(ConfigDescription::default_config()),
            ConfigAxes::DENSITY
        );
    }

    #[test]
    fn test_diff_multiple_axes() {
        let a = parse("en-land");
        let b = parse("fr-port-v21");
        let d = a.diff(&b);
        assert_eq!(
            d,
            ConfigAxes::LOCALE | ConfigAxes::ORIENTATION | ConfigAxes::VERSION
        );
        assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn test_without_sdk_version_is_a_copy() {
        let config = parse("v21");
        let stripped = config.without_sdk_version();
        assert_eq!(config.sdk_version, 21);
        assert_eq!(stripped.sdk_version, 0);
        assert!(stripped.is_default());
    }

    #[test]
    fn test_ordering_is_consistent_with_equality() {
        let a = parse("en");
        let b = parse("fr");
        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), core::cmp::Ordering::Equal);
        assert!(ConfigDescription::default() < a);
    }
}
