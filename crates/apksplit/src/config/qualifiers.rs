// crates/apksplit/src/config/qualifiers.rs

//! Enumerated configuration axes and their qualifier tokens.
//!
//! Every axis has an implicit `Any` variant meaning "not specified". Variants
//! are declared in the order of their platform encoding so that the derived
//! ordering follows the platform's comparison order.

macro_rules! qualifier_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            #[default]
            Any,
            $($variant),+
        }

        impl $name {
            /// Parses a lowercase qualifier token.
            pub fn from_qualifier(token: &str) -> Option<Self> {
                match token {
                    $($token => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// The qualifier token, or `None` for `Any`.
            pub fn qualifier(self) -> Option<&'static str> {
                match self {
                    $name::Any => None,
                    $($name::$variant => Some($token),)+
                }
            }

            pub fn is_any(self) -> bool {
                matches!(self, $name::Any)
            }
        }
    };
}

qualifier_enum! {
    /// `ldltr` / `ldrtl`
    LayoutDirection { Ltr => "ldltr", Rtl => "ldrtl" }
}

qualifier_enum! {
    /// Screen size class.
    ScreenSize { Small => "small", Normal => "normal", Large => "large", XLarge => "xlarge" }
}

qualifier_enum! {
    ScreenLong { NotLong => "notlong", Long => "long" }
}

qualifier_enum! {
    ScreenRound { NotRound => "notround", Round => "round" }
}

qualifier_enum! {
    WideColorGamut { No => "nowidecg", Yes => "widecg" }
}

qualifier_enum! {
    Hdr { Low => "lowdr", High => "highdr" }
}

qualifier_enum! {
    Orientation { Port => "port", Land => "land", Square => "square" }
}

qualifier_enum! {
    /// UI mode type. The platform's `normal` type has no qualifier of its own.
    UiModeType {
        Desk => "desk",
        Car => "car",
        Television => "television",
        Appliance => "appliance",
        Watch => "watch",
        VrHeadset => "vrheadset",
    }
}

qualifier_enum! {
    UiModeNight { NotNight => "notnight", Night => "night" }
}

qualifier_enum! {
    Touchscreen { NoTouch => "notouch", Stylus => "stylus", Finger => "finger" }
}

qualifier_enum! {
    KeysHidden { Exposed => "keysexposed", Hidden => "keyshidden", Soft => "keyssoft" }
}

qualifier_enum! {
    Keyboard { NoKeys => "nokeys", Qwerty => "qwerty", TwelveKey => "12key" }
}

qualifier_enum! {
    NavHidden { Exposed => "navexposed", Hidden => "navhidden" }
}

qualifier_enum! {
    Navigation { NoNav => "nonav", Dpad => "dpad", Trackball => "trackball", Wheel => "wheel" }
}

// --- Density ---

pub const DENSITY_DEFAULT: u16 = 0;
pub const DENSITY_LOW: u16 = 120;
pub const DENSITY_MEDIUM: u16 = 160;
pub const DENSITY_TV: u16 = 213;
pub const DENSITY_HIGH: u16 = 240;
pub const DENSITY_XHIGH: u16 = 320;
pub const DENSITY_XXHIGH: u16 = 480;
pub const DENSITY_XXXHIGH: u16 = 640;
pub const DENSITY_ANY: u16 = 0xfffe;
pub const DENSITY_NONE: u16 = 0xffff;

const DENSITY_NAMES: &[(&str, u16)] = &[
    ("ldpi", DENSITY_LOW),
    ("mdpi", DENSITY_MEDIUM),
    ("tvdpi", DENSITY_TV),
    ("hdpi", DENSITY_HIGH),
    ("xhdpi", DENSITY_XHIGH),
    ("xxhdpi", DENSITY_XXHIGH),
    ("xxxhdpi", DENSITY_XXXHIGH),
    ("anydpi", DENSITY_ANY),
    ("nodpi", DENSITY_NONE),
];

/// Parses `ldpi` .. `xxxhdpi`, `anydpi`, `nodpi` or `<N>dpi`.
pub(crate) fn parse_density(token: &str) -> Option<u16> {
    if let Some((_, value)) = DENSITY_NAMES.iter().find(|(name, _)| *name == token) {
        return Some(*value);
    }
    let digits = token.strip_suffix("dpi")?;
    let value = parse_digits(digits)?;
    (value != 0).then_some(value)
}

/// Formats a density the way [`parse_density`] reads it.
pub(crate) fn density_qualifier(density: u16) -> Option<alloc::string::String> {
    use alloc::string::ToString;
    if density == DENSITY_DEFAULT {
        return None;
    }
    match DENSITY_NAMES.iter().find(|(_, value)| *value == density) {
        Some((name, _)) => Some(name.to_string()),
        None => Some(alloc::format!("{}dpi", density)),
    }
}

/// Parses a non-empty run of ASCII digits that fits in a `u16`.
pub(crate) fn parse_digits(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
