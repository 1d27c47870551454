// crates/apksplit/src/config/locale.rs

//! The locale axis of a configuration and its two textual syntaxes:
//! directory qualifiers (`en-rUS`, `b+sr+Latn`) and filter strings (`en_US`).

use super::ConfigDescription;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Language, region, script and variant subtags. Empty strings mean "unset".
///
/// Field order is the comparison order: language, then region, script and
/// variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleValue {
    pub language: String,
    pub region: String,
    pub script: String,
    pub variant: String,
}

/// Signals a locale token that looked like a locale but was malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidLocale;

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_number(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && is_number(s))
}

impl LocaleValue {
    pub fn is_empty(&self) -> bool {
        self.language.is_empty()
            && self.region.is_empty()
            && self.script.is_empty()
            && self.variant.is_empty()
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_ascii_lowercase();
    }

    pub fn set_region(&mut self, region: &str) {
        self.region = region.to_ascii_uppercase();
    }

    /// Scripts are stored title-cased (`Latn`).
    pub fn set_script(&mut self, script: &str) {
        let mut out = String::with_capacity(script.len());
        for (i, c) in script.chars().enumerate() {
            if i == 0 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c.to_ascii_lowercase());
            }
        }
        self.script = out;
    }

    pub fn set_variant(&mut self, variant: &str) {
        self.variant = variant.to_ascii_lowercase();
    }

    /// Parses the filter syntax used by `-c`: underscore-separated subtags such
    /// as `en`, `en_US`, `sr_Latn_RS` or `de_DE_1901`.
    ///
    /// Returns `None` when the text is not a locale.
    pub fn from_filter_string(text: &str) -> Option<Self> {
        let parts: Vec<String> = text.split('_').map(|p| p.to_ascii_lowercase()).collect();
        let mut locale = LocaleValue::default();

        let lang = parts.first()?;
        if !(is_alpha(lang) && (lang.len() == 2 || lang.len() == 3)) {
            return None;
        }
        locale.set_language(lang);
        if parts.len() == 1 {
            return Some(locale);
        }

        let part2 = &parts[1];
        if is_region(part2) {
            locale.set_region(part2);
        } else if part2.len() == 4 && is_alpha(part2) {
            locale.set_script(part2);
        } else if (4..=8).contains(&part2.len()) {
            locale.set_variant(part2);
        } else {
            return None;
        }
        if parts.len() == 2 {
            return Some(locale);
        }

        let part3 = &parts[2];
        if is_region(part3) && !locale.script.is_empty() {
            locale.set_region(part3);
        } else if (4..=8).contains(&part3.len()) {
            locale.set_variant(part3);
        } else {
            return None;
        }
        if parts.len() == 3 {
            return Some(locale);
        }

        let part4 = &parts[3];
        if parts.len() > 4 || !(4..=8).contains(&part4.len()) {
            return None;
        }
        locale.set_variant(part4);
        Some(locale)
    }

    /// Reads a locale from the front of lowercased directory qualifier parts.
    ///
    /// Returns the locale and how many parts it consumed (zero when the first
    /// part is not a locale at all).
    pub(crate) fn from_qualifier_parts(parts: &[String]) -> Result<(Self, usize), InvalidLocale> {
        let mut locale = LocaleValue::default();
        let Some(part) = parts.first() else {
            return Ok((locale, 0));
        };

        if let Some(tag) = part.strip_prefix("b+") {
            // Modified BCP-47: subtags separated by '+'.
            let subtags: Vec<&str> = tag.split('+').collect();
            match subtags.as_slice() {
                [lang] => locale.set_language(lang),
                [lang, second] => {
                    locale.set_language(lang);
                    match second.len() {
                        2 | 3 => locale.set_region(second),
                        4 if second.starts_with(|c: char| c.is_ascii_digit()) => {
                            locale.set_variant(second)
                        }
                        4 => locale.set_script(second),
                        5..=8 => locale.set_variant(second),
                        _ => return Err(InvalidLocale),
                    }
                }
                [lang, second, third] => {
                    locale.set_language(lang);
                    match second.len() {
                        4 => locale.set_script(second),
                        2 | 3 => locale.set_region(second),
                        _ => return Err(InvalidLocale),
                    }
                    if third.len() >= 4 {
                        locale.set_variant(third);
                    } else {
                        locale.set_region(third);
                    }
                }
                [lang, script, region, variant] => {
                    locale.set_language(lang);
                    locale.set_script(script);
                    locale.set_region(region);
                    locale.set_variant(variant);
                }
                _ => return Err(InvalidLocale),
            }
            if locale.language.is_empty() {
                return Err(InvalidLocale);
            }
            return Ok((locale, 1));
        }

        // `car` is the UI mode, not a language.
        if (part.len() == 2 || part.len() == 3) && is_alpha(part) && part != "car" {
            locale.set_language(part);
            if let Some(region) = parts.get(1).and_then(|p| p.strip_prefix('r')) {
                if region.len() == 2 && is_alpha(region) {
                    locale.set_region(region);
                    return Ok((locale, 2));
                }
            }
            return Ok((locale, 1));
        }

        Ok((locale, 0))
    }

    /// Copies this locale into a configuration, replacing its locale axis.
    pub fn write_to(&self, config: &mut ConfigDescription) {
        config.locale = self.clone();
    }

    /// Whether the directory form needs the `b+` syntax. Numeric regions have
    /// no legacy spelling.
    fn needs_bcp47(&self) -> bool {
        !self.script.is_empty() || !self.variant.is_empty() || self.region.len() == 3
    }
}

impl fmt::Display for LocaleValue {
    /// Formats the locale as a directory qualifier.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.language.is_empty() {
            return Ok(());
        }
        if !self.needs_bcp47() {
            write!(f, "{}", self.language)?;
            if !self.region.is_empty() {
                write!(f, "-r{}", self.region)?;
            }
            return Ok(());
        }

        let mut tag = String::from("b+");
        tag.push_str(&self.language);
        for subtag in [&self.script, &self.region, &self.variant] {
            if !subtag.is_empty() {
                tag.push('+');
                tag.push_str(subtag);
            }
        }
        write!(f, "{}", tag)
    }
}

impl LocaleValue {
    /// The BCP-47 language tag (`en-US`, `sr-Latn-RS`).
    pub fn to_language_tag(&self) -> String {
        let mut parts = Vec::new();
        for subtag in [&self.language, &self.script, &self.region, &self.variant] {
            if !subtag.is_empty() {
                parts.push(subtag.to_string());
            }
        }
        parts.join("-")
    }
}
