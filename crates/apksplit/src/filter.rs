// crates/apksplit/src/filter.rs

//! Configuration filters built from `-c` arguments.

use crate::config::{ConfigAxes, ConfigDescription, LocaleValue};
use crate::diag::{DiagMessage, Diagnostics};
use crate::error::{ParamError, ParamWarning};
use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::Debug;

/// Decides whether a resource configuration is kept.
pub trait ConfigFilter: Debug + Send + Sync {
    fn matches(&self, config: &ConfigDescription) -> bool;
}

/// Keeps a configuration when, on every axis the filter constrains, it equals
/// one of the configurations added for that axis.
///
/// Axes the filter never mentions are not constrained. A candidate that sets
/// none of the constrained axes always matches.
#[derive(Debug, Clone, Default)]
pub struct AxisConfigFilter {
    configs: Vec<(ConfigDescription, ConfigAxes)>,
    config_mask: ConfigAxes,
}

impl AxisConfigFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_config(&mut self, config: ConfigDescription) {
        let mut mask = ConfigDescription::default_config().diff(&config);

        // The version axis is never filtered.
        mask.remove(ConfigAxes::VERSION);

        if mask.contains(ConfigAxes::DENSITY) {
            log::warn!("ignoring density axis of filter config '{}'", config);
            mask.remove(ConfigAxes::DENSITY);
        }

        self.config_mask |= mask;
        self.configs.push((config, mask));
    }

    /// The union of every axis the filter constrains.
    pub fn axes(&self) -> ConfigAxes {
        self.config_mask
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl ConfigFilter for AxisConfigFilter {
    fn matches(&self, config: &ConfigDescription) -> bool {
        let mask = ConfigDescription::default_config().diff(config);
        let relevant = self.config_mask & mask;
        if relevant.is_empty() {
            // The candidate sets none of the axes this filter constrains.
            return true;
        }

        let mut matched = ConfigAxes::empty();
        for (target, target_mask) in &self.configs {
            // Only the entry's own axes count; the candidate may set others.
            let diff = target.diff(config) & *target_mask;
            if diff.is_empty() {
                matched |= *target_mask;
            } else if diff == ConfigAxes::LOCALE
                && target.locale.language == config.locale.language
                && target.locale.region.is_empty()
            {
                // `en` keeps `en-rUS`.
                matched |= ConfigAxes::LOCALE;
            } else if diff == ConfigAxes::SMALLEST_SCREEN_SIZE
                && config.smallest_screen_width_dp != 0
                && config.smallest_screen_width_dp < target.smallest_screen_width_dp
            {
                matched |= ConfigAxes::SMALLEST_SCREEN_SIZE;
            }
        }
        matched == relevant
    }
}

/// Builds a filter from `-c` arguments, each a comma-separated list of locale
/// filter strings or configuration qualifiers.
///
/// Density qualifiers are reported and skipped. The first token that is
/// neither a locale nor a configuration aborts the build.
pub fn parse_config_filter_parameters<S: AsRef<str>>(
    args: &[S],
    diag: &mut dyn Diagnostics,
) -> Result<Box<dyn ConfigFilter>, ParamError> {
    let mut filter = AxisConfigFilter::new();

    for arg in args {
        for token in arg.as_ref().split(',') {
            let config = match LocaleValue::from_filter_string(token) {
                Some(locale) => {
                    let mut config = ConfigDescription::default();
                    locale.write_to(&mut config);
                    config
                }
                None => match ConfigDescription::parse(token) {
                    Ok(config) => config,
                    Err(_) => {
                        let err = ParamError::InvalidFilterConfig {
                            token: token.to_string(),
                        };
                        diag.error(DiagMessage::new(err.to_string()));
                        return Err(err);
                    }
                },
            };

            if config.density != 0 {
                let warning = ParamWarning::DensityIgnoredInFilter {
                    config: config.to_string(),
                };
                diag.warn(DiagMessage::new(warning.to_string()));
                continue;
            }

            filter.add_config(config);
        }
    }

    log::debug!("config filter constrains {:?}", filter.axes());
    Ok(Box::new(filter))
}
