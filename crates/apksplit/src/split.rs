// crates/apksplit/src/split.rs

//! Split groups: which configurations go into which output artifact.

use crate::config::ConfigDescription;
use crate::diag::{DiagMessage, Diagnostics};
use crate::error::ParamError;
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The set of configurations targeted by one split artifact.
///
/// Iteration order is the configuration ordering, so the derived split name
/// is stable regardless of the order configurations were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SplitConstraints {
    configs: BTreeSet<ConfigDescription>,
}

impl SplitConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configs(&self) -> impl Iterator<Item = &ConfigDescription> {
        self.configs.iter()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn contains(&self, config: &ConfigDescription) -> bool {
        self.configs.contains(config)
    }

    /// The configurations joined by `_`, e.g. `en_fr-rCA`.
    pub fn joined_name(&self) -> String {
        self.configs
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl FromIterator<ConfigDescription> for SplitConstraints {
    fn from_iter<I: IntoIterator<Item = ConfigDescription>>(iter: I) -> Self {
        Self {
            configs: iter.into_iter().collect(),
        }
    }
}

/// Settings for split parameter parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Separates the output path from the config list. Hosts that use `:` in
    /// paths should pick `;`.
    pub separator: char,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self { separator: ':' }
    }
}

/// A parsed `--split` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitParameter {
    pub output_path: String,
    pub constraints: SplitConstraints,
}

/// Parses `path/to/output.apk<sep><config>[,<config>...]`.
pub fn parse_split_parameter(
    arg: &str,
    options: &SplitOptions,
    diag: &mut dyn Diagnostics,
) -> Result<SplitParameter, ParamError> {
    let parts: Vec<&str> = arg.split(options.separator).collect();
    let [output_path, config_list] = parts.as_slice() else {
        let err = ParamError::MalformedSplit {
            arg: arg.to_string(),
            separator: options.separator,
        };
        diag.error(DiagMessage::new(format!("invalid split parameter '{}'", arg)));
        diag.note(DiagMessage::new(format!(
            "should be --split path/to/output.apk{}<config>[,<config>...].",
            options.separator
        )));
        return Err(err);
    };

    let mut configs = BTreeSet::new();
    for token in config_list.split(',') {
        match ConfigDescription::parse(token) {
            Ok(config) => {
                configs.insert(config);
            }
            Err(_) => {
                let err = ParamError::InvalidConfig {
                    token: token.to_string(),
                    arg: arg.to_string(),
                };
                diag.error(DiagMessage::new(err.to_string()));
                return Err(err);
            }
        }
    }

    let constraints = SplitConstraints { configs };
    log::debug!(
        "split '{}' targets [{}]",
        output_path,
        constraints.joined_name()
    );
    Ok(SplitParameter {
        output_path: output_path.to_string(),
        constraints,
    })
}

/// Strips the platform version from every configuration that the minimum
/// SDK already guarantees. Returns a new sequence parallel to `splits`.
pub fn adjust_split_constraints_for_min_sdk(
    min_sdk: i32,
    splits: &[SplitConstraints],
) -> Vec<SplitConstraints> {
    splits
        .iter()
        .map(|split| {
            split
                .configs()
                .map(|config| {
                    if i32::from(config.sdk_version) <= min_sdk {
                        config.without_sdk_version()
                    } else {
                        config.clone()
                    }
                })
                .collect::<SplitConstraints>()
        })
        .collect()
}
