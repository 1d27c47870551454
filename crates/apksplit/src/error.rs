// crates/apksplit/src/error.rs

use alloc::string::String;

/// A qualifier string that is not a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration '{text}'")]
pub struct ParseConfigError {
    pub text: String,
}

/// Errors raised while interpreting command-line style parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The preferred density did not parse as a configuration.
    #[error("invalid density '{arg}' for --preferred-density option")]
    InvalidDensity { arg: String },

    /// The preferred density parsed, but sets axes other than density.
    #[error("invalid preferred density '{arg}'. Preferred density must only be a density value")]
    NotDensityOnly { arg: String },

    /// A split parameter did not have exactly one path and one config list.
    #[error(
        "invalid split parameter '{arg}' (should be --split path/to/output.apk{separator}<config>[,<config>...])"
    )]
    MalformedSplit { arg: String, separator: char },

    /// A config token inside a split parameter did not parse.
    #[error("invalid config '{token}' in split parameter '{arg}'")]
    InvalidConfig { token: String, arg: String },

    /// A `-c` filter token is neither a locale nor a configuration.
    #[error("invalid config '{token}' for -c option")]
    InvalidFilterConfig { token: String },
}

/// Non-fatal policy findings. These are reported, never returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamWarning {
    /// Density belongs to `--preferred-density`, not to the config filter.
    #[error("ignoring density '{config}' for -c option")]
    DensityIgnoredInFilter { config: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_split_error_carries_usage_hint() {
        let err = ParamError::MalformedSplit {
            arg: "bad".into(),
            separator: ':',
        };
        let msg = err.to_string();
        assert!(msg.contains("'bad'"));
        assert!(msg.contains("path/to/output.apk:<config>"));
    }

    #[test]
    fn test_invalid_config_names_token_and_arg() {
        let err = ParamError::InvalidConfig {
            token: "zz-foo".into(),
            arg: "out.apk:zz-foo".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config 'zz-foo' in split parameter 'out.apk:zz-foo'"
        );
    }
}
