// crates/apksplit/src/density.rs

use crate::config::{ConfigAxes, ConfigDescription};
use crate::diag::{DiagMessage, Diagnostics};
use crate::error::ParamError;
use alloc::string::ToString;

/// Resolves a `--preferred-density` argument to its density value.
///
/// The argument must name a density and nothing else. The platform version
/// the parser adds for density qualifiers is ignored.
pub fn parse_target_density_parameter(
    arg: &str,
    diag: &mut dyn Diagnostics,
) -> Result<u16, ParamError> {
    let mut config = match ConfigDescription::parse(arg) {
        Ok(config) => config,
        Err(_) => {
            let err = ParamError::InvalidDensity {
                arg: arg.to_string(),
            };
            diag.error(DiagMessage::new(err.to_string()));
            return Err(err);
        }
    };

    config.sdk_version = 0;
    if config.diff(ConfigDescription::default_config()) != ConfigAxes::DENSITY {
        let err = ParamError::NotDensityOnly {
            arg: arg.to_string(),
        };
        diag.error(DiagMessage::new(err.to_string()));
        return Err(err);
    }

    log::debug!("preferred density '{}' resolved to {}", arg, config.density);
    Ok(config.density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DENSITY_HIGH, DENSITY_XHIGH};
    use crate::diag::CollectingDiagnostics;

    #[test]
    fn test_named_density() {
        let mut diag = CollectingDiagnostics::new();
        assert_eq!(
            parse_target_density_parameter("xhdpi", &mut diag),
            Ok(DENSITY_XHIGH)
        );
        assert!(diag.is_empty());
    }

    #[test]
    fn test_explicit_version_is_ignored() {
        let mut diag = CollectingDiagnostics::new();
        assert_eq!(
            parse_target_density_parameter("hdpi-v21", &mut diag),
            Ok(DENSITY_HIGH)
        );
    }

    #[test]
    fn test_numeric_density() {
        let mut diag = CollectingDiagnostics::new();
        assert_eq!(parse_target_density_parameter("420dpi", &mut diag), Ok(420));
    }

    #[test]
    fn test_other_axis_rejected() {
        let mut diag = CollectingDiagnostics::new();
        let err = parse_target_density_parameter("en-xhdpi", &mut diag).unwrap_err();
        assert!(matches!(err, ParamError::NotDensityOnly { .. }));
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn test_no_density_rejected() {
        let mut diag = CollectingDiagnostics::new();
        let err = parse_target_density_parameter("land", &mut diag).unwrap_err();
        assert!(matches!(err, ParamError::NotDensityOnly { .. }));
    }

    #[test]
    fn test_garbage_rejected() {
        let mut diag = CollectingDiagnostics::new();
        let err = parse_target_density_parameter("fuzzy", &mut diag).unwrap_err();
        assert_eq!(
            err,
            ParamError::InvalidDensity {
                arg: "fuzzy".into()
            }
        );
        assert_eq!(diag.error_count(), 1);
    }
}
