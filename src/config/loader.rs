//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use awning_control::load_config;
///
/// let config = load_config("awning.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// Persisted awning values are clamped into range after parsing.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let mut config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    config.awning = config.awning.clamped();

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn test_parse_awning_table() {
        let toml = r#"
[awning]
travel_time_ms = 22000
position_percent = 40.0
wind_threshold_ppm = 250
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.awning.travel_time_ms, 22_000);
        assert_eq!(config.awning.position, 40.0);
        assert_eq!(config.awning.wind_threshold, 250);
    }

    #[test]
    fn test_parse_clamps_out_of_range_state() {
        let toml = r#"
[awning]
travel_time_ms = 1000
position_percent = -3.0
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.awning.travel_time_ms, 5_000);
        assert_eq!(config.awning.position, 0.0);
    }

    #[test]
    fn test_parse_rejects_zero_pulse() {
        let toml = r#"
[timing]
start_pulse_ms = 0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidPulseDuration(0)))
        ));
    }

    #[test]
    fn test_parse_error_reported() {
        let result = parse_config("[awning\ntravel_time_ms = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
