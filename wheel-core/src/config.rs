use crate::{error::ConfigError, types::Color};
use serde::Deserialize;
use std::{fs, path::Path};

/// Tunables shared by the core and whatever drives it.
///
/// Every field has a default, so a TOML file only needs to list the
/// values it overrides:
///
/// ```toml
/// radius = 1.5
/// wheel_color = "#83C167"
/// roll_duration = 4.0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Radius of newly created wheels.
    pub radius: f32,
    pub wheel_color: Color,
    /// Default color of markers placed without an explicit color.
    pub marker_color: Color,
    /// Seconds one roll takes when driven in real time.
    pub roll_duration: f32,
    /// Minimum distance between two recorded points of a path trace.
    pub trace_min_step: f32,
    /// Number of dashes drawn on the rim; `None` means `14 * radius`.
    pub dash_count: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: 1.0,
            wheel_color: Color::BLUE,
            marker_color: Color::RED,
            roll_duration: 2.0,
            trace_min_step: 0.02,
            dash_count: None,
        }
    }
}

impl Config {
    /// Number of rim dashes, at least one.
    pub fn dashes(&self) -> u32 {
        self.dash_count
            .unwrap_or((14.0 * self.radius) as u32)
            .max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.roll_duration.is_finite() && self.roll_duration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "roll_duration must be positive, got {}",
                self.roll_duration
            )));
        }
        if !(self.trace_min_step.is_finite() && self.trace_min_step >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "trace_min_step must be non-negative, got {}",
                self.trace_min_step
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Loads `path`, falling back to [`Config::default`] on any error.
    ///
    /// The error is handed back so the caller can decide whether a
    /// missing file is worth reporting.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dashes(), 14);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg = Config::from_toml_str(
            r##"
            radius = 2.5
            wheel_color = "#83C167"
            dash_count = 30
            "##,
        )
        .unwrap();

        assert_eq!(cfg.radius, 2.5);
        assert_eq!(cfg.wheel_color, Color::GREEN);
        assert_eq!(cfg.dashes(), 30);
        // Untouched fields come from Default.
        assert_eq!(cfg.marker_color, Config::default().marker_color);
        assert_eq!(cfg.roll_duration, Config::default().roll_duration);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let err = Config::from_toml_str("radius = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("radius = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_color_is_a_parse_error() {
        let err = Config::from_toml_str(r##"marker_color = "#nope""##).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = Config::load_or_default("this/file/does/not/exist.toml");
        assert!(matches!(err, Some(ConfigError::Io { .. })));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_file_reads_toml() {
        let path = std::env::temp_dir().join(format!("wheel-core-cfg-{}.toml", std::process::id()));
        fs::write(&path, "roll_duration = 5.0\ntrace_min_step = 0.0\n").unwrap();

        let cfg = Config::load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(cfg.roll_duration, 5.0);
        assert_eq!(cfg.trace_min_step, 0.0);
    }
}
