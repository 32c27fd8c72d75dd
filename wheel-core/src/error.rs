//! Error types for wheel operations and configuration loading.

use std::path::PathBuf;

/// Usage errors reported by [`crate::wheel::Wheel`] and
/// [`crate::roll::RollSession`].
///
/// Every operation that returns one of these leaves the wheel untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WheelError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("expected {expected} morph targets for the selected markers, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("wheel has no markers to select")]
    NoMarkers,

    #[error("marker index {index} is out of range for {len} markers")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("marker index {0} is selected more than once")]
    DuplicateIndex(usize),

    #[error("pivot at ({x}, {y}) coincides with the wheel center")]
    DegeneratePivot { x: f32, y: f32 },

    #[error("roll progress must lie in [0, 1] and never decrease, got {progress} after {last}")]
    InvalidProgress { progress: f32, last: f32 },

    #[error("roll session is no longer active on this wheel")]
    StaleRoll,

    #[error("roll session belongs to a different wheel")]
    ForeignRoll,
}

/// Errors raised while loading a [`crate::config::Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(pub String);
