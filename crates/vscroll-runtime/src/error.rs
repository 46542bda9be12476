#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("index {index} out of range for list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from building or loading a [`ScrollerConfig`](crate::ScrollerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scroller config: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Validation messages, if this is a validation failure.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
