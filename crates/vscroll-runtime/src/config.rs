#![forbid(unsafe_code)]

//! Tunables for the windowing engine and the scroller facade.
//!
//! Every field has a default, so `ScrollerConfig::default()` is a working
//! configuration. With the `config-file` feature the same struct loads from
//! TOML or JSON; missing keys keep their defaults.
//!
//! ```toml
//! # vscroll.toml
//! assumed_item_height = 56.0
//! offscreen_to_viewport_ratio = 2.0
//! near_end_proximity_ratio = 3.0
//! ```
//!
//! ```rust,ignore
//! let config = ScrollerConfig::from_toml_file("vscroll.toml")?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};
use vscroll_core::throttle::DEFAULT_SCROLL_THROTTLE;

use crate::error::ConfigError;

/// Engine and facade configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ScrollerConfig {
    /// Height used for items that have not been measured yet.
    pub assumed_item_height: f64,

    /// Render-window buffer above and below the viewport, in viewport heights.
    pub offscreen_to_viewport_ratio: f64,

    /// `NearStart` zone extent, in viewport heights.
    pub near_start_proximity_ratio: f64,

    /// `NearEnd` zone extent, in viewport heights.
    pub near_end_proximity_ratio: f64,

    /// `AtStart` / `AtEnd` zone extent, in pixels.
    pub edge_distance: f64,

    /// Minimum spacing between scroll-driven slice updates.
    pub scroll_throttle_ms: u64,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            assumed_item_height: 40.0,
            offscreen_to_viewport_ratio: 1.8,
            near_start_proximity_ratio: 0.25,
            near_end_proximity_ratio: 1.75,
            edge_distance: 5.0,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE.as_millis() as u64,
        }
    }
}

impl ScrollerConfig {
    #[must_use]
    pub fn with_assumed_item_height(mut self, height: f64) -> Self {
        self.assumed_item_height = height;
        self
    }

    #[must_use]
    pub fn with_offscreen_ratio(mut self, ratio: f64) -> Self {
        self.offscreen_to_viewport_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_proximity_ratios(mut self, near_start: f64, near_end: f64) -> Self {
        self.near_start_proximity_ratio = near_start;
        self.near_end_proximity_ratio = near_end;
        self
    }

    #[must_use]
    pub fn with_edge_distance(mut self, distance: f64) -> Self {
        self.edge_distance = distance;
        self
    }

    #[must_use]
    pub fn with_scroll_throttle(mut self, interval: Duration) -> Self {
        self.scroll_throttle_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Scroll throttle interval.
    #[must_use]
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    /// Validate all parameters.
    ///
    /// Returns every violation found; an empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.assumed_item_height.is_finite() && self.assumed_item_height > 0.0) {
            errors.push(format!(
                "assumed_item_height must be finite and > 0, got {}",
                self.assumed_item_height
            ));
        }

        for (name, value) in [
            ("offscreen_to_viewport_ratio", self.offscreen_to_viewport_ratio),
            ("near_start_proximity_ratio", self.near_start_proximity_ratio),
            ("near_end_proximity_ratio", self.near_end_proximity_ratio),
            ("edge_distance", self.edge_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        errors
    }

    /// `self` if valid, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load and validate from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)?.validated()
    }

    /// Load and validate from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load and validate from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)?.validated()
    }

    /// Load and validate from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
