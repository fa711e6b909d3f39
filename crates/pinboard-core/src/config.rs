#![forbid(unsafe_code)]

//! Editor configuration as data.
//!
//! Every tunable of the editor lives in one [`EditorConfig`] that can be loaded
//! from TOML or JSON at startup.
//!
//! ```toml
//! # pinboard.toml
//! [interaction]
//! tap_threshold_ms = 200
//!
//! [pinned]
//! slots_per_page = 36
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::from_toml_file("pinboard.toml")?;
//! ```
//!
//! Missing sections and fields take their defaults, so
//! `EditorConfig::default()` and an empty file behave the same.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::gesture::GestureConfig;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub interaction: InteractionPolicyConfig,
    pub catalog: CatalogPolicyConfig,
    pub pinned: PinnedPolicyConfig,
}

/// Gesture thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionPolicyConfig {
    /// Touches shorter than this without movement are taps.
    pub tap_threshold_ms: u64,
    /// Pixels a touch may wander before it counts as moved; 0 counts any move.
    pub move_tolerance_px: u32,
}

impl Default for InteractionPolicyConfig {
    fn default() -> Self {
        let gesture = GestureConfig::default();
        Self {
            tap_threshold_ms: gesture.tap_threshold.as_millis() as u64,
            move_tolerance_px: gesture.move_tolerance,
        }
    }
}

/// Catalog paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPolicyConfig {
    pub page_size: usize,
    /// Page buttons shown in the catalog pager.
    pub pager_window: usize,
}

impl Default for CatalogPolicyConfig {
    fn default() -> Self {
        Self {
            page_size: 36,
            pager_window: 9,
        }
    }
}

/// Pinned-slot panel paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinnedPolicyConfig {
    pub slots_per_page: usize,
    /// Page buttons shown in the slot pager.
    pub pager_window: usize,
}

impl Default for PinnedPolicyConfig {
    fn default() -> Self {
        Self {
            slots_per_page: 36,
            pager_window: 10,
        }
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl EditorConfig {
    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk and validate.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.interaction.tap_threshold_ms == 0 {
            errors.push("interaction.tap_threshold_ms must be > 0".into());
        }
        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be > 0".into());
        }
        if self.catalog.pager_window == 0 {
            errors.push("catalog.pager_window must be > 0".into());
        }
        if self.pinned.slots_per_page == 0 {
            errors.push("pinned.slots_per_page must be > 0".into());
        }
        if self.pinned.pager_window == 0 {
            errors.push("pinned.pager_window must be > 0".into());
        }

        errors
    }

    /// Build a [`GestureConfig`] from this configuration.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            tap_threshold: Duration::from_millis(self.interaction.tap_threshold_ms),
            move_tolerance: self.interaction.move_tolerance_px,
        }
    }
}
