// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Positioning Configuration
//!
//! [PositioningConfig] carries the session-wide knobs: the viewport margin,
//! default offsets and the fallback behaviour. It can be built in code,
//! loaded from TOML, or overridden through environment variables.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults ([PositioningConfig::default])
//! 2. The file named by `ANCHORAGE_CONFIG`
//! 3. Individual environment variables
//!
//! ## Environment Variables
//!
//! - `ANCHORAGE_CONFIG`: Path to a TOML configuration file
//! - `ANCHORAGE_VIEWPORT_MARGIN`: Viewport margin in pixels
//! - `ANCHORAGE_OFFSET_X` / `ANCHORAGE_OFFSET_Y`: Default offsets
//! - `ANCHORAGE_CAN_PUSH`: `true`/`false`
//! - `ANCHORAGE_LOCK_POSITION`: `true`/`false`
//! - `ANCHORAGE_TRANSFORM_ORIGIN`: `true`/`false`
//!
//! ## File Format
//!
//! ```toml
//! [positioning]
//! viewport_margin = 8.0
//! default_offset_y = 4.0
//! can_push = true
//! ```

use std::env;
use std::fs;
use std::path::Path;

use nalgebra::Vector2;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Default distance kept between an overlay and the screen edge.
pub const DEFAULT_VIEWPORT_MARGIN: f64 = 8.0;

/// Settings shared by every placement a session makes.
#[derive(Debug, Clone, PartialEq)]
pub struct PositioningConfig {
    /// Inset applied to the viewport on all four sides.
    pub viewport_margin: f64,
    /// Horizontal offset for preferences that don't set one.
    pub default_offset_x: f64,
    /// Vertical offset for preferences that don't set one.
    pub default_offset_y: f64,
    /// Clamp the overlay into the viewport when no preference fits.
    pub can_push: bool,
    /// After the first placement, keep reusing its preference on `apply`.
    pub lock_position: bool,
    /// Emit a `transform-origin` matching the overlay anchor.
    pub transform_origin: bool,
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            default_offset_x: 0.0,
            default_offset_y: 0.0,
            can_push: true,
            lock_position: false,
            transform_origin: false,
        }
    }
}

/// A partial configuration; unset fields leave the base value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOverrides {
    /// See [PositioningConfig::viewport_margin].
    pub viewport_margin: Option<f64>,
    /// See [PositioningConfig::default_offset_x].
    pub default_offset_x: Option<f64>,
    /// See [PositioningConfig::default_offset_y].
    pub default_offset_y: Option<f64>,
    /// See [PositioningConfig::can_push].
    pub can_push: Option<bool>,
    /// See [PositioningConfig::lock_position].
    pub lock_position: Option<bool>,
    /// See [PositioningConfig::transform_origin].
    pub transform_origin: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    positioning: ConfigOverrides,
}

impl ConfigOverrides {
    /// Parse the `[positioning]` table of a TOML document.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.positioning)
    }

    /// Collect overrides from `ANCHORAGE_*` key/value pairs.
    ///
    /// Unparseable values are logged and skipped.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                "ANCHORAGE_VIEWPORT_MARGIN" => overrides.viewport_margin = parse_var(key, value),
                "ANCHORAGE_OFFSET_X" => overrides.default_offset_x = parse_var(key, value),
                "ANCHORAGE_OFFSET_Y" => overrides.default_offset_y = parse_var(key, value),
                "ANCHORAGE_CAN_PUSH" => overrides.can_push = parse_var(key, value),
                "ANCHORAGE_LOCK_POSITION" => overrides.lock_position = parse_var(key, value),
                "ANCHORAGE_TRANSFORM_ORIGIN" => overrides.transform_origin = parse_var(key, value),
                _ => {},
            }
        }
        overrides
    }

    /// Combine with `other`, whose set fields win.
    pub fn merge(&mut self, other: ConfigOverrides) {
        if other.viewport_margin.is_some() {
            self.viewport_margin = other.viewport_margin;
        }
        if other.default_offset_x.is_some() {
            self.default_offset_x = other.default_offset_x;
        }
        if other.default_offset_y.is_some() {
            self.default_offset_y = other.default_offset_y;
        }
        if other.can_push.is_some() {
            self.can_push = other.can_push;
        }
        if other.lock_position.is_some() {
            self.lock_position = other.lock_position;
        }
        if other.transform_origin.is_some() {
            self.transform_origin = other.transform_origin;
        }
    }

    /// Write the set fields onto `config`.
    pub fn apply_to(&self, config: &mut PositioningConfig) {
        if let Some(margin) = self.viewport_margin {
            config.viewport_margin = margin;
        }
        if let Some(x) = self.default_offset_x {
            config.default_offset_x = x;
        }
        if let Some(y) = self.default_offset_y {
            config.default_offset_y = y;
        }
        if let Some(can_push) = self.can_push {
            config.can_push = can_push;
        }
        if let Some(lock) = self.lock_position {
            config.lock_position = lock;
        }
        if let Some(transform_origin) = self.transform_origin {
            config.transform_origin = transform_origin;
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", key, value);
            None
        },
    }
}

impl PositioningConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from TOML content, on top of the defaults.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let mut config = Self::default();
        ConfigOverrides::from_toml(content)?.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, on top of the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Build from `ANCHORAGE_CONFIG` and `ANCHORAGE_*` variables, falling back to defaults.
    ///
    /// Invalid files or values are logged and ignored.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("ANCHORAGE_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Failed to load positioning config {:?}: {}", path, e),
            }
        }

        let mut candidate = config.clone();
        ConfigOverrides::from_vars(env::vars()).apply_to(&mut candidate);
        match candidate.validate() {
            Ok(()) => candidate,
            Err(e) => {
                log::warn!("Ignoring positioning environment overrides: {}", e);
                config
            },
        }
    }

    /// Set the viewport margin.
    pub fn with_viewport_margin(mut self, margin: f64) -> Self {
        self.viewport_margin = margin;
        self
    }

    /// Set the default offsets.
    pub fn with_default_offset(mut self, x: f64, y: f64) -> Self {
        self.default_offset_x = x;
        self.default_offset_y = y;
        self
    }

    /// Enable or disable pushing.
    pub fn with_push(mut self, can_push: bool) -> Self {
        self.can_push = can_push;
        self
    }

    /// Enable or disable position locking.
    pub fn with_locked_position(mut self, lock: bool) -> Self {
        self.lock_position = lock;
        self
    }

    /// Enable or disable `transform-origin` output.
    pub fn with_transform_origin(mut self, enabled: bool) -> Self {
        self.transform_origin = enabled;
        self
    }

    /// The default offsets as a vector.
    pub fn default_offset(&self) -> Vector2<f64> {
        Vector2::new(self.default_offset_x, self.default_offset_y)
    }

    /// Reject values the engine can't work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.viewport_margin.is_finite() || self.viewport_margin < 0.0 {
            return Err(ConfigError::invalid(
                "viewport_margin",
                format!("must be a non-negative number, got {}", self.viewport_margin),
            ));
        }
        if !self.default_offset_x.is_finite() {
            return Err(ConfigError::invalid("default_offset_x", "must be finite"));
        }
        if !self.default_offset_y.is_finite() {
            return Err(ConfigError::invalid("default_offset_y", "must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PositioningConfig::new();
        assert_eq!(config.viewport_margin, 8.0);
        assert!(config.can_push);
        assert!(!config.lock_position);
        assert_eq!(config.default_offset(), Vector2::zeros());
    }

    #[test]
    fn test_from_toml_overrides_only_given_fields() {
        let config = PositioningConfig::from_toml(
            r#"
            [positioning]
            viewport_margin = 12.0
            default_offset_y = 4.0
            can_push = false
            "#,
        )
        .unwrap();
        assert_eq!(config.viewport_margin, 12.0);
        assert_eq!(config.default_offset_x, 0.0);
        assert_eq!(config.default_offset_y, 4.0);
        assert!(!config.can_push);
        assert!(!config.transform_origin);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(PositioningConfig::from_toml("").unwrap(), PositioningConfig::default());
    }

    #[test]
    fn test_negative_margin_is_rejected() {
        let err = PositioningConfig::from_toml("[positioning]\nviewport_margin = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "viewport_margin", .. }));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = PositioningConfig::from_toml("[positioning\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = PositioningConfig::from_file("/nonexistent/anchorage/overlay.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_overrides_from_vars() {
        let overrides = ConfigOverrides::from_vars([
            ("ANCHORAGE_VIEWPORT_MARGIN", "16"),
            ("ANCHORAGE_CAN_PUSH", "false"),
            ("ANCHORAGE_OFFSET_Y", "not-a-number"),
            ("PATH", "/usr/bin"),
        ]);
        assert_eq!(overrides.viewport_margin, Some(16.0));
        assert_eq!(overrides.can_push, Some(false));
        assert_eq!(overrides.default_offset_y, None);

        let mut config = PositioningConfig::default();
        overrides.apply_to(&mut config);
        assert_eq!(config.viewport_margin, 16.0);
        assert!(!config.can_push);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base = ConfigOverrides {
            viewport_margin: Some(4.0),
            can_push: Some(true),
            ..Default::default()
        };
        base.merge(ConfigOverrides {
            can_push: Some(false),
            lock_position: Some(true),
            ..Default::default()
        });
        assert_eq!(base.viewport_margin, Some(4.0));
        assert_eq!(base.can_push, Some(false));
        assert_eq!(base.lock_position, Some(true));
    }
}
