// SPDX-License-Identifier: MIT OR Apache-2.0
use anchorage_core::config::{ConfigOverrides, PositioningConfig};
use anchorage_core::preference::PositionPreference;
use anyhow::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use smol::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Name of the settings file looked up in the XDG directories.
pub const SETTINGS_FILE: &str = "overlay.toml";

/// On-disk layout of [SETTINGS_FILE].
///
/// ```toml
/// [positioning]
/// viewport_margin = 8.0
///
/// [[preferences.tooltip]]
/// origin_x = "center"
/// origin_y = "bottom"
/// overlay_x = "center"
/// overlay_y = "top"
/// offset_y = 6.0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    /// Session-wide knobs.
    #[serde(default)]
    pub positioning: ConfigOverrides,
    /// Named preference lists, e.g. per widget kind.
    #[serde(default)]
    pub preferences: IndexMap<String, Vec<PositionPreference>>,
}

/// Registry for positioning settings layered from system and user files.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    overrides: ConfigOverrides,
    preferences: IndexMap<String, Vec<PositionPreference>>,
}

impl SettingsRegistry {
    /// Create a registry and load settings from the standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::default();
        registry.load().await?;
        Ok(registry)
    }

    /// Load settings from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/anchorage/overlay.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/anchorage/overlay.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/anchorage/overlay.toml (XDG_CONFIG_HOME)
    /// 4. `ANCHORAGE_*` environment variables
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix("anchorage")?;

        for path in xdg_dirs.find_data_files(SETTINGS_FILE).rev() {
            self.load_file(&path).await;
        }

        for path in xdg_dirs.find_config_files(SETTINGS_FILE).rev() {
            self.load_file(&path).await;
        }

        if let Some(user_config_path) = xdg_dirs.find_config_file(SETTINGS_FILE) {
            self.load_file(&user_config_path).await;
        } else {
            let user_config_path = xdg_dirs.get_config_home().join(SETTINGS_FILE);
            if user_config_path.exists() {
                self.load_file(&user_config_path).await;
            }
        }

        self.overrides.merge(ConfigOverrides::from_vars(std::env::vars()));
        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading overlay settings from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match toml::from_str::<SettingsFile>(&content) {
                Ok(loaded) => self.merge(loaded),
                Err(e) => {
                    log::error!("Failed to parse settings file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read settings file {:?}: {}", path, e);
            },
        }
    }

    /// Load settings from explicit paths, in order, reporting each result.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read settings file {:?}: {}", path, e))?;

                let loaded: SettingsFile = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse settings file {:?}: {}", path, e))?;

                self.merge(loaded);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Merge a loaded file into the current settings.
    pub fn merge(&mut self, other: SettingsFile) {
        self.overrides.merge(other.positioning);
        // Named lists are replaced wholesale; merging two priority orders has no sensible meaning.
        self.preferences.extend(other.preferences);
    }

    /// The effective configuration.
    ///
    /// Invalid merged values are logged and the defaults are used instead.
    pub fn config(&self) -> PositioningConfig {
        let mut config = PositioningConfig::default();
        self.overrides.apply_to(&mut config);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Ignoring invalid overlay settings: {}", e);
                PositioningConfig::default()
            },
        }
    }

    /// The named preference list, if one was configured.
    pub fn preferences(&self, name: &str) -> Option<&[PositionPreference]> {
        self.preferences.get(name).map(Vec::as_slice)
    }

    /// The named preference list, or `fallback` when none was configured.
    pub fn preferences_or(&self, name: &str, fallback: Vec<PositionPreference>) -> Vec<PositionPreference> {
        self.preferences(name).map(<[_]>::to_vec).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorage_core::preference::presets;

    #[test]
    fn test_merge_later_file_wins() {
        let mut registry = SettingsRegistry::default();
        registry.merge(
            toml::from_str(
                r#"
                [positioning]
                viewport_margin = 4.0
                can_push = false
                "#,
            )
            .unwrap(),
        );
        registry.merge(
            toml::from_str(
                r#"
                [positioning]
                can_push = true
                "#,
            )
            .unwrap(),
        );

        let config = registry.config();
        assert_eq!(config.viewport_margin, 4.0);
        assert!(config.can_push, "Later file should re-enable push");
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let mut registry = SettingsRegistry::default();
        registry.merge(toml::from_str("[positioning]\nviewport_margin = -3.0\n").unwrap());
        assert_eq!(registry.config(), PositioningConfig::default());
    }

    #[test]
    fn test_named_preferences_replace_fallback() {
        let mut registry = SettingsRegistry::default();
        assert_eq!(registry.preferences_or("menu", presets::menu()), presets::menu());

        registry.merge(
            toml::from_str(
                r#"
                [[preferences.menu]]
                origin_x = "end"
                origin_y = "bottom"
                overlay_x = "end"
                overlay_y = "top"
                "#,
            )
            .unwrap(),
        );
        let menu = registry.preferences("menu").unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0], presets::menu()[2]);
    }
}
