//! Persisted preferences for the onboarding wizard.
//!
//! Stored as TOML in the platform config directory. Every section has
//! defaults, so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use onboard_layout::PackOptions;
use onboard_map::ConfidenceThresholds;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardSettings {
    /// Grid packing.
    pub layout: PackOptions,

    /// Confidence band thresholds used when grouping mappings for display.
    pub mapping: ConfidenceThresholds,

    pub widgets: WidgetSettings,

    pub dashboard: DashboardSettings,
}

impl OnboardSettings {
    /// Default settings file location, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "Onboard", "dashboard-onboard")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields defaults. An unreadable or invalid file is
    /// logged and also yields defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "ignoring settings file");
                Self::default()
            }
        }
    }

    /// Load and validate settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_error)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.layout.cols == 0 {
            return Err(SettingsError::Invalid("layout.cols must be at least 1"));
        }
        if self.layout.max_rows == 0 {
            return Err(SettingsError::Invalid("layout.max_rows must be at least 1"));
        }
        if !self.mapping.is_valid() {
            return Err(SettingsError::Invalid(
                "mapping thresholds must be in [0, 1] with low <= medium <= high",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Also auto-select widgets whose compatibility is `near_miss`.
    pub auto_select_near_miss: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Name used when a submission does not provide one.
    pub default_name: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_name: "New dashboard".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: OnboardSettings = toml::from_str("[layout]\ncols = 24\n").unwrap();
        assert_eq!(settings.layout.cols, 24);
        assert_eq!(settings.layout.max_rows, 100);
        assert_eq!(settings.dashboard.default_name, "New dashboard");
        assert!(!settings.widgets.auto_select_near_miss);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn unordered_thresholds_are_invalid() {
        let settings: OnboardSettings =
            toml::from_str("[mapping]\nhigh = 0.5\nmedium = 0.8\nlow = 0.1\n").unwrap();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn zero_width_grid_is_invalid() {
        let mut settings = OnboardSettings::default();
        settings.layout.cols = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("onboard-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");
        let mut settings = OnboardSettings::default();
        settings.widgets.auto_select_near_miss = true;
        settings.dashboard.default_name = "Sales".to_string();

        settings.save_to(&path).unwrap();
        let loaded = OnboardSettings::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("onboard-settings-does-not-exist.toml");
        assert!(matches!(
            OnboardSettings::load_from(&path),
            Err(SettingsError::Read { .. })
        ));
    }
}
