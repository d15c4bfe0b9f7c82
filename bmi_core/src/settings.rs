//! # Application Settings
//!
//! User preferences shared by the GUI and CLI, stored as pretty-printed
//! JSON. A missing settings file is not an error: defaults apply until the
//! first save.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "theme": "dark",
//!   "convention": "standard",
//!   "data_dir": ".",
//!   "updated_at": "2026-10-16T09:30:00Z"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use bmi_core::settings::{settings_path, AppSettings, ThemeMode};
//!
//! let path = settings_path();
//! let mut settings = AppSettings::load_or_default(&path);
//! settings.theme = ThemeMode::Light;
//! settings.save(&path)?;
//! # Ok::<(), bmi_core::errors::CalcError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bmi::CategoryConvention;
use crate::errors::{CalcError, CalcResult};
use crate::record_store::write_atomic;

/// Current schema version for settings files
pub const SETTINGS_VERSION: &str = "0.1.0";

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "BMI_SETTINGS";

/// Settings file used when [`SETTINGS_ENV`] is unset
pub const DEFAULT_SETTINGS_FILE: &str = "bmi_settings.json";

/// Light or dark UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub theme: ThemeMode,

    /// Threshold set used to categorize BMI values
    pub convention: CategoryConvention,

    /// Directory that relative data file names resolve against
    pub data_dir: PathBuf,

    /// When the settings were last saved
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            version: SETTINGS_VERSION.to_string(),
            theme: ThemeMode::default(),
            convention: CategoryConvention::default(),
            data_dir: PathBuf::from("."),
            updated_at: None,
        }
    }
}

impl AppSettings {
    /// Load settings from `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(AppSettings::default())` - The file does not exist
    /// * `Err(CalcError::SerializationError)` - Invalid JSON or an
    ///   incompatible schema version
    /// * `Err(CalcError::FileError)` - Any other I/O failure
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(AppSettings::default());
            }
            Err(e) => {
                return Err(CalcError::file_error("read", path.display().to_string(), e.to_string()));
            }
        };

        let settings: AppSettings = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
        validate_version(&settings.version)?;
        Ok(settings)
    }

    /// Load settings, logging any failure and falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        AppSettings::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            AppSettings::default()
        })
    }

    /// Save settings with atomic write semantics, stamping `updated_at`.
    pub fn save(&mut self, path: &Path) -> CalcResult<()> {
        self.version = SETTINGS_VERSION.to_string();
        self.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        write_atomic(path, &json)?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }
}

/// Settings file location: `$BMI_SETTINGS`, else `bmi_settings.json` in the
/// working directory.
pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// Major versions must match; within 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SETTINGS_VERSION);

    let mismatch = || CalcError::SerializationError {
        reason: format!(
            "Settings version {} is not compatible with {}",
            file_version, SETTINGS_VERSION
        ),
    };

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.convention, CategoryConvention::Standard);
        assert_eq!(settings.data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = AppSettings::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings {
            theme: ThemeMode::Light,
            convention: CategoryConvention::Legacy,
            data_dir: dir.path().to_path_buf(),
            ..AppSettings::default()
        };
        settings.save(&path).unwrap();
        assert!(settings.updated_at.is_some());

        let loaded = AppSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert!(fs::read_to_string(&path).unwrap().contains("\"convention\": \"legacy\""));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "theme": "light" }"#).unwrap();

        let loaded = AppSettings::load(&path).unwrap();
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert_eq!(loaded.convention, CategoryConvention::Standard);
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(AppSettings::load(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        assert_eq!(AppSettings::load_or_default(&path), AppSettings::default());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SETTINGS_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
