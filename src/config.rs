//! # Configuration Module
//!
//! Engine configuration for the scheduler plus the optional settings file the
//! binary reads before applying command-line overrides.
//!
//! ## Settings File
//!
//! Looked up in the platform-standard config directory:
//! - Linux: `~/.config/dance-scheduler/settings.json`
//! - macOS: `~/Library/Application Support/dance-scheduler/settings.json`
//! - Windows: `%APPDATA%\dance-scheduler\settings.json`
//!
//! Every field is optional:
//!
//! ```json
//! { "days": 7, "minutes_per_day": 60.0, "flexibility": 2.0 }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rejected engine input. Raised by [`ScheduleConfig::validate`] and
/// [`crate::scheduler::Scheduler::new`] before any scheduling happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("schedule needs at least one day")]
    NoDays,
    #[error("minutes per day must be a positive number, got {0}")]
    InvalidMinutesPerDay(f64),
    #[error("flexibility must be a non-negative number, got {0}")]
    InvalidFlexibility(f64),
    #[error(
        "song `{title}` has invalid duration {duration} (must be a positive number of minutes)"
    )]
    InvalidDuration { title: String, duration: f64 },
    #[error("song `{title}` has familiarity 0 (must be at least 1)")]
    InvalidFamiliarity { title: String },
}

/// Per-run engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleConfig {
    /// Number of days (slots) in the schedule.
    pub days: usize,
    /// Nominal session length in minutes.
    pub minutes_per_day: f64,
    /// Symmetric slack around `minutes_per_day`.
    pub flexibility: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days: 7,
            minutes_per_day: 60.0,
            flexibility: 2.0,
        }
    }
}

impl ScheduleConfig {
    #[must_use]
    pub fn new(days: usize, minutes_per_day: f64, flexibility: f64) -> Self {
        Self {
            days,
            minutes_per_day,
            flexibility,
        }
    }

    /// Lower edge of the capacity window; the fill pass tops days up to this.
    #[must_use]
    pub fn min_minutes(&self) -> f64 {
        self.minutes_per_day - self.flexibility
    }

    /// Hard ceiling no day may ever exceed.
    #[must_use]
    pub fn max_minutes(&self) -> f64 {
        self.minutes_per_day + self.flexibility
    }

    /// Fail fast on values that cannot produce any valid schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::NoDays);
        }
        if !self.minutes_per_day.is_finite() || self.minutes_per_day <= 0.0 {
            return Err(ConfigError::InvalidMinutesPerDay(self.minutes_per_day));
        }
        if !self.flexibility.is_finite() || self.flexibility < 0.0 {
            return Err(ConfigError::InvalidFlexibility(self.flexibility));
        }
        Ok(())
    }

    /// Overlay values from a settings file; fields absent from the file keep
    /// their current value.
    #[must_use]
    pub fn merged_with(self, settings: &Settings) -> Self {
        Self {
            days: settings.days.unwrap_or(self.days),
            minutes_per_day: settings.minutes_per_day.unwrap_or(self.minutes_per_day),
            flexibility: settings.flexibility.unwrap_or(self.flexibility),
        }
    }
}

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub days: Option<usize>,
    pub minutes_per_day: Option<f64>,
    pub flexibility: Option<f64>,
}

/// Returns the platform-appropriate settings file path.
///
/// # Errors
///
/// Fails if the system config directory cannot be determined.
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --settings explicitly instead."
        )
    })?;

    Ok(config_dir.join("dance-scheduler").join("settings.json"))
}

/// Parse a settings file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid settings JSON.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

/// Resolve the settings to apply for this run.
///
/// An explicit path must exist. The default location is optional and yields
/// empty settings when nothing is there.
///
/// # Errors
///
/// Fails if an explicit file is missing, or any file found is unreadable.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings(path);
    }

    let path = match default_settings_path() {
        Ok(path) => path,
        Err(e) => {
            log::debug!("Skipping default settings lookup: {e}");
            return Ok(Settings::default());
        }
    };

    if path.exists() {
        log::info!("Using settings from {}", path.display());
        load_settings(&path)
    } else {
        log::debug!("No settings file at {}", path.display());
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_window() {
        let config = ScheduleConfig::default();
        assert_eq!(config.days, 7);
        assert_eq!(config.min_minutes(), 58.0);
        assert_eq!(config.max_minutes(), 62.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            ScheduleConfig::new(0, 60.0, 2.0).validate(),
            Err(ConfigError::NoDays)
        );
        assert_eq!(
            ScheduleConfig::new(7, 0.0, 2.0).validate(),
            Err(ConfigError::InvalidMinutesPerDay(0.0))
        );
        assert_eq!(
            ScheduleConfig::new(7, 60.0, -1.0).validate(),
            Err(ConfigError::InvalidFlexibility(-1.0))
        );
        assert!(ScheduleConfig::new(7, f64::NAN, 2.0).validate().is_err());
        assert!(ScheduleConfig::new(7, 60.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_zero_flexibility_is_allowed() {
        let config = ScheduleConfig::new(3, 45.0, 0.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.min_minutes(), config.max_minutes());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = ConfigError::InvalidDuration {
            title: "Mambo".to_string(),
            duration: -1.0,
        };
        assert!(err.to_string().contains("Mambo"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let settings = Settings {
            days: Some(5),
            minutes_per_day: None,
            flexibility: Some(4.0),
        };
        let merged = ScheduleConfig::default().merged_with(&settings);

        assert_eq!(merged.days, 5);
        assert_eq!(merged.minutes_per_day, 60.0);
        assert_eq!(merged.flexibility, 4.0);
    }

    #[test]
    fn test_load_settings_partial_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "minutes_per_day": 45.5 }}"#).expect("write settings");

        let settings = load_settings(file.path()).expect("settings should parse");
        assert_eq!(settings.minutes_per_day, Some(45.5));
        assert_eq!(settings.days, None);
    }

    #[test]
    fn test_load_settings_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "weeks": 2 }}"#).expect("write settings");

        assert!(load_settings(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_settings_is_error() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope.json");
        assert!(resolve_settings(Some(&missing)).is_err());
    }

    #[test]
    fn test_default_settings_path_structure() {
        if let Ok(path) = default_settings_path() {
            assert!(path.ends_with("dance-scheduler/settings.json"));
        }
    }
}
