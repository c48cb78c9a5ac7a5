//! Saved preferences and how they combine with command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::civil::Date;
use letterday::timetable::DEFAULT_REMINDER_MINUTES;
use letterday::{Division, LunchOption, Period, SchoolCalendar};
use serde::{Deserialize, Serialize};

/// File name used by `config init` when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "letterday.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid preferences in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} already exists, pass --force to overwrite", path.display())]
    Exists { path: PathBuf },

    #[error("reminder minutes must be between 1 and 59, got {0}")]
    ReminderMinutes(i64),
}

/// Contents of a preferences file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<Division>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<LunchOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<i64>,
}

impl Preferences {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let prefs = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded preferences");
        Ok(prefs)
    }

    /// Preferences from `path`, or empty ones when no file was named.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::Exists {
                path: path.to_path_buf(),
            });
        }
        let mut json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        json.push('\n');
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote preferences");
        Ok(())
    }

    /// Layer `flags` on top of these preferences. Flags win.
    pub fn merge(self, flags: Preferences) -> Preferences {
        Preferences {
            period: flags.period.or(self.period),
            division: flags.division.or(self.division),
            lunch: flags.lunch.or(self.lunch),
            epoch: flags.epoch.or(self.epoch),
            reminder_minutes: flags.reminder_minutes.or(self.reminder_minutes),
        }
    }

    /// Fill in defaults and validate.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let division = self.division.unwrap_or_default();
        let mut calendar = SchoolCalendar::new(division);
        if let Some(epoch) = self.epoch {
            calendar = calendar.with_epoch(epoch);
        }
        let reminder_minutes = self.reminder_minutes.unwrap_or(DEFAULT_REMINDER_MINUTES);
        if !(1..60).contains(&reminder_minutes) {
            return Err(ConfigError::ReminderMinutes(reminder_minutes));
        }
        let lunch = match self.lunch {
            Some(lunch) if division.table().midday().recognizes(lunch) => lunch,
            Some(lunch) => {
                tracing::warn!(
                    lunch = lunch.as_str(),
                    division = division.as_str(),
                    fallback = division.default_lunch().as_str(),
                    "lunch option does not apply to this division"
                );
                division.default_lunch()
            }
            None => division.default_lunch(),
        };
        Ok(Settings {
            calendar,
            lunch,
            period: self.period,
            reminder_minutes,
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub calendar: SchoolCalendar,
    pub lunch: LunchOption,
    pub period: Option<Period>,
    pub reminder_minutes: i64,
}
