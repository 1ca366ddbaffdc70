//! Global econcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::store::EventStore;
use crate::timezone::{DisplayTimezone, parse_zone, system_zone};

const DEFAULT_LATENCY_MS: u64 = 600;
const DEFAULT_PORT: u16 = 4096;

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY_MS
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/econcal/config.toml, overridable with
/// `ECONCAL_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub display_timezone: DisplayTimezone,

    /// Zone used to decide what "today" means. Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_timezone: Option<String>,

    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// JSON file with events. The built-in sample calendar is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            display_timezone: DisplayTimezone::default(),
            reference_timezone: None,
            latency_ms: DEFAULT_LATENCY_MS,
            data_file: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("econcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented template on first run.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus environment overrides.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ECONCAL"))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# econcal configuration

# Timezone used to display events (Asia/Tehran, UTC, America/New_York, Europe/London):
# display_timezone = \"{}\"

# Timezone that decides what \"today\" and \"this week\" mean (defaults to the system zone):
# reference_timezone = \"UTC\"

# Simulated fetch latency in milliseconds:
# latency_ms = {}

# Load events from a JSON file instead of the built-in sample calendar:
# data_file = \"~/events.json\"

# Port for econcal-server:
# port = {}
",
            DisplayTimezone::default().id(),
            DEFAULT_LATENCY_MS,
            DEFAULT_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn reference_zone(&self) -> CalendarResult<Tz> {
        match &self.reference_timezone {
            Some(name) => parse_zone(name),
            None => Ok(system_zone()),
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Build the event store: the configured data file, or the sample
    /// calendar scheduled around `now`.
    pub fn event_store(&self, now: DateTime<Utc>) -> CalendarResult<EventStore> {
        match &self.data_file {
            Some(path) => EventStore::from_json_file(&expand_home(path)),
            None => Ok(EventStore::sample(now, self.reference_zone()?)),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(settings.display_timezone, DisplayTimezone::Tehran);
        assert_eq!(settings.latency(), Duration::from_millis(600));
        assert_eq!(settings.port, 4096);
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Settings::create_default_config(&path).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.latency_ms, 600);
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "display_timezone = \"Europe/London\"\nreference_timezone = \"Asia/Tokyo\"\nlatency_ms = 0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.display_timezone, DisplayTimezone::London);
        assert_eq!(settings.reference_zone().unwrap(), chrono_tz::Asia::Tokyo);
        assert!(settings.latency().is_zero());
    }

    #[test]
    fn rejects_unsupported_display_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display_timezone = \"Asia/Tokyo\"\n").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(CalendarError::Config(_))));
    }

    #[test]
    fn unset_data_file_uses_sample_calendar() {
        let settings = Settings {
            reference_timezone: Some("UTC".into()),
            ..Settings::default()
        };
        assert_eq!(settings.event_store(Utc::now()).unwrap().len(), 9);
    }
}
