pub mod countries;
pub mod list;
pub mod stats;
pub mod timezones;

use std::path::PathBuf;

use anyhow::Result;
use econcal_core::settings::Settings;
use econcal_core::timezone::DisplayTimezone;

/// Apply command-line overrides on top of the loaded settings.
pub fn apply_overrides(mut settings: Settings, tz: Option<&str>, data: Option<PathBuf>) -> Result<Settings> {
    if let Some(tz) = tz {
        settings.display_timezone = tz.parse::<DisplayTimezone>()?;
    }
    if data.is_some() {
        settings.data_file = data;
    }
    Ok(settings)
}
