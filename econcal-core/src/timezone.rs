//! Supported display timezones.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Timezones the calendar can be displayed in.
///
/// Only affects day bucketing and per-row time rendering, never the
/// date-range computation of the query engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DisplayTimezone {
    #[default]
    Tehran,
    Utc,
    NewYork,
    London,
}

impl DisplayTimezone {
    pub const ALL: [DisplayTimezone; 4] = [
        DisplayTimezone::Tehran,
        DisplayTimezone::Utc,
        DisplayTimezone::NewYork,
        DisplayTimezone::London,
    ];

    /// IANA identifier
    pub fn id(&self) -> &'static str {
        match self {
            DisplayTimezone::Tehran => "Asia/Tehran",
            DisplayTimezone::Utc => "UTC",
            DisplayTimezone::NewYork => "America/New_York",
            DisplayTimezone::London => "Europe/London",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayTimezone::Tehran => "تهران (GMT+3:30)",
            DisplayTimezone::Utc => "جهانی (UTC)",
            DisplayTimezone::NewYork => "نیویورک (EST)",
            DisplayTimezone::London => "لندن (GMT)",
        }
    }

    pub fn tz(&self) -> Tz {
        match self {
            DisplayTimezone::Tehran => chrono_tz::Asia::Tehran,
            DisplayTimezone::Utc => chrono_tz::UTC,
            DisplayTimezone::NewYork => chrono_tz::America::New_York,
            DisplayTimezone::London => chrono_tz::Europe::London,
        }
    }
}

impl fmt::Display for DisplayTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DisplayTimezone {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "asia/tehran" | "tehran" => Ok(DisplayTimezone::Tehran),
            "utc" | "etc/utc" => Ok(DisplayTimezone::Utc),
            "america/new-york" | "new-york" | "newyork" => Ok(DisplayTimezone::NewYork),
            "europe/london" | "london" => Ok(DisplayTimezone::London),
            _ => Err(CalendarError::UnknownTimezone(s.to_string())),
        }
    }
}

impl From<DisplayTimezone> for String {
    fn from(tz: DisplayTimezone) -> Self {
        tz.id().to_string()
    }
}

impl TryFrom<String> for DisplayTimezone {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse an arbitrary IANA zone name (used for the reference zone, which
/// is not limited to the display list).
pub fn parse_zone(name: &str) -> Result<Tz, CalendarError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimezone(name.to_string()))
}

/// The system's local zone, falling back to UTC when it can't be detected.
pub fn system_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(chrono_tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_aliases() {
        assert_eq!("Asia/Tehran".parse::<DisplayTimezone>().unwrap(), DisplayTimezone::Tehran);
        assert_eq!("america/new_york".parse::<DisplayTimezone>().unwrap(), DisplayTimezone::NewYork);
        assert_eq!("london".parse::<DisplayTimezone>().unwrap(), DisplayTimezone::London);
        assert!("Asia/Tokyo".parse::<DisplayTimezone>().is_err());
    }

    #[test]
    fn every_zone_roundtrips_through_its_id() {
        for zone in DisplayTimezone::ALL {
            assert_eq!(zone.id().parse::<DisplayTimezone>().unwrap(), zone);
            assert_eq!(zone.tz().name(), zone.id());
        }
    }

    #[test]
    fn reference_zone_accepts_any_iana_name() {
        assert_eq!(parse_zone("Asia/Tokyo").unwrap(), chrono_tz::Asia::Tokyo);
        assert!(parse_zone("Mars/Olympus").is_err());
    }
}
