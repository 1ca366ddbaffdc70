//! Economic event types.
//!
//! An `EconomicEvent` is a scheduled macroeconomic announcement. Records are
//! immutable once loaded into a store; the presentation layers only read them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Editorial severity of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 3] = [ImpactLevel::Low, ImpactLevel::Medium, ImpactLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        }
    }

    /// Badge marker shown next to the title (e.g. "!!!" for high)
    pub fn marker(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "!",
            ImpactLevel::Medium => "!!",
            ImpactLevel::High => "!!!",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "پایین",
            ImpactLevel::Medium => "متوسط",
            ImpactLevel::High => "بالا",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactLevel {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ImpactLevel::Low),
            "medium" => Ok(ImpactLevel::Medium),
            "high" => Ok(ImpactLevel::High),
            _ => Err(CalendarError::InvalidImpact(s.to_string())),
        }
    }
}

/// A scheduled economic announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub id: String,
    pub title: String,
    pub country: String,
    pub currency: String,
    /// RFC 3339 instant, e.g. "2024-01-10T19:00:00Z"
    pub time_utc: String,
    pub impact: ImpactLevel,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub category: String,
    pub source: String,
    #[serde(default, alias = "detailUrl", skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    /// Favorite flag asserted by the data source (not the user's session favorites)
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EconomicEvent {
    /// Parse `time_utc` into an absolute instant.
    pub fn instant(&self) -> CalendarResult<DateTime<Utc>> {
        parse_instant(&self.time_utc).ok_or_else(|| CalendarError::MalformedTimestamp {
            id: self.id.clone(),
            value: self.time_utc.clone(),
        })
    }

    /// Whether a measured value has been published yet.
    pub fn is_released(&self) -> bool {
        self.actual.is_some()
    }

    /// Case-insensitive substring match against title, currency and country.
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.currency.to_lowercase().contains(needle)
            || self.country.to_lowercase().contains(needle)
    }
}

impl fmt::Display for EconomicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.currency)
    }
}

pub(crate) fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
pub(crate) fn test_event(id: &str, time_utc: &str, impact: ImpactLevel, currency: &str) -> EconomicEvent {
    EconomicEvent {
        id: id.to_string(),
        title: format!("Event {id}"),
        country: "Testland".to_string(),
        currency: currency.to_string(),
        time_utc: time_utc.to_string(),
        impact,
        actual: None,
        forecast: None,
        previous: None,
        category: "Test".to_string(),
        source: "Test".to_string(),
        detail_url: None,
        is_favorite: false,
        description: None,
    }
}
