//! Filter specification driven by the presentation layer.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::event::ImpactLevel;

/// Which slice of the calendar to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRangeKind {
    #[default]
    Today,
    Tomorrow,
    Week,
    /// Accepts `custom_start`/`custom_end` but does not filter by them.
    Custom,
}

impl DateRangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRangeKind::Today => "today",
            DateRangeKind::Tomorrow => "tomorrow",
            DateRangeKind::Week => "week",
            DateRangeKind::Custom => "custom",
        }
    }
}

impl fmt::Display for DateRangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRangeKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateRangeKind::Today),
            "tomorrow" => Ok(DateRangeKind::Tomorrow),
            "week" => Ok(DateRangeKind::Week),
            "custom" => Ok(DateRangeKind::Custom),
            _ => Err(CalendarError::InvalidDateRange(s.to_string())),
        }
    }
}

/// User-driven filters. Rebuilt on every interaction; empty sets mean
/// "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub impact_levels: BTreeSet<ImpactLevel>,
    pub currencies: BTreeSet<String>,
    /// Carried along with the other filters but not applied by the query engine.
    pub countries: BTreeSet<String>,
    pub date_range: DateRangeKind,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    pub search_text: String,
    pub only_favorites: bool,
}

impl FilterSpec {
    pub fn with_range(mut self, range: DateRangeKind) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_impact(mut self, level: ImpactLevel) -> Self {
        self.impact_levels.insert(level);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currencies.insert(currency.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn only_favorites(mut self, only: bool) -> Self {
        self.only_favorites = only;
        self
    }

    /// Flip an impact level in or out of the filter.
    pub fn toggle_impact(&mut self, level: ImpactLevel) {
        if !self.impact_levels.remove(&level) {
            self.impact_levels.insert(level);
        }
    }

    /// Flip a currency in or out of the filter.
    pub fn toggle_currency(&mut self, currency: &str) {
        if !self.currencies.remove(currency) {
            self.currencies.insert(currency.to_string());
        }
    }

    /// Whether impact or currency chips are selected (the filter badge).
    pub fn has_active_filters(&self) -> bool {
        !self.impact_levels.is_empty() || !self.currencies.is_empty()
    }

    /// Lowercased search needle, if any.
    pub fn search_needle(&self) -> Option<String> {
        if self.search_text.is_empty() {
            None
        } else {
            Some(self.search_text.to_lowercase())
        }
    }
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_today_without_restrictions() {
        let spec = FilterSpec::default();
        assert_eq!(spec.date_range, DateRangeKind::Today);
        assert!(!spec.has_active_filters());
        assert!(spec.search_needle().is_none());
        assert!(!spec.only_favorites);
    }

    #[test]
    fn toggles_flip_membership() {
        let mut spec = FilterSpec::default();
        spec.toggle_impact(ImpactLevel::High);
        spec.toggle_currency("USD");
        assert!(spec.has_active_filters());

        spec.toggle_impact(ImpactLevel::High);
        spec.toggle_currency("USD");
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn deserializes_partial_json() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"impact_levels":["high"],"date_range":"week"}"#).unwrap();
        assert!(spec.impact_levels.contains(&ImpactLevel::High));
        assert_eq!(spec.date_range, DateRangeKind::Week);
        assert!(spec.currencies.is_empty());
    }

    #[test]
    fn parses_ranges_and_dates() {
        assert_eq!("Week".parse::<DateRangeKind>().unwrap(), DateRangeKind::Week);
        assert!("fortnight".parse::<DateRangeKind>().is_err());
        assert_eq!(parse_date("2024-01-10").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(parse_date("10/01/2024").is_err());
    }
}
