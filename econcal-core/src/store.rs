//! Read-only event store.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::date_range::local_day_start;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{EconomicEvent, ImpactLevel};

/// A country the calendar tracks and the currency its releases move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
}

pub const COUNTRIES: [Country; 8] = [
    Country { code: "US", name: "United States", currency: "USD" },
    Country { code: "EU", name: "Eurozone", currency: "EUR" },
    Country { code: "GB", name: "United Kingdom", currency: "GBP" },
    Country { code: "JP", name: "Japan", currency: "JPY" },
    Country { code: "AU", name: "Australia", currency: "AUD" },
    Country { code: "CA", name: "Canada", currency: "CAD" },
    Country { code: "CH", name: "Switzerland", currency: "CHF" },
    Country { code: "NZ", name: "New Zealand", currency: "NZD" },
];

/// Currencies offered as quick filters.
pub const COMMON_CURRENCIES: [&str; 6] = ["USD", "EUR", "GBP", "JPY", "CAD", "AUD"];

/// Immutable, ordered collection of events, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<EconomicEvent>,
}

impl EventStore {
    /// Build a store, rejecting duplicate ids. Malformed timestamps are kept
    /// (only the grouping stage rejects them) but logged.
    pub fn new(events: Vec<EconomicEvent>) -> CalendarResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id.as_str()) {
                return Err(CalendarError::DuplicateEventId(event.id.clone()));
            }
            if event.instant().is_err() {
                tracing::warn!(id = %event.id, time_utc = %event.time_utc, "event has a malformed timestamp");
            }
        }

        Ok(EventStore { events })
    }

    pub fn from_json_str(json: &str) -> CalendarResult<Self> {
        let events: Vec<EconomicEvent> =
            serde_json::from_str(json).map_err(|e| CalendarError::Serialization(e.to_string()))?;
        Self::new(events)
    }

    pub fn from_json_file(path: &Path) -> CalendarResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), events = store.len(), "loaded event store");
        Ok(store)
    }

    pub fn events(&self) -> &[EconomicEvent] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&EconomicEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The built-in demo calendar, scheduled relative to `now` so that there
    /// is always something today, tomorrow and later this week.
    pub fn sample(now: DateTime<Utc>, zone: Tz) -> Self {
        let at = |days: i64, hour: u32, minute: u32| relative_time(now, zone, days, hour, minute);

        let events = vec![
            sample_event(
                "1",
                "تصمیم‌گیری نرخ بهره فدرال رزرو",
                ("United States", "USD"),
                at(0, 19, 0),
                ImpactLevel::High,
                [None, Some("5.50%"), Some("5.50%")],
                ("Central Bank", "Federal Reserve"),
            )
            .favorite()
            .describe("کمیته بازار آزاد فدرال (FOMC) نرخ بهره را تعیین می‌کند. این مهم‌ترین رویداد برای ارزش دلار است."),
            sample_event(
                "2",
                "شاخص قیمت مصرف‌کننده (CPI) سالانه",
                ("United States", "USD"),
                at(0, 13, 30),
                ImpactLevel::High,
                [Some("3.2%"), Some("3.1%"), Some("3.4%")],
                ("Inflation", "Bureau of Labor Statistics"),
            )
            .describe("شاخص اصلی تورم که تغییرات قیمت کالاها و خدمات را اندازه‌گیری می‌کند."),
            sample_event(
                "3",
                "سخنرانی رئیس بانک مرکزی اروپا (Lagarde)",
                ("Eurozone", "EUR"),
                at(0, 15, 0),
                ImpactLevel::Medium,
                [None, None, None],
                ("Central Bank", "ECB"),
            ),
            sample_event(
                "4",
                "تولید ناخالص داخلی (GDP) فصلی",
                ("United Kingdom", "GBP"),
                at(1, 7, 0),
                ImpactLevel::High,
                [None, Some("0.1%"), Some("-0.1%")],
                ("GDP", "ONS"),
            ),
            sample_event(
                "5",
                "نرخ بیکاری",
                ("Canada", "CAD"),
                at(1, 13, 30),
                ImpactLevel::Medium,
                [None, Some("5.8%"), Some("5.7%")],
                ("Employment", "Statistics Canada"),
            ),
            sample_event(
                "6",
                "تراز تجاری",
                ("Japan", "JPY"),
                at(-1, 23, 50),
                ImpactLevel::Low,
                [Some("-0.5T"), Some("-0.4T"), Some("-0.6T")],
                ("Trade", "Ministry of Finance"),
            ),
            sample_event(
                "7",
                "شاخص خرده‌فروشی",
                ("Australia", "AUD"),
                at(2, 1, 30),
                ImpactLevel::Medium,
                [None, Some("0.5%"), Some("0.2%")],
                ("Sales", "ABS"),
            ),
            sample_event(
                "8",
                "شاخص مدیران خرید (PMI) بخش خدمات",
                ("Eurozone", "EUR"),
                at(0, 9, 0),
                ImpactLevel::Medium,
                [Some("49.8"), Some("50.0"), Some("48.7")],
                ("Business", "S&P Global"),
            ),
            sample_event(
                "9",
                "مدعیان بیکاری هفتگی",
                ("United States", "USD"),
                at(2, 13, 30),
                ImpactLevel::Medium,
                [None, Some("215K"), Some("210K")],
                ("Employment", "DOL"),
            ),
        ];

        EventStore { events }
    }
}

/// `now` shifted by `days` in `zone`, with the local time set to hour:minute.
fn relative_time(now: DateTime<Utc>, zone: Tz, days: i64, hour: u32, minute: u32) -> String {
    let date = now.with_timezone(&zone).date_naive() + Duration::days(days);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

    let instant = zone
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local_day_start(&zone, date) + Duration::hours(hour as i64));

    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn sample_event(
    id: &str,
    title: &str,
    (country, currency): (&str, &str),
    time_utc: String,
    impact: ImpactLevel,
    [actual, forecast, previous]: [Option<&str>; 3],
    (category, source): (&str, &str),
) -> EconomicEvent {
    EconomicEvent {
        id: id.to_string(),
        title: title.to_string(),
        country: country.to_string(),
        currency: currency.to_string(),
        time_utc,
        impact,
        actual: actual.map(str::to_string),
        forecast: forecast.map(str::to_string),
        previous: previous.map(str::to_string),
        category: category.to_string(),
        source: source.to_string(),
        detail_url: None,
        is_favorite: false,
        description: None,
    }
}

impl EconomicEvent {
    fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}
