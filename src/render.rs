//! Terminal rendering for econcal types.
//!
//! Extension traits that add colored output to econcal-core types using
//! owo_colors.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use econcal_core::event::{EconomicEvent, ImpactLevel};
use econcal_core::state::RowState;
use econcal_core::stats::CalendarStats;
use owo_colors::OwoColorize;

/// Shown when an expanded event has no description of its own.
const FALLBACK_DESCRIPTION: &str = "توضیحات تکمیلی برای این رویداد در دسترس نیست، اما معمولاً این شاخص تاثیر مستقیمی بر نوسانات ارز مربوطه دارد.";

const MISSING_VALUE: &str = "--";

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ImpactLevel {
    fn render(&self) -> String {
        let marker = format!("{:<3}", self.marker());
        match self {
            ImpactLevel::High => marker.red().bold().to_string(),
            ImpactLevel::Medium => marker.yellow().to_string(),
            ImpactLevel::Low => marker.green().to_string(),
        }
    }
}

impl Render for CalendarStats {
    fn render(&self) -> String {
        let busiest = self
            .busiest_day
            .map(|d| d.format("%A %-d %B").to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        [
            format!("{} {}", "High impact USD:".dimmed(), self.high_impact_usd.bold()),
            format!("{} {}", "High impact EUR:".dimmed(), self.high_impact_eur.bold()),
            format!("{} {}", "Busiest day:".dimmed(), busiest.bold()),
        ]
        .join("\n")
    }
}

/// Day header, e.g. "Today", "Tomorrow" or "Wednesday 10 January".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%A %-d %B").to_string(),
    }
}

/// One event row; past events are dimmed.
pub struct EventRow<'a> {
    pub event: &'a EconomicEvent,
    pub zone: Tz,
    pub now: DateTime<Utc>,
    pub favorite: bool,
    pub state: RowState,
}

impl Render for EventRow<'_> {
    fn render(&self) -> String {
        let event = self.event;

        let (time, is_past) = match event.instant() {
            Ok(instant) => (
                instant.with_timezone(&self.zone).format("%H:%M").to_string(),
                instant < self.now,
            ),
            Err(_) => ("??:??".to_string(), false),
        };

        let title = if is_past {
            event.title.dimmed().to_string()
        } else {
            event.title.bold().to_string()
        };
        let star = if self.favorite { "★".yellow().to_string() } else { " ".to_string() };

        let actual = value(&event.actual);
        let actual = if event.actual.is_some() && event.forecast.is_some() {
            actual.bold().to_string()
        } else {
            actual.to_string()
        };

        let mut lines = vec![format!(
            "  {} {} {} {} {} {} {}  {}",
            time,
            event.currency.cyan(),
            event.impact.render(),
            star,
            title,
            actual,
            value(&event.forecast).dimmed(),
            value(&event.previous).dimmed(),
        )];

        if self.state.is_expanded() {
            let description = event.description.as_deref().unwrap_or(FALLBACK_DESCRIPTION);
            lines.push(format!("        {}", description));
            lines.push(format!(
                "        {} {} · {} {} · {} {}",
                "country:".dimmed(),
                event.country,
                "category:".dimmed(),
                event.category,
                "source:".dimmed(),
                event.source
            ));
            if let Some(url) = &event.detail_url {
                lines.push(format!("        {}", url.underline()));
            }
        }

        lines.join("\n")
    }
}

fn value(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or(MISSING_VALUE)
}
