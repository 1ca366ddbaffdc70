use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use econcal_core::date_range::QueryContext;
use econcal_core::filter::{DateRangeKind, FilterSpec};
use econcal_core::query::query;
use econcal_core::settings::Settings;
use econcal_core::stats::CalendarStats;
use owo_colors::OwoColorize;

use crate::render::Render;

/// Summarise the current week.
pub fn run(settings: Settings, tz: Option<&str>, data: Option<PathBuf>) -> Result<()> {
    let settings = super::apply_overrides(settings, tz, data)?;
    let now = Utc::now();
    let ctx = QueryContext::new(now, settings.reference_zone()?);

    let store = settings.event_store(now)?;
    let week = query(
        store.events(),
        &FilterSpec::default().with_range(DateRangeKind::Week),
        &ctx,
    );

    let stats = CalendarStats::compute(&week, settings.display_timezone.tz());

    println!("{}", "This week".bold());
    println!("{}", stats.render());

    Ok(())
}
