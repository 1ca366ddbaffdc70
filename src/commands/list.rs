use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use econcal_core::event::ImpactLevel;
use econcal_core::filter::{DateRangeKind, FilterSpec, parse_date};
use econcal_core::service::{Fetcher, MockEventSource};
use econcal_core::settings::Settings;
use econcal_core::state::{Action, CalendarState, RowState};
use owo_colors::OwoColorize;

use crate::render::{EventRow, Render, day_label};

#[derive(Args)]
pub struct ListArgs {
    /// Date range: today, tomorrow, week or custom
    #[arg(short, long, default_value = "today")]
    range: DateRangeKind,

    /// Start date for a custom range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<chrono::NaiveDate>,

    /// End date for a custom range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<chrono::NaiveDate>,

    /// Only show this impact level (repeatable)
    #[arg(short, long)]
    impact: Vec<ImpactLevel>,

    /// Only show this currency (repeatable)
    #[arg(short, long)]
    currency: Vec<String>,

    /// Search titles, currencies and countries
    #[arg(short, long, default_value = "")]
    search: String,

    /// Only show events flagged as favorites by the data source
    #[arg(long)]
    favorites: bool,

    /// Mark an event id with a star for this session (repeatable)
    #[arg(long)]
    star: Vec<String>,

    /// Display timezone (Asia/Tehran, UTC, America/New_York, Europe/London)
    #[arg(long)]
    tz: Option<String>,

    /// Load events from a JSON file instead of the sample calendar
    #[arg(long)]
    data: Option<PathBuf>,

    /// Show descriptions and details for every event
    #[arg(short, long)]
    expand: bool,
}

impl ListArgs {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            impact_levels: self.impact.iter().copied().collect(),
            currencies: self.currency.iter().map(|c| c.to_uppercase()).collect(),
            date_range: self.range,
            custom_start: self.from,
            custom_end: self.to,
            search_text: self.search.clone(),
            only_favorites: self.favorites,
            ..FilterSpec::default()
        }
    }
}

pub async fn run(settings: Settings, args: ListArgs) -> Result<()> {
    let settings = super::apply_overrides(settings, args.tz.as_deref(), args.data.clone())?;
    let reference_zone = settings.reference_zone()?;
    let now = Utc::now();

    let store = settings.event_store(now)?;
    let source = MockEventSource::new(Arc::new(store), reference_zone).with_latency(settings.latency());
    let fetcher = Fetcher::new(source);

    let spec = args.filter_spec();
    let mut state = CalendarState::default()
        .reduce(Action::SetTimezone(settings.display_timezone))
        .reduce(Action::SetFilters(spec.clone()));
    for id in &args.star {
        state = state.reduce(Action::ToggleFavorite(id.clone()));
    }

    let seq = fetcher.begin();
    state = state.reduce(Action::FetchStarted { seq });
    eprintln!("{}", "Loading events...".dimmed());
    let completion = fetcher.complete(seq, &spec).await;
    state = state.reduce(completion);

    if let Some(error) = &state.last_error {
        eprintln!("{} {}", "Could not load events:".red(), error);
    }

    let groups = state.groups()?;
    let zone = state.timezone.tz();

    println!(
        "{} {}  {} {}",
        groups.total_events().bold(),
        "events".dimmed(),
        "time:".dimmed(),
        state.timezone.label()
    );

    if groups.is_empty() {
        println!("{}", "No events match these filters.".dimmed());
        return Ok(());
    }

    let today = now.with_timezone(&zone).date_naive();
    let row_state = if args.expand { RowState::Expanded } else { RowState::Collapsed };

    for (i, bucket) in groups.buckets().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", day_label(bucket.date, today).bold(), bucket.key().dimmed());

        for event in &bucket.events {
            let row = EventRow {
                event,
                zone,
                now,
                favorite: state.is_favorite(&event.id),
                state: row_state,
            };
            println!("{}", row.render());
        }
    }

    Ok(())
}
