//! Query engine: narrows an event sequence by a filter specification.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::date_range::{DateWindow, QueryContext};
use crate::event::EconomicEvent;
use crate::filter::FilterSpec;

/// Apply `spec` to `events` and return the matches sorted by time.
///
/// Total over well-typed input: empty sets and an empty search string act as
/// "no restriction". Events with an unparseable `time_utc` are dropped when a
/// date window applies and otherwise sort after every valid event.
pub fn query(events: &[EconomicEvent], spec: &FilterSpec, ctx: &QueryContext) -> Vec<EconomicEvent> {
    let window = DateWindow::resolve(spec.date_range, ctx);
    let needle = spec.search_needle();

    let mut matched: Vec<(Option<DateTime<Utc>>, &EconomicEvent)> = events
        .iter()
        .map(|event| (event.instant().ok(), event))
        .filter(|(instant, _)| match (&window, instant) {
            (None, _) => true,
            (Some(window), Some(instant)) => window.contains(*instant),
            (Some(_), None) => false,
        })
        .filter(|(_, e)| spec.impact_levels.is_empty() || spec.impact_levels.contains(&e.impact))
        .filter(|(_, e)| spec.currencies.is_empty() || spec.currencies.contains(&e.currency))
        .filter(|(_, e)| needle.as_deref().is_none_or(|n| e.matches_search(n)))
        .filter(|(_, e)| !spec.only_favorites || e.is_favorite)
        .collect();

    // Stable, so ties keep store order
    matched.sort_by(|(a, _), (b, _)| compare_instants(a, b));

    tracing::debug!(
        total = events.len(),
        matched = matched.len(),
        range = %spec.date_range,
        "query evaluated"
    );

    matched.into_iter().map(|(_, event)| event.clone()).collect()
}

fn compare_instants(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
