//! Event listing endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use econcal_core::error::CalendarResult;
use econcal_core::filter::{FilterSpec, parse_date};
use econcal_core::group::{DayGroups, group_by_day};
use econcal_core::state::Action;
use econcal_core::timezone::DisplayTimezone;
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}

/// Query string of `GET /events`. List values are comma separated.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub range: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub impact: Option<String>,
    pub currency: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub favorites: bool,
    pub tz: Option<String>,
}

impl EventsQuery {
    pub fn filter_spec(&self) -> CalendarResult<FilterSpec> {
        let mut spec = FilterSpec {
            search_text: self.search.clone().unwrap_or_default(),
            only_favorites: self.favorites,
            ..FilterSpec::default()
        };

        if let Some(range) = &self.range {
            spec.date_range = range.parse()?;
        }
        spec.custom_start = self.from.as_deref().map(parse_date).transpose()?;
        spec.custom_end = self.to.as_deref().map(parse_date).transpose()?;

        for level in split_list(self.impact.as_deref()) {
            spec.impact_levels.insert(level.parse()?);
        }
        spec.currencies = split_list(self.currency.as_deref())
            .map(|c| c.to_uppercase())
            .collect();

        Ok(spec)
    }

    pub fn timezone(&self, default: DisplayTimezone) -> CalendarResult<DisplayTimezone> {
        match &self.tz {
            Some(tz) => tz.parse(),
            None => Ok(default),
        }
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub total: usize,
    pub timezone: DisplayTimezone,
    pub days: DayGroups,
    /// Set when the fetch failed and `days` holds the previous result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /events - Filter, sort and group events by day
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    let spec = query.filter_spec()?;
    let timezone = query.timezone(state.settings.display_timezone)?;

    let seq = state.start_fetch(&spec).await;
    let completion = state.fetcher.complete(seq, &spec).await;
    let (fresh, error) = match &completion {
        Action::FetchSucceeded { events, .. } => (Some(events.clone()), None),
        Action::FetchFailed { error, .. } => (None, Some(error.clone())),
        _ => (None, None),
    };
    let session = state.dispatch(completion).await;

    let events = fresh.unwrap_or(session.events);
    let days = group_by_day(&events, timezone.tz())?;

    Ok(Json(EventsResponse {
        total: days.total_events(),
        timezone,
        days,
        error,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::routes::router;
    use crate::routes::tests::{send, test_app, test_settings, test_store};
    use axum::http::StatusCode;
    use econcal_core::error::CalendarError;
    use econcal_core::event::{EconomicEvent, ImpactLevel};
    use econcal_core::filter::DateRangeKind;
    use econcal_core::service::{EventSource, MockEventSource};

    /// Serves the store until switched off, then fails every fetch.
    struct SwitchableSource {
        inner: MockEventSource,
        down: AtomicBool,
    }

    #[async_trait::async_trait]
    impl EventSource for SwitchableSource {
        async fn fetch(&self, spec: &FilterSpec) -> CalendarResult<Vec<EconomicEvent>> {
            if self.down.load(Ordering::SeqCst) {
                return Err(CalendarError::FetchFailure("upstream unavailable".into()));
            }
            self.inner.fetch(spec).await
        }
    }

    #[test]
    fn parses_comma_separated_filters() {
        let query = EventsQuery {
            range: Some("week".into()),
            impact: Some("high, medium".into()),
            currency: Some("usd,EUR,".into()),
            ..EventsQuery::default()
        };
        let spec = query.filter_spec().unwrap();

        assert_eq!(spec.date_range, DateRangeKind::Week);
        assert!(spec.impact_levels.contains(&ImpactLevel::High));
        assert!(spec.impact_levels.contains(&ImpactLevel::Medium));
        assert_eq!(spec.currencies.len(), 2);
        assert!(spec.currencies.contains("USD"));
    }

    #[test]
    fn rejects_bad_impact() {
        let query = EventsQuery {
            impact: Some("extreme".into()),
            ..EventsQuery::default()
        };
        assert!(query.filter_spec().is_err());
    }

    #[tokio::test]
    async fn groups_custom_range_in_tehran_time() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/events?range=custom&tz=Asia/Tehran").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["timezone"], "Asia/Tehran");

        let days = body["days"].as_array().unwrap();
        let keys: Vec<_> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["2024-01-09", "2024-01-10", "2024-01-11"]);
    }

    #[tokio::test]
    async fn filters_by_currency_and_favorites() {
        let app = test_app();

        let (_, body) = send(&app, "GET", "/events?range=custom&currency=usd&tz=UTC").await;
        assert_eq!(body["total"], 2);

        let (_, body) = send(&app, "GET", "/events?range=custom&favorites=true").await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["days"][0]["events"][0]["id"], "1");
    }

    #[tokio::test]
    async fn custom_bounds_do_not_narrow_results() {
        let app = test_app();
        let (_, body) = send(&app, "GET", "/events?range=custom&from=2030-01-01&to=2030-01-02").await;
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn failed_fetch_returns_previous_days_with_error() {
        let store = Arc::new(test_store());
        let source = Arc::new(SwitchableSource {
            inner: MockEventSource::new(store.clone(), chrono_tz::UTC).with_latency(Duration::ZERO),
            down: AtomicBool::new(false),
        });
        let state = AppState::with_source(test_settings(), store, source.clone()).unwrap();
        let app = router().with_state(state);

        let (status, body) = send(&app, "GET", "/events?range=custom&tz=UTC").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert!(body.get("error").is_none());

        source.down.store(true, Ordering::SeqCst);
        let (status, body) = send(&app, "GET", "/events?range=custom&currency=eur&tz=UTC").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("upstream unavailable"));
        assert_eq!(body["total"], 3);
    }
}
