//! Reference data and summary endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use econcal_core::date_range::QueryContext;
use econcal_core::filter::{DateRangeKind, FilterSpec};
use econcal_core::query::query;
use econcal_core::stats::CalendarStats;
use econcal_core::store::{COUNTRIES, Country};
use econcal_core::timezone::DisplayTimezone;
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/timezones", get(list_timezones))
        .route("/countries", get(list_countries))
        .route("/stats", get(week_stats))
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
pub struct TimezoneInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// GET /timezones - Supported display timezones
async fn list_timezones() -> Json<Vec<TimezoneInfo>> {
    Json(
        DisplayTimezone::ALL
            .iter()
            .map(|tz| TimezoneInfo {
                id: tz.id(),
                label: tz.label(),
            })
            .collect(),
    )
}

/// GET /countries - Tracked countries and currencies
async fn list_countries() -> Json<Vec<Country>> {
    Json(COUNTRIES.to_vec())
}

#[derive(Deserialize)]
pub struct StatsQuery {
    pub tz: Option<String>,
}

/// GET /stats - Summary of the current week
async fn week_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<CalendarStats>, AppError> {
    let timezone = match params.tz.as_deref() {
        Some(tz) => tz.parse::<DisplayTimezone>()?,
        None => state.settings.display_timezone,
    };

    let ctx = QueryContext::new(Utc::now(), state.reference_zone);
    let week = query(
        state.store().events(),
        &FilterSpec::default().with_range(DateRangeKind::Week),
        &ctx,
    );

    Ok(Json(CalendarStats::compute(&week, timezone.tz())))
}
