//! Presentation state and the reducer that drives it.
//!
//! Every user action or fetch completion becomes an [`Action`]; the only way
//! to change a [`CalendarState`] is `state.reduce(action)`, which yields the
//! next state.

use serde::Serialize;

use crate::error::CalendarResult;
use crate::event::EconomicEvent;
use crate::favorites::UserFavorites;
use crate::filter::FilterSpec;
use crate::group::{DayGroups, group_by_day};
use crate::timezone::DisplayTimezone;

/// Monotonic id of a fetch request.
pub type RequestSeq = u64;

#[derive(Debug, Clone)]
pub enum Action {
    SetFilters(FilterSpec),
    ResetFilters,
    SetTimezone(DisplayTimezone),
    ToggleFavorite(String),
    FetchStarted { seq: RequestSeq },
    FetchSucceeded { seq: RequestSeq, events: Vec<EconomicEvent> },
    FetchFailed { seq: RequestSeq, error: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarState {
    pub filters: FilterSpec,
    pub favorites: UserFavorites,
    pub timezone: DisplayTimezone,
    /// Last successfully fetched events, ordered by time
    pub events: Vec<EconomicEvent>,
    pub loading: bool,
    /// Sequence number of the most recently started fetch
    pub latest_request: Option<RequestSeq>,
    pub last_error: Option<String>,
}

impl CalendarState {
    pub fn reduce(mut self, action: Action) -> CalendarState {
        match action {
            Action::SetFilters(filters) => {
                self.filters = filters;
            }
            Action::ResetFilters => {
                self.filters = FilterSpec::default();
            }
            Action::SetTimezone(timezone) => {
                self.timezone = timezone;
            }
            Action::ToggleFavorite(id) => {
                self.favorites.toggle(&id);
            }
            Action::FetchStarted { seq } => {
                self.loading = true;
                self.latest_request = Some(seq);
            }
            Action::FetchSucceeded { seq, events } => {
                if self.is_stale(seq) {
                    tracing::warn!(seq, latest = ?self.latest_request, "discarding stale fetch result");
                    return self;
                }
                self.events = events;
                self.loading = false;
                self.last_error = None;
            }
            Action::FetchFailed { seq, error } => {
                if self.is_stale(seq) {
                    tracing::warn!(seq, latest = ?self.latest_request, "discarding stale fetch failure");
                    return self;
                }
                // Keep the previous events on screen
                tracing::error!(seq, error = %error, "failed to fetch events");
                self.loading = false;
                self.last_error = Some(error);
            }
        }

        self
    }

    fn is_stale(&self, seq: RequestSeq) -> bool {
        self.latest_request != Some(seq)
    }

    /// Session-local favorite status (not the event's own `is_favorite`).
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Current events bucketed by day in the selected timezone.
    pub fn groups(&self) -> CalendarResult<DayGroups> {
        group_by_day(&self.events, self.timezone.tz())
    }
}

/// Expand/collapse state of a single row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowState {
    #[default]
    Collapsed,
    Expanded,
}

impl RowState {
    pub fn toggle(self) -> RowState {
        match self {
            RowState::Collapsed => RowState::Expanded,
            RowState::Expanded => RowState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == RowState::Expanded
    }
}
