//! Core of the econcal economic calendar.
//!
//! The pipeline is a chain of pure functions:
//! - [`query`] narrows the [`EventStore`] with a [`FilterSpec`]
//! - [`group_by_day`] buckets the result by local date in a display timezone
//!
//! Around it sit the session-local [`UserFavorites`], the [`CalendarState`]
//! reducer used by presentation layers, and the [`EventSource`] fetch seam.

pub mod date_range;
pub mod error;
pub mod event;
pub mod favorites;
pub mod filter;
pub mod group;
pub mod query;
pub mod service;
pub mod settings;
pub mod state;
pub mod stats;
pub mod store;
pub mod timezone;

pub use date_range::{DateWindow, QueryContext};
pub use error::{CalendarError, CalendarResult};
pub use event::{EconomicEvent, ImpactLevel};
pub use favorites::{UserFavorites, toggle_favorite};
pub use filter::{DateRangeKind, FilterSpec};
pub use group::{DayBucket, DayGroups, group_by_day};
pub use query::query;
pub use service::{EventSource, Fetcher, MockEventSource};
pub use settings::Settings;
pub use state::{Action, CalendarState, RowState};
pub use stats::CalendarStats;
pub use store::EventStore;
pub use timezone::DisplayTimezone;
