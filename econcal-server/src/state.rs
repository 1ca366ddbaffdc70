use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use econcal_core::filter::FilterSpec;
use econcal_core::service::{EventSource, Fetcher, MockEventSource};
use econcal_core::settings::Settings;
use econcal_core::state::{Action, CalendarState, RequestSeq};
use econcal_core::store::EventStore;
use tokio::sync::Mutex;

pub type SharedSource = Arc<dyn EventSource>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub reference_zone: Tz,
    pub fetcher: Arc<Fetcher<SharedSource>>,
    store: Arc<EventStore>,
    /// Session-local state: favorites and the last successful fetch
    session: Arc<Mutex<CalendarState>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let store = settings.event_store(Utc::now())?;
        Self::with_store(settings, store)
    }

    /// Serve `store` through the mock source with the configured latency.
    pub fn with_store(settings: Settings, store: EventStore) -> Result<Self> {
        let store = Arc::new(store);
        let source = MockEventSource::new(store.clone(), settings.reference_zone()?)
            .with_latency(settings.latency());
        Self::with_source(settings, store, Arc::new(source))
    }

    pub fn with_source(settings: Settings, store: Arc<EventStore>, source: SharedSource) -> Result<Self> {
        let reference_zone = settings.reference_zone()?;
        tracing::info!(events = store.len(), zone = %reference_zone, "event store loaded");

        let session = CalendarState::default().reduce(Action::SetTimezone(settings.display_timezone));

        Ok(AppState {
            settings: Arc::new(settings),
            reference_zone,
            fetcher: Arc::new(Fetcher::new(source)),
            store,
            session: Arc::new(Mutex::new(session)),
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Run `action` through the reducer and return a snapshot of the new state.
    pub async fn dispatch(&self, action: Action) -> CalendarState {
        let mut session = self.session.lock().await;
        let next = std::mem::take(&mut *session).reduce(action);
        *session = next.clone();
        next
    }

    /// Record `spec` as the current filters and start a fetch for it.
    ///
    /// The sequence number is reserved under the session lock, so the order
    /// in which fetches start is the order of their sequence numbers.
    pub async fn start_fetch(&self, spec: &FilterSpec) -> RequestSeq {
        let mut session = self.session.lock().await;
        let seq = self.fetcher.begin();
        *session = std::mem::take(&mut *session)
            .reduce(Action::SetFilters(spec.clone()))
            .reduce(Action::FetchStarted { seq });
        seq
    }

    pub async fn snapshot(&self) -> CalendarState {
        self.session.lock().await.clone()
    }
}
