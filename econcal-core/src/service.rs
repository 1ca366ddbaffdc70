//! Event fetching.
//!
//! An [`EventSource`] answers a filter specification with an ordered list of
//! events. The bundled [`MockEventSource`] runs the query engine over a
//! static store after a fixed delay, standing in for a real backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;

use crate::date_range::QueryContext;
use crate::error::CalendarResult;
use crate::event::EconomicEvent;
use crate::filter::FilterSpec;
use crate::query::query;
use crate::state::{Action, RequestSeq};
use crate::store::EventStore;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(600);

#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch(&self, spec: &FilterSpec) -> CalendarResult<Vec<EconomicEvent>>;
}

#[async_trait::async_trait]
impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    async fn fetch(&self, spec: &FilterSpec) -> CalendarResult<Vec<EconomicEvent>> {
        (**self).fetch(spec).await
    }
}

pub struct MockEventSource {
    store: Arc<EventStore>,
    latency: Duration,
    reference_zone: Tz,
}

impl MockEventSource {
    pub fn new(store: Arc<EventStore>, reference_zone: Tz) -> Self {
        MockEventSource {
            store,
            latency: DEFAULT_LATENCY,
            reference_zone,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait::async_trait]
impl EventSource for MockEventSource {
    async fn fetch(&self, spec: &FilterSpec) -> CalendarResult<Vec<EconomicEvent>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let ctx = QueryContext::new(Utc::now(), self.reference_zone);
        Ok(query(self.store.events(), spec, &ctx))
    }
}

/// Tags every fetch with a sequence number so that completions can be fed
/// to the reducer, which drops any that were superseded.
pub struct Fetcher<S> {
    source: S,
    next_seq: AtomicU64,
}

impl<S: EventSource> Fetcher<S> {
    pub fn new(source: S) -> Self {
        Fetcher {
            source,
            next_seq: AtomicU64::new(1),
        }
    }

    /// Reserve the next sequence number. Dispatch `FetchStarted` with it
    /// before awaiting [`Fetcher::complete`].
    pub fn begin(&self) -> RequestSeq {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Run the fetch for `seq` and turn the outcome into a completion action.
    pub async fn complete(&self, seq: RequestSeq, spec: &FilterSpec) -> Action {
        match self.source.fetch(spec).await {
            Ok(events) => {
                tracing::debug!(seq, events = events.len(), "fetch completed");
                Action::FetchSucceeded { seq, events }
            }
            Err(err) => Action::FetchFailed {
                seq,
                error: err.to_string(),
            },
        }
    }
}
