//! Date windows for filtering events.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::filter::DateRangeKind;

/// The evaluator's reference instant and the zone used to decide which
/// calendar day "now" falls on.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext {
    pub now: DateTime<Utc>,
    pub reference_zone: Tz,
}

impl QueryContext {
    pub fn new(now: DateTime<Utc>, reference_zone: Tz) -> Self {
        QueryContext { now, reference_zone }
    }

    /// Today's date in the reference zone.
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.reference_zone).date_naive()
    }
}

/// Half-open `[start, end)` window of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Resolve a range kind against the reference context.
    /// Returns `None` for `Custom`, which applies no date filtering.
    pub fn resolve(kind: DateRangeKind, ctx: &QueryContext) -> Option<DateWindow> {
        let today = ctx.today();
        let zone = &ctx.reference_zone;

        let (first, last) = match kind {
            DateRangeKind::Today => (today, today),
            DateRangeKind::Tomorrow => {
                let tomorrow = today + Duration::days(1);
                (tomorrow, tomorrow)
            }
            // ISO weeks start on Monday
            DateRangeKind::Week => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            DateRangeKind::Custom => return None,
        };

        Some(DateWindow {
            start: local_day_start(zone, first),
            end: local_day_start(zone, last + Duration::days(1)),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// First instant of `date` in `zone`. Walks forward through a DST gap when
/// local midnight doesn't exist.
pub(crate) fn local_day_start(zone: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    for minutes in (0..=180).step_by(30) {
        let candidate = midnight + Duration::minutes(minutes);
        if let Some(dt) = zone.from_local_datetime(&candidate).earliest() {
            return dt.with_timezone(&Utc);
        }
    }

    midnight.and_utc()
}
