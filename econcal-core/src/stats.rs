//! Week summary figures shown above the calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::event::{EconomicEvent, ImpactLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarStats {
    pub high_impact_usd: usize,
    pub high_impact_eur: usize,
    /// Day with the most events in the display zone; earliest day wins ties
    pub busiest_day: Option<NaiveDate>,
}

impl CalendarStats {
    /// Events with unparseable timestamps still count towards the impact
    /// totals but not towards any day.
    pub fn compute(events: &[EconomicEvent], zone: Tz) -> Self {
        let high_impact = |currency: &str| {
            events
                .iter()
                .filter(|e| e.impact == ImpactLevel::High && e.currency == currency)
                .count()
        };

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for event in events {
            if let Ok(instant) = event.instant() {
                *per_day.entry(instant.with_timezone(&zone).date_naive()).or_default() += 1;
            }
        }

        let busiest_day = per_day
            .iter()
            .fold(None, |best: Option<(NaiveDate, usize)>, (&day, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((day, count)),
            })
            .map(|(day, _)| day);

        CalendarStats {
            high_impact_usd: high_impact("USD"),
            high_impact_eur: high_impact("EUR"),
            busiest_day,
        }
    }
}
