//! Grouping stage: partitions an ordered event sequence into day buckets.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::CalendarResult;
use crate::event::EconomicEvent;

/// Events falling on one calendar day in a given timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    #[serde(serialize_with = "serialize_date_key")]
    pub date: NaiveDate,
    pub events: Vec<EconomicEvent>,
}

impl DayBucket {
    /// `YYYY-MM-DD` key of the bucket
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

fn serialize_date_key<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

/// Day buckets in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DayGroups(Vec<DayBucket>);

impl DayGroups {
    pub fn buckets(&self) -> &[DayBucket] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.0.iter().find(|bucket| bucket.date == date)
    }

    pub fn total_events(&self) -> usize {
        self.0.iter().map(|bucket| bucket.events.len()).sum()
    }

    /// Concatenate the buckets back into one sequence.
    pub fn flatten(&self) -> Vec<EconomicEvent> {
        self.0.iter().flat_map(|bucket| bucket.events.iter().cloned()).collect()
    }
}

impl IntoIterator for DayGroups {
    type Item = DayBucket;
    type IntoIter = std::vec::IntoIter<DayBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Bucket `events` by their local date in `zone`.
///
/// Preserves input order within and across buckets; buckets are created on
/// the first event that falls on their day. Fails on the first event whose
/// timestamp can't be parsed.
pub fn group_by_day(events: &[EconomicEvent], zone: Tz) -> CalendarResult<DayGroups> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for event in events {
        let date = event.instant()?.with_timezone(&zone).date_naive();

        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.events.push(event.clone()),
            None => buckets.push(DayBucket {
                date,
                events: vec![event.clone()],
            }),
        }
    }

    Ok(DayGroups(buckets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalendarError;
    use crate::event::{ImpactLevel, test_event};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tehran_offset_crosses_local_midnight() {
        let events = vec![
            test_event("a", "2024-01-10T19:00:00Z", ImpactLevel::High, "USD"),
            test_event("b", "2024-01-11T01:30:00Z", ImpactLevel::Low, "USD"),
        ];

        let groups = group_by_day(&events, chrono_tz::Asia::Tehran).unwrap();
        let keys: Vec<_> = groups.buckets().iter().map(DayBucket::key).collect();

        // 19:00Z is 22:30 local, 01:30Z is 05:00 local the next day
        assert_eq!(keys, vec!["2024-01-10", "2024-01-11"]);
        assert_eq!(groups.get(date(2024, 1, 10)).unwrap().events[0].id, "a");
        assert_eq!(groups.get(date(2024, 1, 11)).unwrap().events[0].id, "b");
    }

    #[test]
    fn late_utc_event_moves_to_next_day_in_tehran() {
        // 21:00Z is 00:30 on the 11th in Tehran but still the 10th in UTC
        let events = vec![test_event("late", "2024-01-10T21:00:00Z", ImpactLevel::High, "USD")];

        let tehran = group_by_day(&events, chrono_tz::Asia::Tehran).unwrap();
        assert_eq!(tehran.buckets()[0].date, date(2024, 1, 11));

        let utc = group_by_day(&events, chrono_tz::UTC).unwrap();
        assert_eq!(utc.buckets()[0].date, date(2024, 1, 10));
    }

    #[test]
    fn grouping_is_a_partition_that_preserves_order() {
        let events = vec![
            test_event("1", "2024-01-09T23:50:00Z", ImpactLevel::Low, "JPY"),
            test_event("2", "2024-01-10T09:00:00Z", ImpactLevel::Medium, "EUR"),
            test_event("3", "2024-01-10T13:30:00Z", ImpactLevel::High, "USD"),
            test_event("4", "2024-01-11T07:00:00Z", ImpactLevel::High, "GBP"),
            test_event("5", "2024-01-12T01:30:00Z", ImpactLevel::Medium, "AUD"),
        ];

        let groups = group_by_day(&events, chrono_tz::America::New_York).unwrap();

        assert_eq!(groups.total_events(), events.len());
        assert_eq!(groups.flatten(), events);

        let mut seen: Vec<_> = groups
            .buckets()
            .iter()
            .flat_map(|b| b.events.iter().map(|e| e.id.clone()))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), events.len());
    }

    #[test]
    fn regrouping_flattened_output_is_idempotent() {
        let events = vec![
            test_event("1", "2024-01-10T19:00:00Z", ImpactLevel::High, "USD"),
            test_event("2", "2024-01-10T21:00:00Z", ImpactLevel::High, "USD"),
            test_event("3", "2024-01-11T01:30:00Z", ImpactLevel::Low, "USD"),
        ];

        for zone in [chrono_tz::Asia::Tehran, chrono_tz::UTC, chrono_tz::Europe::London] {
            let once = group_by_day(&events, zone).unwrap();
            let twice = group_by_day(&once.flatten(), zone).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn does_not_resort_its_input() {
        let events = vec![
            test_event("later", "2024-01-11T10:00:00Z", ImpactLevel::Low, "USD"),
            test_event("earlier", "2024-01-10T10:00:00Z", ImpactLevel::Low, "USD"),
        ];

        let groups = group_by_day(&events, chrono_tz::UTC).unwrap();
        assert_eq!(groups.buckets()[0].date, date(2024, 1, 11));
        assert_eq!(groups.buckets()[1].date, date(2024, 1, 10));
    }

    #[test]
    fn malformed_timestamp_fails_the_whole_grouping() {
        let events = vec![
            test_event("ok", "2024-01-10T19:00:00Z", ImpactLevel::High, "USD"),
            test_event("broken", "2024-13-45T99:00:00Z", ImpactLevel::High, "USD"),
        ];

        match group_by_day(&events, chrono_tz::UTC) {
            Err(CalendarError::MalformedTimestamp { id, .. }) => assert_eq!(id, "broken"),
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_gives_no_buckets() {
        let groups = group_by_day(&[], chrono_tz::UTC).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn serializes_date_keys() {
        let events = vec![test_event("a", "2024-01-10T19:00:00Z", ImpactLevel::High, "USD")];
        let groups = group_by_day(&events, chrono_tz::UTC).unwrap();
        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(json[0]["date"], "2024-01-10");
        assert_eq!(json[0]["events"][0]["id"], "a");
    }
}
