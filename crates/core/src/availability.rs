//! # Occupancy aggregation
//!
//! Turns the meets that occupy a date range into a per-day report. This is
//! an occupancy view: it lists busy time, and callers that want free gaps
//! must invert it themselves.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    errors::{MeetError, MeetResult},
    models::{
        availability::{AvailabilityResponse, DateSlot, DateSlotView, TimeSlot},
        meet::Meet,
    },
};

/// Number of days added to `from` when the caller gives no upper bound.
pub const DEFAULT_WINDOW_DAYS: i64 = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Groups meets by UTC start date. Keys are `YYYY-MM-DD`, so map order is
/// chronological. Each day's title comes from its earliest-starting meet,
/// ties going to input order.
pub fn aggregate(meets: &[Meet]) -> BTreeMap<String, DateSlot> {
    let mut ordered: Vec<&Meet> = meets.iter().collect();
    ordered.sort_by_key(|meet| meet.start);

    let mut dates: BTreeMap<String, DateSlot> = BTreeMap::new();
    for meet in ordered {
        let date = meet.start.format(DATE_FORMAT).to_string();
        dates
            .entry(date)
            .or_insert_with(|| DateSlot {
                title: meet.title.clone(),
                times: Vec::new(),
            })
            .times
            .push(time_slot(meet));
    }

    // zero-padded HH:MM sorts chronologically
    for slot in dates.values_mut() {
        slot.times.sort_by(|a, b| a.start.cmp(&b.start));
    }

    dates
}

fn time_slot(meet: &Meet) -> TimeSlot {
    TimeSlot {
        start: meet.start.format("%H:%M").to_string(),
        end: meet.end.format("%H:%M").to_string(),
        duration: format!("{}m", (meet.end - meet.start).num_minutes()),
    }
}

/// Fills in missing bounds: `from` defaults to midnight UTC of `now`'s day,
/// `to` to `from` plus [`DEFAULT_WINDOW_DAYS`].
pub fn resolve_window(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = from.unwrap_or_else(|| start_of_day(now.date_naive()));
    let to = to.unwrap_or_else(|| from + Duration::days(DEFAULT_WINDOW_DAYS));
    (from, to)
}

/// Parses a `YYYY-MM-DD` query bound into midnight UTC of that date.
pub fn parse_date_bound(field: &str, value: &str) -> MeetResult<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(start_of_day)
        .map_err(|_| MeetError::Validation(format!("invalid {field} date, expected YYYY-MM-DD")))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Flattens the report into date-ordered entries with display labels.
pub fn into_response(dates: BTreeMap<String, DateSlot>) -> AvailabilityResponse {
    let dates = dates
        .into_iter()
        .map(|(value, slot)| {
            let label = NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .map(|date| date.format("%a %b %d, %Y").to_string())
                .unwrap_or_else(|_| value.clone());
            DateSlotView {
                label,
                value,
                title: slot.title,
                times: slot.times,
            }
        })
        .collect();

    AvailabilityResponse { dates }
}
