use chrono::{DateTime, Utc};

use crate::errors::{MeetError, MeetResult};

/// A parsed `[start, end)` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Rejects empty and inverted windows.
    pub fn ensure_ordered(self) -> MeetResult<Self> {
        if self.start >= self.end {
            return Err(MeetError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parses two RFC 3339 timestamps, start first. Ordering is not checked here;
/// see [`TimeWindow::ensure_ordered`].
pub fn parse_window(start: &str, end: &str) -> MeetResult<TimeWindow> {
    let start = parse_timestamp(start)
        .ok_or_else(|| MeetError::Validation("invalid start time format".to_string()))?;
    let end = parse_timestamp(end)
        .ok_or_else(|| MeetError::Validation("invalid end time format".to_string()))?;

    Ok(TimeWindow { start, end })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
