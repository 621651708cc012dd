use serde::{Deserialize, Serialize};

/// One occupied interval within a day, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// `HH:MM`, 24-hour, UTC
    pub start: String,
    pub end: String,
    /// Whole minutes with an `m` suffix, e.g. `60m`
    pub duration: String,
}

/// Occupancy for a single UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlot {
    pub title: String,
    pub times: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlotView {
    /// e.g. `Mon Jan 02, 2006`
    pub label: String,
    /// `YYYY-MM-DD`
    pub value: String,
    pub title: String,
    pub times: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub dates: Vec<DateSlotView>,
}
