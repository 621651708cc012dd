use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::{repository::MeetRepository, window::TimeWindow};

/// Half-open overlap: `[a_start, a_end)` and `[b_start, b_end)` share time.
/// Touching intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Asks storage whether `window` collides with any other meet of `organizer_id`.
pub async fn has_conflict(
    repo: &dyn MeetRepository,
    organizer_id: &str,
    window: &TimeWindow,
    exclude_uuid: Option<Uuid>,
) -> Result<bool> {
    let conflict = repo
        .has_conflict(organizer_id, window.start, window.end, exclude_uuid)
        .await?;

    if conflict {
        tracing::debug!(
            organizer_id,
            start = %window.start,
            end = %window.end,
            "window collides with an existing meet"
        );
    }

    Ok(conflict)
}
