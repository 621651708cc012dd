use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::meet::{Meet, MeetQueryOptions, NewMeet};

/// Storage for meets. All failures are infrastructure failures, except an
/// [`crate::errors::OverlapViolation`] carried inside the report, which marks a
/// write that storage itself rejected as double-booking.
#[async_trait]
pub trait MeetRepository: Send + Sync {
    async fn create(&self, meet: &NewMeet) -> Result<Meet>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Meet>>;

    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<Meet>>;

    /// Overwrites the meet identified by `meet.uuid`. `None` when no such meet exists.
    async fn update(&self, meet: &NewMeet) -> Result<Option<Meet>>;

    /// Returns whether a meet was removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Errors when `options.organizer_id` is empty. With `only_available` set
    /// this answers like [`MeetRepository::occupying_meets`].
    async fn query_meets(&self, options: &MeetQueryOptions) -> Result<Vec<Meet>>;

    async fn has_conflict(
        &self,
        organizer_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_uuid: Option<Uuid>,
    ) -> Result<bool>;

    /// Meets of `organizer_id` starting within `[from, to]`, earliest first.
    async fn occupying_meets(
        &self,
        organizer_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Meet>>;
}
