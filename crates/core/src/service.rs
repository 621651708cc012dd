//! # Meet orchestration
//!
//! The create and update use cases validate input, resolve the owning
//! organizer, check for conflicts and persist, stopping at the first failure.
//! The conflict check and the write run under a per-organizer lock so that
//! two concurrent writers cannot both observe a free slot and both commit.

use std::{collections::BTreeMap, future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    availability, conflict,
    errors::{CONFLICT_MESSAGE, MeetError, MeetResult, OverlapViolation},
    locks::OrganizerLocks,
    models::{
        availability::DateSlot,
        identity::AuthenticatedUser,
        meet::{CreateMeetRequest, Meet, MeetPayload, MeetQueryOptions, NewMeet, UpdateMeetRequest},
    },
    organizer,
    repository::MeetRepository,
    window::{self, TimeWindow},
};

/// Default bound on any single persistence call.
pub const DEFAULT_PERSISTENCE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MeetService {
    repo: Arc<dyn MeetRepository>,
    locks: OrganizerLocks,
    timeout: Duration,
}

impl MeetService {
    pub fn new(repo: Arc<dyn MeetRepository>) -> Self {
        Self {
            repo,
            locks: OrganizerLocks::new(),
            timeout: DEFAULT_PERSISTENCE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn create(
        &self,
        request: CreateMeetRequest,
        user: &AuthenticatedUser,
    ) -> MeetResult<Meet> {
        let payload = request.meet.ok_or_else(|| validation("data is required"))?;
        validate_payload(&payload)?;
        let window = parse_ordered_window(&payload)?;
        let organizer_id = self.resolve_writer(&payload, user)?;

        let _guard = self.locks.acquire(&organizer_id).await;
        self.ensure_free(&organizer_id, &window, None).await?;
        debug!(organizer_id = %organizer_id, minutes = window.duration_minutes(), "slot is free");

        let new_meet = build_meet(Uuid::new_v4(), organizer_id, window, payload);
        let meet = self
            .persist("create meet", self.repo.create(&new_meet))
            .await?;

        info!(uuid = %meet.uuid, organizer_id = %meet.organizer_id, "meet created");
        Ok(meet)
    }

    pub async fn update(
        &self,
        request: UpdateMeetRequest,
        user: &AuthenticatedUser,
    ) -> MeetResult<Meet> {
        let payload = request.meet.ok_or_else(|| validation("data is required"))?;
        if request.uuid.trim().is_empty() {
            return Err(validation("UUID is required"));
        }
        validate_payload(&payload)?;
        let uuid = Uuid::parse_str(request.uuid.trim()).map_err(|_| validation("invalid UUID"))?;
        let window = parse_ordered_window(&payload)?;
        let organizer_id = self.resolve_writer(&payload, user)?;

        let _guard = self.locks.acquire(&organizer_id).await;

        let existing = self
            .persist("load meet", self.repo.get_by_uuid(uuid))
            .await?
            .ok_or_else(|| MeetError::NotFound(format!("meet {uuid} not found")))?;
        ensure_owner(&existing, &organizer_id, user)?;

        self.ensure_free(&organizer_id, &window, Some(uuid)).await?;

        let new_meet = build_meet(uuid, organizer_id, window, payload);
        let meet = self
            .persist("update meet", self.repo.update(&new_meet))
            .await?
            .ok_or_else(|| MeetError::NotFound(format!("meet {uuid} not found")))?;

        info!(uuid = %meet.uuid, organizer_id = %meet.organizer_id, "meet updated");
        Ok(meet)
    }

    pub async fn get_by_id(&self, id: i64) -> MeetResult<Meet> {
        self.persist("get meet", self.repo.get_by_id(id))
            .await?
            .ok_or_else(|| MeetError::NotFound(format!("meet {id} not found")))
    }

    /// All meets of the resolved organizer.
    pub async fn list(
        &self,
        requested_organizer: Option<&str>,
        user: &AuthenticatedUser,
    ) -> MeetResult<Vec<Meet>> {
        let organizer_id = organizer::resolve_organizer(requested_organizer.unwrap_or(""), user);
        if organizer_id.is_empty() {
            return Err(unresolved_organizer());
        }

        let options = MeetQueryOptions::for_organizer(organizer_id);
        self.persist("query meets", self.repo.query_meets(&options))
            .await
    }

    pub async fn delete(&self, id: i64, user: &AuthenticatedUser) -> MeetResult<()> {
        let existing = self.get_by_id(id).await?;
        ensure_owner(&existing, &user.uuid, user)?;

        let _guard = self.locks.acquire(&existing.organizer_id).await;
        let deleted = self.persist("delete meet", self.repo.delete(id)).await?;
        if !deleted {
            return Err(MeetError::NotFound(format!("meet {id} not found")));
        }

        info!(id, uuid = %existing.uuid, "meet deleted");
        Ok(())
    }

    /// Occupancy report for an organizer's calendar, keyed by `YYYY-MM-DD`.
    pub async fn query_availability(
        &self,
        requested_organizer: Option<&str>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        user: &AuthenticatedUser,
    ) -> MeetResult<BTreeMap<String, DateSlot>> {
        let organizer_id = organizer::resolve_calendar_owner(requested_organizer, user);
        if organizer_id.is_empty() {
            return Err(unresolved_organizer());
        }

        let (from, to) = availability::resolve_window(from, to, Utc::now());
        if from > to {
            return Err(validation("from must not be after to"));
        }

        let meets = self
            .persist(
                "query occupying meets",
                self.repo.occupying_meets(&organizer_id, from, to),
            )
            .await?;

        debug!(
            organizer_id = %organizer_id,
            %from,
            %to,
            count = meets.len(),
            "aggregating occupancy"
        );
        Ok(availability::aggregate(&meets))
    }

    fn resolve_writer(&self, payload: &MeetPayload, user: &AuthenticatedUser) -> MeetResult<String> {
        let organizer_id = organizer::resolve_organizer(&payload.organizer_id, user);
        if organizer_id.is_empty() {
            warn!("rejecting write without a resolvable organizer");
            return Err(unresolved_organizer());
        }
        Ok(organizer_id)
    }

    async fn ensure_free(
        &self,
        organizer_id: &str,
        window: &TimeWindow,
        exclude_uuid: Option<Uuid>,
    ) -> MeetResult<()> {
        let busy = self
            .persist(
                "check conflict",
                conflict::has_conflict(self.repo.as_ref(), organizer_id, window, exclude_uuid),
            )
            .await?;

        if busy {
            warn!(organizer_id, start = %window.start, end = %window.end, "meet conflict");
            return Err(MeetError::Conflict(CONFLICT_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Runs a persistence call under the configured timeout and classifies its failure.
    async fn persist<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = eyre::Result<T>>,
    ) -> MeetResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(report)) if report.downcast_ref::<OverlapViolation>().is_some() => {
                warn!(operation, "storage rejected overlapping meet");
                Err(MeetError::Conflict(CONFLICT_MESSAGE.to_string()))
            }
            Ok(Err(report)) => {
                error!(operation, error = ?report, "persistence failure");
                Err(MeetError::Infrastructure(report))
            }
            Err(_) => {
                error!(operation, timeout = ?self.timeout, "persistence call timed out");
                Err(MeetError::Timeout(format!(
                    "{operation} did not complete within {:?}",
                    self.timeout
                )))
            }
        }
    }
}

fn validation(message: &str) -> MeetError {
    MeetError::Validation(message.to_string())
}

fn unresolved_organizer() -> MeetError {
    MeetError::Authorization("organizer could not be resolved".to_string())
}

/// Required-field checks in fixed order: title, start, end.
fn validate_payload(payload: &MeetPayload) -> MeetResult<()> {
    if payload.title.trim().is_empty() {
        return Err(validation("title is required"));
    }
    if payload.start.trim().is_empty() {
        return Err(validation("start time is required"));
    }
    if payload.end.trim().is_empty() {
        return Err(validation("end time is required"));
    }
    Ok(())
}

fn parse_ordered_window(payload: &MeetPayload) -> MeetResult<TimeWindow> {
    window::parse_window(&payload.start, &payload.end)?.ensure_ordered()
}

fn ensure_owner(existing: &Meet, organizer_id: &str, user: &AuthenticatedUser) -> MeetResult<()> {
    if existing.organizer_id == organizer_id || user.is_elevated() {
        return Ok(());
    }
    warn!(uuid = %existing.uuid, "meet belongs to another organizer");
    Err(MeetError::Authorization(
        "meet belongs to another organizer".to_string(),
    ))
}

fn build_meet(uuid: Uuid, organizer_id: String, window: TimeWindow, payload: MeetPayload) -> NewMeet {
    NewMeet {
        uuid,
        title: payload.title.trim().to_string(),
        organizer_id,
        participants: payload.participants,
        start: window.start,
        end: window.end,
        description: payload.description,
        color: payload.color,
        meet_type: payload.meet_type,
        old_price: payload.old_price,
        discount: payload.discount,
        price: payload.price,
    }
}
