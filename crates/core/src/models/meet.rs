use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted meet. `id` is assigned by storage, `uuid` by the service at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meet {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub organizer_id: String,
    pub participants: Vec<String>,
    #[serde(rename = "start_time")]
    pub start: DateTime<Utc>,
    #[serde(rename = "end_time")]
    pub end: DateTime<Utc>,
    pub description: String,
    pub color: String,
    #[serde(rename = "type")]
    pub meet_type: i32,
    pub old_price: f64,
    pub discount: f64,
    pub price: f64,
}

/// Everything a repository needs to insert or overwrite a meet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeet {
    pub uuid: Uuid,
    pub title: String,
    pub organizer_id: String,
    pub participants: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub color: String,
    pub meet_type: i32,
    pub old_price: f64,
    pub discount: f64,
    pub price: f64,
}

impl NewMeet {
    pub fn into_meet(self, id: i64) -> Meet {
        Meet {
            id,
            uuid: self.uuid,
            title: self.title,
            organizer_id: self.organizer_id,
            participants: self.participants,
            start: self.start,
            end: self.end,
            description: self.description,
            color: self.color,
            meet_type: self.meet_type,
            old_price: self.old_price,
            discount: self.discount,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetQueryOptions {
    pub organizer_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Switches the query to "meets occupying the range".
    pub only_available: bool,
}

impl MeetQueryOptions {
    pub fn for_organizer(organizer_id: impl Into<String>) -> Self {
        Self {
            organizer_id: organizer_id.into(),
            ..Self::default()
        }
    }
}

/// Client-supplied meet fields. Empty strings count as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetPayload {
    #[serde(default)]
    pub organizer_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "type")]
    pub meet_type: i32,
    #[serde(default)]
    pub old_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMeetRequest {
    pub meet: Option<MeetPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetRequest {
    #[serde(default)]
    pub uuid: String,
    pub meet: Option<MeetPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetResponse {
    pub meet: Meet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetListResponse {
    pub meets: Vec<Meet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMeetResponse {
    pub id: i64,
    pub deleted: bool,
}
