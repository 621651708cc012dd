use chrono::{DateTime, Utc};
use meets_core::models::meet::Meet;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMeet {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub organizer_id: String,
    pub participants: Json<Vec<String>>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub color: String,
    pub meet_type: i32,
    pub old_price: f64,
    pub discount: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<DbMeet> for Meet {
    fn from(row: DbMeet) -> Self {
        Meet {
            id: row.id,
            uuid: row.uuid,
            title: row.title,
            organizer_id: row.organizer_id,
            participants: row.participants.0,
            start: row.start_time,
            end: row.end_time,
            description: row.description,
            color: row.color,
            meet_type: row.meet_type,
            old_price: row.old_price,
            discount: row.discount,
            price: row.price,
        }
    }
}
