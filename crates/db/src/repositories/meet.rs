use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use meets_core::{
    availability,
    errors::OverlapViolation,
    models::meet::{Meet, MeetQueryOptions, NewMeet},
    repository::MeetRepository,
};
use sqlx::{Pool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::models::DbMeet;

const MEET_COLUMNS: &str = "id, uuid, title, organizer_id, participants, start_time, end_time, \
     description, color, meet_type, old_price, discount, price, created_at";

/// SQLSTATE raised by the `meets_no_overlap` exclusion constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

pub async fn create_meet(pool: &Pool<Postgres>, meet: &NewMeet) -> Result<Meet> {
    tracing::debug!(
        "Creating meet: uuid={}, organizer_id={}, start={}, end={}",
        meet.uuid, meet.organizer_id, meet.start, meet.end
    );

    let sql = format!(
        r#"
        INSERT INTO meets (uuid, title, organizer_id, participants, start_time, end_time,
                           description, color, meet_type, old_price, discount, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {MEET_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbMeet>(&sql)
        .bind(meet.uuid)
        .bind(&meet.title)
        .bind(&meet.organizer_id)
        .bind(Json(&meet.participants))
        .bind(meet.start)
        .bind(meet.end)
        .bind(&meet.description)
        .bind(&meet.color)
        .bind(meet.meet_type)
        .bind(meet.old_price)
        .bind(meet.discount)
        .bind(meet.price)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(|e| classify_write_error(e, &meet.organizer_id))?;

    tracing::debug!("Meet created successfully: id={}", row.id);
    Ok(row.into())
}

pub async fn get_meet_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Meet>> {
    let sql = format!("SELECT {MEET_COLUMNS} FROM meets WHERE id = $1");

    let row = sqlx::query_as::<_, DbMeet>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Meet::from))
}

pub async fn get_meet_by_uuid(pool: &Pool<Postgres>, uuid: Uuid) -> Result<Option<Meet>> {
    let sql = format!("SELECT {MEET_COLUMNS} FROM meets WHERE uuid = $1");

    let row = sqlx::query_as::<_, DbMeet>(&sql)
        .bind(uuid)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Meet::from))
}

pub async fn update_meet(pool: &Pool<Postgres>, meet: &NewMeet) -> Result<Option<Meet>> {
    tracing::debug!("Updating meet: uuid={}", meet.uuid);

    let sql = format!(
        r#"
        UPDATE meets
        SET title = $2, organizer_id = $3, participants = $4, start_time = $5, end_time = $6,
            description = $7, color = $8, meet_type = $9, old_price = $10, discount = $11,
            price = $12
        WHERE uuid = $1
        RETURNING {MEET_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbMeet>(&sql)
        .bind(meet.uuid)
        .bind(&meet.title)
        .bind(&meet.organizer_id)
        .bind(Json(&meet.participants))
        .bind(meet.start)
        .bind(meet.end)
        .bind(&meet.description)
        .bind(&meet.color)
        .bind(meet.meet_type)
        .bind(meet.old_price)
        .bind(meet.discount)
        .bind(meet.price)
        .fetch_optional(pool)
        .await
        .map_err(|e| classify_write_error(e, &meet.organizer_id))?;

    Ok(row.map(Meet::from))
}

pub async fn delete_meet(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM meets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn has_conflict(
    pool: &Pool<Postgres>,
    organizer_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_uuid: Option<Uuid>,
) -> Result<bool> {
    let conflict = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM meets
            WHERE organizer_id = $1
              AND start_time < $2
              AND end_time > $3
              AND ($4::uuid IS NULL OR uuid <> $4)
        )
        "#,
    )
    .bind(organizer_id)
    .bind(end)
    .bind(start)
    .bind(exclude_uuid)
    .fetch_one(pool)
    .await?;

    Ok(conflict)
}

pub async fn get_occupying_meets(
    pool: &Pool<Postgres>,
    organizer_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Meet>> {
    let sql = format!(
        r#"
        SELECT {MEET_COLUMNS}
        FROM meets
        WHERE organizer_id = $1 AND start_time BETWEEN $2 AND $3
        ORDER BY start_time ASC
        "#
    );

    let rows = sqlx::query_as::<_, DbMeet>(&sql)
        .bind(organizer_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Meet::from).collect())
}

pub async fn query_meets(pool: &Pool<Postgres>, options: &MeetQueryOptions) -> Result<Vec<Meet>> {
    if options.organizer_id.is_empty() {
        return Err(eyre!("organizer id is required"));
    }

    if options.only_available {
        let (from, to) = availability::resolve_window(options.from, options.to, Utc::now());
        return get_occupying_meets(pool, &options.organizer_id, from, to).await;
    }

    let rows = filtered_query(options)
        .build_query_as::<DbMeet>()
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Meet::from).collect())
}

fn filtered_query(options: &MeetQueryOptions) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::new(format!("SELECT {MEET_COLUMNS} FROM meets WHERE organizer_id = "));
    builder.push_bind(options.organizer_id.clone());

    if let Some(from) = options.from {
        builder.push(" AND start_time >= ").push_bind(from);
    }
    if let Some(to) = options.to {
        builder.push(" AND end_time <= ").push_bind(to);
    }

    builder.push(" ORDER BY start_time ASC");
    builder
}

fn classify_write_error(err: sqlx::Error, organizer_id: &str) -> eyre::Report {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return OverlapViolation {
                organizer_id: organizer_id.to_string(),
            }
            .into();
        }
    }
    err.into()
}

/// [`MeetRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgMeetRepository {
    pool: Pool<Postgres>,
}

impl PgMeetRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetRepository for PgMeetRepository {
    async fn create(&self, meet: &NewMeet) -> Result<Meet> {
        create_meet(&self.pool, meet).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Meet>> {
        get_meet_by_id(&self.pool, id).await
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<Meet>> {
        get_meet_by_uuid(&self.pool, uuid).await
    }

    async fn update(&self, meet: &NewMeet) -> Result<Option<Meet>> {
        update_meet(&self.pool, meet).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        delete_meet(&self.pool, id).await
    }

    async fn query_meets(&self, options: &MeetQueryOptions) -> Result<Vec<Meet>> {
        query_meets(&self.pool, options).await
    }

    async fn has_conflict(
        &self,
        organizer_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_uuid: Option<Uuid>,
    ) -> Result<bool> {
        has_conflict(&self.pool, organizer_id, start, end, exclude_uuid).await
    }

    async fn occupying_meets(
        &self,
        organizer_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Meet>> {
        get_occupying_meets(&self.pool, organizer_id, from, to).await
    }
}
