use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Creates the `meets` table and its indexes if missing.
///
/// The exclusion constraint rejects two rows of the same organizer whose
/// `[start_time, end_time)` ranges intersect, so even writers that bypass the
/// service lock cannot double-book.
pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meets (
            id BIGSERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE,
            title VARCHAR(255) NOT NULL,
            organizer_id VARCHAR(255) NOT NULL,
            participants JSONB NOT NULL DEFAULT '[]'::jsonb,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            color VARCHAR(32) NOT NULL DEFAULT '',
            meet_type INTEGER NOT NULL DEFAULT 0,
            old_price DOUBLE PRECISION NOT NULL DEFAULT 0,
            discount DOUBLE PRECISION NOT NULL DEFAULT 0,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_meet_range CHECK (end_time > start_time),
            CONSTRAINT meets_no_overlap EXCLUDE USING gist (
                organizer_id WITH =,
                tstzrange(start_time, end_time, '[)') WITH &&
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    for index in [
        "CREATE INDEX IF NOT EXISTS idx_meets_organizer_start ON meets(organizer_id, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_meets_end_time ON meets(end_time)",
    ] {
        sqlx::query(index).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
