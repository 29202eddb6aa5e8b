pub mod models;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the `sensor_data` table and its timestamp index if they are absent.
///
/// There is no migration history: the schema is a single table and this is
/// safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensor_data (
            id          BIGSERIAL PRIMARY KEY,
            humidity    DOUBLE PRECISION NOT NULL,
            temperature DOUBLE PRECISION NOT NULL,
            recorded_at TIMESTAMPTZ      NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS sensor_data_recorded_at_idx ON sensor_data (recorded_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
