use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::db::models::SensorReading;

/// Upper bound on rows returned by [`ReadingService::latest`].
pub const LATEST_LIMIT: i64 = 100;

/// Reads and writes `sensor_data` rows.
///
/// Cheap to clone; the underlying pool is reference counted.
#[derive(Debug, Clone)]
pub struct ReadingService {
    pool: PgPool,
}

impl ReadingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a reading stamped with the current UTC time.
    pub async fn record(&self, humidity: f64, temperature: f64) -> Result<SensorReading> {
        self.record_at(humidity, temperature, Utc::now()).await
    }

    pub async fn record_at(
        &self,
        humidity: f64,
        temperature: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<SensorReading> {
        let reading = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO sensor_data (humidity, temperature, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING id, humidity, temperature, recorded_at
            "#,
        )
        .bind(humidity)
        .bind(temperature)
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await?;

        info!(
            id = reading.id,
            humidity = reading.humidity,
            temperature = reading.temperature,
            "Sensor reading persisted"
        );
        Ok(reading)
    }

    /// Most recent readings first, at most `limit` rows.
    ///
    /// Ordered by timestamp; `id` only breaks ties between identical stamps.
    pub async fn latest(&self, limit: i64) -> Result<Vec<SensorReading>> {
        let rows = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, humidity, temperature, recorded_at
            FROM sensor_data
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), limit, "Fetched latest readings");
        Ok(rows)
    }

    /// Every stored humidity value, oldest first.
    pub async fn humidity_history(&self) -> Result<Vec<f64>> {
        let values = sqlx::query_scalar::<_, f64>(
            "SELECT humidity FROM sensor_data ORDER BY recorded_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = values.len(), "Fetched humidity history");
        Ok(values)
    }
}
