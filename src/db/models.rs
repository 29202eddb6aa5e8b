use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `sensor_data`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: i64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// Always UTC; converted to the display zone at the API boundary.
    pub recorded_at: DateTime<Utc>,
}
