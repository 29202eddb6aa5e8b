use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{actuator_state::LedState, db::models::SensorReading, trend::Forecast};

/// Request body for `POST /api/data`.
///
/// Older firmware sends the Spanish keys; both spellings are accepted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestRequest {
    /// Relative humidity percentage
    #[serde(alias = "humedad")]
    pub humidity: f64,
    /// Degrees Celsius
    #[serde(alias = "temperatura")]
    pub temperature: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok".to_owned() }
    }
}

/// One element of `GET /api/data`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub humidity: f64,
    pub temperature: f64,
    /// RFC 3339 timestamp in the configured display zone, offset included.
    #[schema(value_type = String, format = DateTime)]
    pub fecha: DateTime<FixedOffset>,
}

impl ReadingDto {
    pub fn from_reading(r: SensorReading, tz: Tz) -> Self {
        Self {
            humidity: r.humidity,
            temperature: r.temperature,
            fecha: r.recorded_at.with_timezone(&tz).fixed_offset(),
        }
    }
}

/// Response for `POST /api/led`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LedUpdateResponse {
    pub status: String,
    pub state: LedState,
}

impl LedUpdateResponse {
    pub fn updated(state: LedState) -> Self {
        Self {
            status: "updated".to_owned(),
            state,
        }
    }
}

/// Response for `GET /api/predict`. Exactly one of the two shapes is returned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PredictionResponse {
    Predicted { predicted_humidity_10_steps: f64 },
    Insufficient { prediction: String },
}

pub const INSUFFICIENT_DATA: &str = "Insufficient data";

impl From<Forecast> for PredictionResponse {
    fn from(f: Forecast) -> Self {
        match f {
            Forecast::Predicted(v) => Self::Predicted {
                predicted_humidity_10_steps: v,
            },
            Forecast::InsufficientData => Self::Insufficient {
                prediction: INSUFFICIENT_DATA.to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn ingest_accepts_english_and_spanish_keys() {
        let en: IngestRequest =
            serde_json::from_value(json!({ "humidity": 55.0, "temperature": 21.0 })).unwrap();
        let es: IngestRequest =
            serde_json::from_value(json!({ "humedad": 55.0, "temperatura": 21.0 })).unwrap();
        assert_eq!((en.humidity, en.temperature), (55.0, 21.0));
        assert_eq!((es.humidity, es.temperature), (55.0, 21.0));
    }

    #[test]
    fn ingest_requires_both_fields() {
        assert!(serde_json::from_value::<IngestRequest>(json!({ "humidity": 55.0 })).is_err());
        assert!(serde_json::from_value::<IngestRequest>(json!({ "humidity": "wet", "temperature": 1 })).is_err());
    }

    #[test]
    fn reading_timestamp_is_rendered_in_display_zone() {
        let reading = SensorReading {
            id: 1,
            humidity: 60.5,
            temperature: 22.0,
            recorded_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap(),
        };
        let dto = ReadingDto::from_reading(reading, chrono_tz::America::Tegucigalpa);
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["fecha"], "2024-03-01T12:30:00-06:00");
        assert_eq!(value["humidity"], 60.5);
    }

    #[test]
    fn prediction_serializes_to_one_of_two_shapes() {
        let predicted = serde_json::to_value(PredictionResponse::from(Forecast::Predicted(70.0))).unwrap();
        assert_eq!(predicted, json!({ "predicted_humidity_10_steps": 70.0 }));

        let insufficient =
            serde_json::to_value(PredictionResponse::from(Forecast::InsufficientData)).unwrap();
        assert_eq!(insufficient, json!({ "prediction": "Insufficient data" }));
    }
}
