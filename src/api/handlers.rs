use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use tracing::{debug, info};
use utoipa::OpenApi;

use super::{
    dto::{IngestRequest, LedUpdateResponse, PredictionResponse, ReadingDto, StatusResponse},
    errors::AppError,
    AppState,
};
use crate::{
    actuator_state::{LedState, LedUpdate},
    sensors::service::LATEST_LIMIT,
    trend::{self, HORIZON, MIN_POINTS},
};

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// Store one reading from a device, stamped with the server's clock.
#[utoipa::path(
    post,
    path = "/api/data",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Reading stored", body = StatusResponse),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Missing or non-numeric humidity/temperature"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(body): Json<IngestRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state.readings.record(body.humidity, body.temperature).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Fetch the most recent readings, newest first, capped at 100.
#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "Latest readings, newest first", body = Vec<ReadingDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn list_readings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let rows = state.readings.latest(LATEST_LIMIT).await?;
    let tz = state.timezone;
    Ok(Json(
        rows.into_iter()
            .map(|r| ReadingDto::from_reading(r, tz))
            .collect(),
    ))
}

// ---------------------------------------------------------------------------
// LEDs
// ---------------------------------------------------------------------------

/// Set either or both LED flags. Flags missing from the body keep their value.
#[utoipa::path(
    post,
    path = "/api/led",
    request_body = LedUpdate,
    responses(
        (status = 200, description = "State after the update", body = LedUpdateResponse),
    ),
    tag = "actuators"
)]
pub async fn set_leds(
    State(state): State<AppState>,
    Json(update): Json<LedUpdate>,
) -> Json<LedUpdateResponse> {
    let leds = state.actuators.update(update).await;
    info!(led1 = leds.led1, led2 = leds.led2, "LED state updated");
    Json(LedUpdateResponse::updated(leds))
}

/// Current LED flags, polled by the device.
#[utoipa::path(
    get,
    path = "/api/led",
    responses(
        (status = 200, description = "Current LED state", body = LedState),
    ),
    tag = "actuators"
)]
pub async fn get_leds(State(state): State<AppState>) -> Json<LedState> {
    Json(state.actuators.snapshot().await)
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Linear extrapolation of humidity 10 rows past the latest reading.
///
/// The fit runs over row position, not elapsed time.
#[utoipa::path(
    get,
    path = "/api/predict",
    responses(
        (status = 200, description = "Forecast, or the insufficient-data sentinel", body = PredictionResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "prediction"
)]
pub async fn predict_humidity(
    State(state): State<AppState>,
) -> Result<Json<PredictionResponse>, AppError> {
    let history = state.readings.humidity_history().await?;
    let forecast = trend::forecast(&history, MIN_POINTS, HORIZON)?;
    debug!(points = history.len(), ?forecast, "Humidity forecast computed");
    Ok(Json(forecast.into()))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

pub const LIVENESS_MESSAGE: &str = "IoT server running";

pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = StatusResponse),
    ),
    tag = "system"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard.html"))
}

pub async fn dashboard_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../../static/script.js"),
    )
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(ingest_reading, list_readings, set_leds, get_leds, predict_humidity, health),
    components(schemas(
        IngestRequest,
        StatusResponse,
        ReadingDto,
        LedState,
        LedUpdate,
        LedUpdateResponse,
        PredictionResponse,
    )),
    tags(
        (name = "readings",   description = "Sensor reading ingestion and queries"),
        (name = "actuators",  description = "LED flags polled by the device"),
        (name = "prediction", description = "Humidity trend estimation"),
        (name = "system",     description = "System endpoints"),
    ),
    info(
        title = "AIoT Backend API",
        version = "0.1.0",
        description = "REST API for humidity/temperature readings and LED control"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
