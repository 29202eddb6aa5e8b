pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{routing::get, Router};
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::{actuator_state::ActuatorState, sensors::ReadingService};
use handlers::ApiDoc;

/// Everything a handler may reach. Cloned per request; all fields are handles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub readings: ReadingService,
    pub actuators: ActuatorState,
    /// Zone timestamps are rendered in.
    pub timezone: Tz,
}

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/api/data",
            get(handlers::list_readings).post(handlers::ingest_reading),
        )
        .route("/api/led", get(handlers::get_leds).post(handlers::set_leds))
        .route("/api/predict", get(handlers::predict_humidity))
        .with_state(state)
        .split_for_parts();

    router
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/dashboard", get(handlers::dashboard))
        .route("/static/script.js", get(handlers::dashboard_script))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(TraceLayer::new_for_http())
}
