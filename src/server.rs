use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::models::payload::CheckinPayload;
use crate::processor::checkin_processor;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
}

pub async fn serve(config: AppConfig, pool: DbPool) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.http_host, config.http_port);
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/checkin", post(checkin))
        .route("/api/ping", get(ping))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

// The check-in page is served from static hosting on a different origin, so
// the API answers any origin and handles the browser preflight.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

async fn ping() -> impl IntoResponse {
    Json(json!({ "ok": true, "msg": "pong" }))
}

async fn checkin(State(state): State<AppState>, Json(payload): Json<CheckinPayload>) -> Response {
    match checkin_processor::handle_checkin(&state.pool, &state.config, payload).await {
        Ok(accepted) => Json(json!({
            "ok": true,
            "msg": "Check-in registrado com sucesso!",
            "id": accepted.driver_id,
            "distance": (accepted.distance_km * 1000.0).round() / 1000.0,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}
