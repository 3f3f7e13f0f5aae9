//! Location API Server
//!
//! HTTP API exposing create/read/update/delete over location records.
//! Handlers only translate between HTTP and the LocationService.

use crate::application::{LocationError, LocationService};
use crate::domain::entities::{Location, LocationPatch, NewLocation};
use crate::infrastructure::shutdown_signal;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<LocationService>,
}

impl ApiState {
    pub fn new(service: Arc<LocationService>) -> Self {
        Self { service }
    }
}

/// Handler error, rendered as the matching status code.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] LocationError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            LocationError::InvalidAddress(status) => {
                tracing::info!("response: 403 Forbidden: invalid address ({})", status);
                StatusCode::FORBIDDEN.into_response()
            }
            LocationError::NotFound => {
                tracing::info!("response: 404 Not Found");
                StatusCode::NOT_FOUND.into_response()
            }
            LocationError::BadRequest(msg) => {
                tracing::info!("response: 400 Bad Request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": msg })),
                )
                    .into_response()
            }
            err => {
                tracing::error!("response: 502 Bad Gateway: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(serde_json::json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Build the router with every route attached.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/locations", post(create_handler))
        .route(
            "/locations/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API Server for location records.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, service: Arc<LocationService>) -> Self {
        Self {
            listen_addr,
            state: ApiState::new(service),
        }
    }

    /// Run the API server until a shutdown signal arrives.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("location API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("location API stopped");
        Ok(())
    }
}

/// Decode a create body. Anything unparsable becomes empty fields and is
/// left for the resolver to reject.
fn parse_new_location(body: &[u8]) -> NewLocation {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::warn!("unparsable create body, using empty fields: {}", e);
        NewLocation::default()
    })
}

/// Decode an update body. It must be a JSON object whose known keys hold strings.
fn parse_patch(body: &[u8]) -> Result<LocationPatch, LocationError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| LocationError::BadRequest(e.to_string()))?;
    if !value.is_object() {
        return Err(LocationError::BadRequest("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| LocationError::BadRequest(e.to_string()))
}

// Handler functions

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn create_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let new = parse_new_location(&body);
    tracing::info!("POST request: {:?}", new);

    let location = state.service.create(new).await?;

    tracing::info!("response: 201 Created id={}", location.id);
    Ok((StatusCode::CREATED, Json(location)))
}

async fn get_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Location>, ApiError> {
    tracing::info!("GET request: id={}", id);

    let location = state.service.get(&id).await?;

    tracing::info!("response: 200 OK id={}", location.id);
    Ok(Json(location))
}

async fn update_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    tracing::info!("PUT request: id={}", id);

    let location = state
        .service
        .update_with(&id, || parse_patch(&body))
        .await?;

    // Updates answer 201 like creates do.
    tracing::info!("response: 201 Created id={}", location.id);
    Ok((StatusCode::CREATED, Json(location)))
}

async fn delete_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("DELETE request: id={}", id);

    state.service.delete(&id).await?;

    tracing::info!("response: 200 OK");
    Ok(StatusCode::OK)
}
