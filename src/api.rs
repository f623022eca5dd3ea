//! HTTP API server for the WhatsApp bridge and remote administration.
//!
//! Provides endpoints for health checks, inbound bridge events, and reading or
//! changing the auto-react settings. Spawned as a background task in the gateway.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use matdev_autoreact::{ReactionEngine, SettingChange};
use matdev_core::config::{ApiConfig, DelayMode};
use matdev_core::message::IncomingMessage;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

type ApiError = (StatusCode, Json<Value>);

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    engine: Arc<ReactionEngine>,
    api_key: Option<String>,
    uptime: Instant,
    /// Queue into the gateway. `None` when no bridge is running.
    tx: Option<mpsc::Sender<IncomingMessage>>,
}

/// `PATCH /api/autoreact` body. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutoReactPatch {
    message_reactions: Option<bool>,
    status_reactions: Option<bool>,
    message_delay: Option<DelayMode>,
    status_delay: Option<DelayMode>,
}

impl AutoReactPatch {
    fn changes(&self) -> Vec<SettingChange> {
        let mut changes = Vec::new();
        if let Some(on) = self.message_reactions {
            changes.push(SettingChange::MessageReactions(on));
        }
        if let Some(on) = self.status_reactions {
            changes.push(SettingChange::StatusReactions(on));
        }
        if let Some(mode) = self.message_delay {
            changes.push(SettingChange::MessageDelay(mode));
        }
        if let Some(mode) = self.status_delay {
            changes.push(SettingChange::StatusDelay(mode));
        }
        changes
    }
}

fn error_json(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(json!({"error": msg.into()})))
}

/// Constant-time string comparison for API token validation.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Check bearer token auth. `Ok(())` if authorized or no key is configured.
fn check_auth(headers: &HeaderMap, api_key: &Option<String>) -> Result<(), ApiError> {
    let Some(key) = api_key else {
        return Ok(());
    };

    let header = headers.get("authorization").ok_or_else(|| {
        error_json(StatusCode::UNAUTHORIZED, "missing Authorization header")
    })?;
    let value = header.to_str().map_err(|_| {
        error_json(StatusCode::UNAUTHORIZED, "invalid Authorization header")
    })?;

    match value.strip_prefix("Bearer ") {
        Some(token) if constant_time_eq(token, key) => Ok(()),
        _ => Err(error_json(StatusCode::UNAUTHORIZED, "invalid token")),
    }
}

/// `GET /api/health`: uptime and de-dup ledger size.
async fn health(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, ApiError> {
    check_auth(&headers, &state.api_key)?;

    Ok(Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "pending_dedup": state.engine.ledger().len(),
    })))
}

/// `POST /api/events`: enqueue an event pushed by the bridge.
async fn events(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<IncomingMessage>, axum::extract::rejection::JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    check_auth(&headers, &state.api_key)?;

    let Json(mut event) = body
        .map_err(|e| error_json(StatusCode::BAD_REQUEST, format!("invalid event: {e}")))?;

    if event.id.trim().is_empty() {
        return Err(error_json(StatusCode::BAD_REQUEST, "id must not be empty"));
    }
    if event.sender_id.trim().is_empty() {
        return Err(error_json(
            StatusCode::BAD_REQUEST,
            "sender_id must not be empty",
        ));
    }
    if event.channel.is_empty() {
        event.channel = "bridge".to_string();
    }

    let tx = state.tx.as_ref().ok_or_else(|| {
        error_json(
            StatusCode::SERVICE_UNAVAILABLE,
            "gateway unavailable: no bridge channel running",
        )
    })?;

    let id = event.id.clone();
    debug!(
        "api event {} {} from {}",
        event.kind.as_str(),
        id,
        event.sender_id
    );
    tx.send(event).await.map_err(|_| {
        warn!("api event {id} dropped: gateway queue closed");
        error_json(StatusCode::SERVICE_UNAVAILABLE, "gateway unavailable")
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({"status": "queued", "id": id})),
    ))
}

/// `GET /api/autoreact`: current settings.
async fn get_autoreact(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, ApiError> {
    check_auth(&headers, &state.api_key)?;
    Ok(Json(json!(state.engine.config())))
}

/// `PATCH /api/autoreact`: partial settings update, persisted.
async fn patch_autoreact(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<AutoReactPatch>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    check_auth(&headers, &state.api_key)?;

    let Json(patch) = body
        .map_err(|e| error_json(StatusCode::BAD_REQUEST, format!("invalid settings: {e}")))?;

    let changes = patch.changes();
    let cfg = if changes.is_empty() {
        state.engine.config()
    } else {
        state.engine.update(&changes)
    };
    Ok(Json(json!(cfg)))
}

/// Build the axum router with shared state.
fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/events", post(events))
        .route("/api/autoreact", get(get_autoreact).patch(patch_autoreact))
        .layer(axum::extract::DefaultBodyLimit::max(256 * 1024))
        .with_state(state)
}

/// Start the API server. Called from `Gateway::run()`.
pub async fn serve(
    config: ApiConfig,
    engine: Arc<ReactionEngine>,
    uptime: Instant,
    tx: Option<mpsc::Sender<IncomingMessage>>,
) {
    let api_key = if config.api_key.is_empty() {
        None
    } else {
        Some(config.api_key.clone())
    };

    let state = ApiState {
        engine,
        api_key,
        uptime,
        tx,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("API server failed to bind to {addr}: {e}");
            return;
        }
    };

    info!("API server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("API server error: {e}");
    }
}
