//! HTTP surface: the invocation trigger, the Gemini relay and the read-only
//! endpoints the operator UI consumes. Recurrence is owned by an external
//! cron that POSTs `/api/execute`; this process keeps no timers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::db::repo::Repo;
use crate::scheduler::Executor;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repo>,
    pub executor: Arc<Executor>,
    pub http: reqwest::Client,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/execute", post(execute))
        .route("/api/gemini-relay", post(gemini_relay))
        .route("/api/articles", get(list_articles))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{post_id}", delete(delete_post))
        .with_state(state)
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

async fn healthz(State(state): State<AppState>) -> Response {
    match state.repo.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Err(e) => error_body(StatusCode::SERVICE_UNAVAILABLE, format!("{:#}", e)),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest {
    #[serde(default)]
    force_execute: bool,
}

/// Invocation trigger. The body is optional; `{"forceExecute": true}`
/// bypasses the due-time evaluation for manual runs.
async fn execute(State(state): State<AppState>, body: Option<Json<ExecuteRequest>>) -> Response {
    let force = body.map(|Json(b)| b.force_execute).unwrap_or(false);
    info!("Execution triggered (force: {})", force);

    match state.executor.run_once(force).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Invocation failed: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRelayRequest {
    prompt: String,
    api_key: String,
    model: String,
    #[serde(default = "default_relay_temperature")]
    temperature: f32,
    #[serde(default = "default_relay_max_tokens")]
    max_tokens: u32,
}

fn default_relay_temperature() -> f32 {
    0.7
}

fn default_relay_max_tokens() -> u32 {
    2048
}

/// Same-origin relay for browser calls to the Generative Language API,
/// which blocks cross-origin requests. Forwards the request server-side and
/// returns the provider's JSON verbatim; no other logic.
async fn gemini_relay(
    State(state): State<AppState>,
    Json(request): Json<GeminiRelayRequest>,
) -> Response {
    match llm_client::gemini_generate_raw(
        &state.http,
        &request.api_key,
        &request.model,
        &request.prompt,
        request.temperature,
        request.max_tokens,
    )
    .await
    {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            error!("Gemini relay failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn list_articles(State(state): State<AppState>) -> Response {
    match state.repo.list_articles(50).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct SiteQuery {
    wordpress_config_id: i32,
}

async fn site_client(
    state: &AppState,
    wordpress_config_id: i32,
) -> Result<wordpress_client::Client, Response> {
    let site = state
        .repo
        .wordpress_config(wordpress_config_id)
        .await
        .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)))?
        .ok_or_else(|| {
            error_body(
                StatusCode::NOT_FOUND,
                format!("WordPress config {} not found", wordpress_config_id),
            )
        })?;

    wordpress_client::Client::new(
        state.http.clone(),
        &site.url,
        &site.username,
        &site.application_password,
    )
    .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn list_posts(State(state): State<AppState>, Query(query): Query<SiteQuery>) -> Response {
    let client = match site_client(&state, query.wordpress_config_id).await {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client.list_posts(20).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => error_body(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
    Query(query): Query<SiteQuery>,
) -> Response {
    let client = match site_client(&state, query.wordpress_config_id).await {
        Ok(client) => client,
        Err(response) => return response,
    };

    match client.delete_post(post_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => error_body(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
