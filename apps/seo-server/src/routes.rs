use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use seo_analyzer::{AuditErrorKind, AuditFailure};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::{mock, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze_domain))
        .route("/keyword_finder", post(keyword_finder))
        .route("/on_page_seo_check", post(on_page_seo_check))
        .with_state(state)
}

/// Reads a non-empty string field from a JSON object body.
///
/// Malformed bodies and non-string values count as missing.
fn required_field(body: &Bytes, field: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let text = value.get(field)?.as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn analyze_domain(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(domain) = required_field(&body, "domain") else {
        return bad_request("Domain is required");
    };

    if let Some(cache) = &state.cache {
        match cache.get(&domain).await {
            Ok(Some(record)) => {
                info!(domain, "serving cached analysis");
                return Json(record.into_json()).into_response();
            }
            Ok(None) => {}
            Err(e) => warn!(domain, error = %e, "cache lookup failed"),
        }
    }

    let analysis = mock::domain_analysis(&mut rand::thread_rng());
    let payload = match serde_json::to_value(&analysis) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "failed to serialize analysis");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.put(&domain, payload.clone()).await {
            warn!(domain, error = %e, "failed to cache analysis");
        }
    }

    Json(payload).into_response()
}

async fn keyword_finder(body: Bytes) -> Response {
    let Some(keyword) = required_field(&body, "keyword") else {
        return bad_request("Keyword is required");
    };
    Json(mock::keyword_suggestions(&mut rand::thread_rng(), &keyword)).into_response()
}

async fn on_page_seo_check(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(url) = required_field(&body, "url") else {
        return bad_request("URL is required");
    };

    match state.auditor.try_audit(&url).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            let status = match err.kind() {
                AuditErrorKind::Validation => StatusCode::BAD_REQUEST,
                AuditErrorKind::Fetch | AuditErrorKind::Unexpected => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            error!(url, kind = ?err.kind(), error = %err, "on-page audit failed");
            (status, Json(AuditFailure::from(err))).into_response()
        }
    }
}
