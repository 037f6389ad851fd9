// HTTP handlers: JSON envelopes around the resolver and the feedback sink

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{error, warn};

use super::AppState;
use crate::feedback::FeedbackRecord;
use crate::resolver::{resolve_link, CanonicalResult, ResolveError};

/// First `url` value among the query pairs; repeats are ignored
fn first_url(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.as_str())
}

#[derive(Serialize)]
struct SuccessEnvelope<'a> {
    ok: bool,
    #[serde(flatten)]
    result: &'a CanonicalResult,
}

#[derive(Serialize)]
struct AttemptReport {
    provider: &'static str,
    error: String,
}

/// JSON body with `cache-control: no-store`
fn envelope(status: StatusCode, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
    response
}

fn failure(status: StatusCode, message: &str) -> Response {
    envelope(status, json!({ "ok": false, "error": message }))
}

pub async fn download(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    match resolve_link(&state.resolver, first_url(&pairs)).await {
        Ok(result) => match serde_json::to_value(SuccessEnvelope { ok: true, result: &result }) {
            Ok(body) => envelope(StatusCode::OK, body),
            Err(e) => {
                error!(error = %e, "failed to encode result");
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "ok": false, "error": "Server error", "detail": e.to_string() }),
                )
            }
        },
        Err(e @ (ResolveError::MissingReference | ResolveError::InvalidReference(_))) => {
            failure(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(ResolveError::AllProvidersExhausted(exhausted)) => {
            let attempts: Vec<AttemptReport> = exhausted
                .attempts()
                .iter()
                .map(|a| AttemptReport {
                    provider: a.provider(),
                    error: a.to_string(),
                })
                .collect();
            envelope(
                StatusCode::BAD_GATEWAY,
                json!({
                    "ok": false,
                    "error": "All providers failed",
                    "detail": exhausted.detail(),
                    "attempts": attempts,
                }),
            )
        }
    }
}

pub async fn feedback(State(state): State<AppState>, body: Bytes) -> Response {
    let parsed: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => return failure(StatusCode::BAD_REQUEST, "Bad JSON"),
        Ok(value) => value,
    };

    let record = match FeedbackRecord::from_json(&parsed, OffsetDateTime::now_utc()) {
        Ok(record) => record,
        Err(e) => {
            error!(error = %e, "failed to build feedback record");
            return envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "ok": false, "error": "Server error", "detail": e.to_string() }),
            );
        }
    };

    match state.feedback.write(&record).await {
        Ok(()) => envelope(StatusCode::OK, json!({ "ok": true })),
        Err(e) => {
            warn!(error = %e, "feedback sink failed");
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "ok": false, "error": "Server error", "detail": e.to_string() }),
            )
        }
    }
}

pub async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub async fn health() -> Response {
    envelope(StatusCode::OK, json!({ "ok": true }))
}
