use crate::core::DescriptorError;
use crate::server::{AppState, Payload};
use crate::utils::error::Error;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");

pub async fn descriptor(State(state): State<AppState>) -> Response {
    tracing::debug!("GET descriptor");
    let cors = [(header::ACCESS_CONTROL_ALLOW_ORIGIN, state.allow_origin.clone())];

    match state.source.resolve().await {
        Ok(Payload::Descriptor(descriptor)) => (cors, Json(&*descriptor)).into_response(),
        Ok(Payload::Raw(text)) => (
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, state.allow_origin.clone()),
                (header::CONTENT_TYPE, TEXT_PLAIN),
            ],
            text.to_string(),
        )
            .into_response(),
        Err(e) => error_response(&e, state.allow_origin.clone()),
    }
}

fn error_response(err: &Error, allow_origin: HeaderValue) -> Response {
    let (status, body) = match err {
        Error::Descriptor(e) => {
            let mut body = json!({ "error": e.kind(), "message": e.to_string() });
            match e {
                DescriptorError::Syntax { line, column, .. } => {
                    body["line"] = json!(line);
                    body["column"] = json!(column);
                }
                DescriptorError::Schema { path, .. } => {
                    body["path"] = json!(path.to_string());
                }
            }
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
        other => (
            StatusCode::BAD_GATEWAY,
            json!({ "error": "source", "message": other.to_string() }),
        ),
    };

    tracing::warn!("Descriptor request failed ({}): {}", status, err);
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin)],
        Json(body),
    )
        .into_response()
}

/// Echoes each request header as a `name: value` line.
pub async fn echo_headers(State(state): State<AppState>, headers: HeaderMap) -> Response {
    tracing::debug!("GET headers ({} values)", headers.len());
    let body: String = headers
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, String::from_utf8_lossy(value.as_bytes())))
        .collect();

    (
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, state.allow_origin.clone()),
            (header::CONTENT_TYPE, TEXT_PLAIN),
        ],
        body,
    )
        .into_response()
}
