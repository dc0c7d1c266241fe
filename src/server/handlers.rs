use super::types::HealthResponse;
use crate::translator::{InvocationResponse, Translator};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    /// Return the invocation response as a JSON document instead of proxying it.
    pub envelope: bool,
}

/// Wraps the raw request body the way a proxy gateway does and runs the translator.
/// Bodies that are not valid UTF-8 are decoded lossily and fail later as malformed JSON.
pub async fn invoke(State(state): State<AppState>, body: Bytes) -> Response {
    info!("Received invocation with {} byte body", body.len());

    let event = json!({ "body": String::from_utf8_lossy(&body) });
    let response = state.translator.handle(event).await;

    into_http(response, state.envelope)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_id: state.translator.model_id().to_string(),
        convention: format!("{:?}", state.translator.convention()).to_lowercase(),
    })
}

fn into_http(response: InvocationResponse, envelope: bool) -> Response {
    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Dropping invalid response header: {}", name),
        }
    }

    if envelope {
        return (StatusCode::OK, headers, Json(response)).into_response();
    }

    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    (status, headers, response.body).into_response()
}
