//! Request handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::server::AppState;
use crate::translate::{TranslateRequest, Transport};

/// `POST /translate`: race the request across the pool.
///
/// The body is always a `TranslateResponse`; when every backend failed it is
/// the zero response and the status is 503.
pub async fn translate<T: Transport>(
    State(state): State<AppState<T>>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    tracing::debug!(
        source_lang = %request.source_lang,
        target_lang = %request.target_lang,
        chars = request.text.chars().count(),
        "Translation requested"
    );

    let response = state.dispatcher.dispatch(&request).await;
    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response)).into_response()
}

/// `GET /backends`: weights and latest latency of every backend.
pub async fn backends<T: Transport>(State(state): State<AppState<T>>) -> Response {
    Json(state.dispatcher.backends()).into_response()
}

/// `GET /health`
pub async fn health<T: Transport>(State(state): State<AppState<T>>) -> Response {
    Json(json!({
        "status": "ok",
        "backends": state.dispatcher.backend_count(),
        "fan_out": state.dispatcher.fan_out(),
    }))
    .into_response()
}
