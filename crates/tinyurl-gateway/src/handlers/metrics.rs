use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

/// Renders the prometheus text exposition.
pub async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let handle = state
        .metrics()
        .ok_or_else(|| AppError::NoRoute("metrics are disabled".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
