use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tinyurl_core::{validate_target_url, UrlDocument, UrlKey};
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = request.map_err(|e| AppError::Input(e.body_text()))?;
    validate_target_url(&request.url)?;

    let document = state
        .service()
        .generate_tiny_url(&request.url, request.live_forever)
        .await?;

    let response = CreateUrlResponse {
        generated_tiny_url: state.short_url(&document.key),
        url_key: document.key.to_string(),
        expire_time: document.expire_at,
        live_forever: document.never_expires,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_url_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlDocument>> {
    let key = UrlKey::parse(key)?;
    let document = state.service().get_tiny_url(&key).await?;
    Ok(Json(document))
}

pub async fn delete_url_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let key = UrlKey::parse(key)?;
    state.service().delete_tiny_url(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sends the client to the target url with a permanent redirect.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let key = UrlKey::parse(key)?;
    let document = state.service().get_tiny_url(&key).await?;

    let location = HeaderValue::try_from(document.target_url.as_str()).map_err(|e| {
        AppError::Internal(format!("stored url is not a valid location header: {e}"))
    })?;
    debug!(%key, target = %document.target_url, "redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

pub async fn no_route_handler() -> AppError {
    AppError::NoRoute("no route matches the request".to_string())
}
