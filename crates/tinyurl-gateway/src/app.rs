use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, delete_url_handler, get_url_handler, health_handler, metrics_handler,
    no_route_handler, redirect_handler,
};
use crate::state::AppState;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Self::router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Builds the router, dropping any request still in flight after `timeout`.
    #[allow(deprecated)]
    pub fn router_with_timeout(state: AppState, timeout: Duration) -> Router {
        Router::new()
            .route("/healthy", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .route("/tinyurlsvc/{key}", get(redirect_handler))
            .route("/api/v0/tinyurlsvc", post(create_url_handler))
            .route(
                "/api/v0/tinyurlsvc/{key}",
                get(get_url_handler).delete(delete_url_handler),
            )
            .fallback(no_route_handler)
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
