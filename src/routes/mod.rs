//! Router assembly.

mod items;
mod status;

pub use items::item_routes;
pub use status::status_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// (method, path) of every route served by [`build_app`].
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/add"),
    ("POST", "/add"),
    ("GET", "/edit/:id"),
    ("POST", "/edit/:id"),
    ("POST", "/delete/:id"),
    ("GET", "/health"),
    ("GET", "/ready"),
];

/// Item pages plus health and readiness, with request tracing and a body size limit.
pub fn build_app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(item_routes(state.clone()))
        .merge(status_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(settings.max_body_bytes)),
        )
}

/// Log the route table, one line per route.
pub fn log_routes() {
    for &(method, path) in ROUTE_TABLE {
        tracing::info!(method, path, "route");
    }
}
