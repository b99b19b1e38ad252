//! Items Web Server
//!
//! A REST API exposing an item catalogue through every HTTP method, plus a
//! form login endpoint and a file upload endpoint.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: in-memory map by default, PostgreSQL with sqlx when `DATABASE_URL` is set
//! - **Format**: JSON requests/responses, URL-encoded and multipart forms
//!
//! `build_router` assembles the full application so tests can drive it
//! without binding a socket.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{RequestId, request_id_middleware};
pub use crate::state::AppState;

/// Build the HTTP router with all routes and middleware.
///
/// Request bodies above `max_body_bytes` are rejected with 413.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        // Item collection
        .route(
            "/items/",
            post(handlers::items::create_item).options(handlers::items::options_items),
        )
        .route(
            "/items",
            post(handlers::items::create_item).options(handlers::items::options_items),
        )
        // Single item, one handler per method
        .route(
            "/items/{item_id}",
            get(handlers::items::read_item)
                .head(handlers::items::head_item)
                .put(handlers::items::replace_item)
                .patch(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        // Forms
        .route("/login/", post(handlers::login::login))
        .route("/uploadfile/", post(handlers::uploads::upload_file))
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .and_then(|id| id.0.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        // Outermost, so the trace span already sees the request id
        .layer(axum_middleware::from_fn(request_id_middleware))
        .with_state(state)
}
