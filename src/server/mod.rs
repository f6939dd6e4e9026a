//! HTTP API server.
//!
//! Every route is a pass-through: parse the path/query, run one pipeline
//! operation, answer with a small status object.

mod error;
mod handlers;

pub use error::ApiError;

use crate::pipeline::Pipeline;
use axum::{routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub pipeline: Pipeline,
}

/// Status object returned by every route: `{"Success": ...}` or `{"Error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Status {
    Success(String),
    Error(String),
}

/// Build the router with all routes and layers.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/index/{index_name}", get(handlers::index))
        .route("/summary/{index_name}", get(handlers::summary))
        .route("/chapter/{index_name}", get(handlers::chapter))
        .route("/gist/{index_name}", get(handlers::gist))
        .route("/highlight/{index_name}", get(handlers::highlight))
        .route("/query/{index_name}", get(handlers::query))
        .route("/summarize/{index_name}", get(handlers::followup))
        .route("/kindo_query/{index_name}", get(handlers::followup))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Route table shown in the server banner.
pub const ROUTES: &[(&str, &str)] = &[
    ("Liveness", "GET /"),
    ("Index", "GET /index/{index_name}"),
    ("Summary", "GET /summary/{index_name}"),
    ("Chapters", "GET /chapter/{index_name}"),
    ("Gist", "GET /gist/{index_name}"),
    ("Highlights", "GET /highlight/{index_name}"),
    ("Query", "GET /query/{index_name}?prompt="),
    ("Follow-up", "GET /summarize/{index_name}?prompt="),
    ("Follow-up", "GET /kindo_query/{index_name}?prompt="),
];
