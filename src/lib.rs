pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod rate_limit;
pub mod state;
pub mod upstream;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers::{advisor_handler, health_handler, metrics_handler, root_handler};
use crate::rate_limit::limit_requests;
use crate::state::AppState;

// Builds the service. Only the advisor route is rate limited, the root
// banner and the operational endpoints answer regardless of quota, so
// GET / no longer counts against a client's quota as it once did.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/medical-advisor", post(advisor_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_requests));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .merge(api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
