pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/extract-criteria", post(handlers::handle_extract_criteria))
        .route("/score-resumes", post(handlers::handle_score_resumes))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
