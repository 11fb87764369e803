pub mod ping;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::{handlers, upload};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping::ping_handler))
        .route("/analyze", post(handlers::handle_analyze))
        // Path the web frontend calls through its gateway
        .route("/api/analyze", post(handlers::handle_analyze))
        .route(
            "/analyze/upload",
            post(upload::handle_analyze_upload)
                .layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
