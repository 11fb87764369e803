use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use resume_analyzer::analysis::classifier::PipelineClassifier;
use resume_analyzer::config::Config;
use resume_analyzer::logging::init_tracing;
use resume_analyzer::routes::build_router;
use resume_analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // A missing or corrupt model is not fatal: /analyze answers 500 until it is fixed.
    let classifier = PipelineClassifier::load(&config.model_path);
    if !classifier.is_ready() {
        warn!("Serving without a model; prediction requests will fail");
    }

    let state = AppState {
        classifier: Arc::new(classifier),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
