//! Trains the resume classifier from a labelled CSV and writes the model artifact.
//!
//! TRAINING_DATA_PATH=data/UpdatedResumeDataSet.csv cargo run --release --bin train

use anyhow::Result;
use tracing::info;

use resume_analyzer::config::TrainConfig;
use resume_analyzer::logging::init_tracing;
use resume_analyzer::training::run_training;

fn main() -> Result<()> {
    let config = TrainConfig::from_env()?;
    init_tracing(&config.rust_log);

    let model = run_training(&config)?;
    info!(
        "Training complete: {} categories, held-out accuracy {:.4}",
        model.pipeline.classes().len(),
        model.report.accuracy
    );
    Ok(())
}
