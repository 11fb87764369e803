//! Offline training: CSV → normalize → split → fit → evaluate → save artifact.

pub mod dataset;
pub mod report;
pub mod split;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::TrainConfig;
use crate::pipeline::{
    clean_text, ArtifactMetadata, FitSummary, LogisticRegression, LogisticRegressionConfig,
    Pipeline, PipelineArtifact, TfidfVectorizer,
};
use crate::training::dataset::{load_dataset, LabeledResume};
use crate::training::report::ClassificationReport;
use crate::training::split::train_test_split;

/// Hyperparameters for one training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingParams {
    pub max_features: usize,
    pub test_size: f64,
    pub split_seed: u64,
    pub solver: LogisticRegressionConfig,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            max_features: 5000,
            test_size: 0.2,
            split_seed: 42,
            solver: LogisticRegressionConfig::default(),
        }
    }
}

impl From<&TrainConfig> for TrainingParams {
    fn from(config: &TrainConfig) -> Self {
        Self {
            max_features: config.max_features,
            test_size: config.test_size,
            split_seed: config.split_seed,
            solver: LogisticRegressionConfig {
                c: config.regularization_c,
                learning_rate: config.learning_rate,
                max_iter: config.max_iter,
                ..LogisticRegressionConfig::default()
            },
        }
    }
}

/// In-memory result of a training run, before anything is written to disk.
#[derive(Debug)]
pub struct TrainedModel {
    pub pipeline: Pipeline,
    pub report: ClassificationReport,
    pub fit: FitSummary,
    pub training_documents: usize,
}

/// Normalizes, splits, fits and evaluates. Pure: touches no files.
pub fn train_pipeline(records: &[LabeledResume], params: &TrainingParams) -> Result<TrainedModel> {
    let cleaned: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.category.clone(), clean_text(&r.resume)))
        .collect();

    let (train, test) = train_test_split(&cleaned, params.test_size, params.split_seed)?;
    info!(
        "Split {} resumes into {} train / {} test",
        cleaned.len(),
        train.len(),
        test.len()
    );

    let (train_labels, train_docs): (Vec<String>, Vec<String>) = train.into_iter().unzip();
    let mut pipeline = Pipeline::new(
        TfidfVectorizer::new(Some(params.max_features)),
        LogisticRegression::new(params.solver),
    );
    let fit = pipeline
        .fit(&train_docs, &train_labels)
        .context("Failed to fit pipeline")?;
    info!(
        "Fitted {} categories over {} features in {} iterations (loss {:.6}, converged: {})",
        pipeline.classes().len(),
        pipeline.vocabulary_size(),
        fit.iterations,
        fit.final_loss,
        fit.converged
    );

    let (test_labels, test_docs): (Vec<String>, Vec<String>) = test.into_iter().unzip();
    let predictions = test_docs
        .iter()
        .map(|doc| pipeline.predict(doc).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to evaluate on the held-out split")?;
    let report = ClassificationReport::compute(&test_labels, &predictions);

    Ok(TrainedModel {
        pipeline,
        report,
        fit,
        training_documents: train_docs.len(),
    })
}

/// Runs the full training procedure described by `config` and writes the artifact.
pub fn run_training(config: &TrainConfig) -> Result<TrainedModel> {
    info!("Loading training data from {}", config.data_path.display());
    let records = load_dataset(&config.data_path)?;

    let model = train_pipeline(&records, &TrainingParams::from(config))?;
    info!("Held-out evaluation:\n{}", model.report);

    save_model(&model, &config.model_path)?;
    Ok(model)
}

pub fn save_model(model: &TrainedModel, path: &Path) -> Result<()> {
    let artifact = PipelineArtifact::new(
        model.pipeline.clone(),
        ArtifactMetadata {
            trained_at: Utc::now(),
            training_documents: model.training_documents,
            holdout_accuracy: Some(model.report.accuracy),
        },
    );
    artifact
        .save(path)
        .with_context(|| format!("Failed to save model to {}", path.display()))?;
    info!("Model saved to {}", path.display());
    Ok(())
}
