//! Classifier service: owns the loaded pipeline at serving time.
//!
//! `AppState` holds it as `Arc<dyn ResumeClassifier>`. The model is loaded once at
//! startup; a failed load is kept as a reason string so every request reports
//! `ModelUnavailable` instead of the process refusing to start.

use std::cmp::Ordering;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::pipeline::{clean_text, Pipeline, PipelineArtifact, PipelineError};

/// Number of ranked categories returned per prediction.
pub const TOP_K: usize = 5;

/// One ranked category with its probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub category: String,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub predicted_category: String,
    /// At most `TOP_K` entries, probability descending.
    pub top_matches: Vec<CategoryMatch>,
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference failed: {0}")]
    Inference(#[from] PipelineError),
}

/// Classifies raw resume text. Implementations must be pure reads over immutable state.
pub trait ResumeClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<PredictionResult, ClassifyError>;
}

/// Serves predictions from a trained [`Pipeline`].
pub struct PipelineClassifier {
    model: Result<Pipeline, String>,
}

impl PipelineClassifier {
    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self {
            model: Ok(pipeline),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: Err(reason.into()),
        }
    }

    /// Loads the artifact at `path`. Never fails: a load error is logged and retained.
    pub fn load(path: &Path) -> Self {
        match PipelineArtifact::load(path) {
            Ok(artifact) => {
                info!(
                    "Model loaded from {} ({} categories, {} features, trained {})",
                    path.display(),
                    artifact.pipeline.classes().len(),
                    artifact.pipeline.vocabulary_size(),
                    artifact.metadata.trained_at
                );
                Self::from_pipeline(artifact.pipeline)
            }
            Err(e) => {
                error!("Model loading failed for {}: {e}", path.display());
                Self::unavailable(format!("failed to load {}: {e}", path.display()))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_ok()
    }
}

impl ResumeClassifier for PipelineClassifier {
    fn classify(&self, text: &str) -> Result<PredictionResult, ClassifyError> {
        let pipeline = self
            .model
            .as_ref()
            .map_err(|reason| ClassifyError::ModelUnavailable(reason.clone()))?;

        let cleaned = clean_text(text);
        let probabilities = pipeline.predict_proba(&cleaned)?;
        Ok(rank_predictions(pipeline.classes(), &probabilities))
    }
}

/// Ranks labels by probability, descending. The sort is stable, so equal probabilities
/// keep label-set order and the arg-max (first maximum) always leads.
pub fn rank_predictions(classes: &[String], probabilities: &[f64]) -> PredictionResult {
    let mut ranked: Vec<(&String, f64)> = classes.iter().zip(probabilities.iter().copied()).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let top_matches: Vec<CategoryMatch> = ranked
        .into_iter()
        .take(TOP_K)
        .map(|(category, probability)| CategoryMatch {
            category: category.clone(),
            probability,
        })
        .collect();

    let predicted_category = top_matches
        .first()
        .map(|m| m.category.clone())
        .unwrap_or_default();

    PredictionResult {
        predicted_category,
        top_matches,
    }
}
