//! Text classification pipeline: normalized text → TF-IDF → softmax logistic regression.
//!
//! Training fits a [`Pipeline`] and persists it as a [`PipelineArtifact`]; the server loads
//! the artifact once at startup and only ever reads from it.

pub mod artifact;
pub mod logistic;
pub mod normalizer;
pub mod stopwords;
pub mod vectorizer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use artifact::{ArtifactMetadata, PipelineArtifact};
pub use logistic::{FitSummary, LogisticRegression, LogisticRegressionConfig};
pub use normalizer::clean_text;
pub use vectorizer::{SparseRow, TfidfVectorizer};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline has not been fitted yet")]
    NotFitted,

    #[error("Cannot fit on an empty corpus")]
    EmptyCorpus,

    #[error("Empty vocabulary: no document contains a term of two or more word characters")]
    EmptyVocabulary,

    #[error("Got {documents} documents but {labels} labels")]
    LengthMismatch { documents: usize, labels: usize },

    #[error("At least two categories are required to train, found {0}")]
    TooFewClasses(usize),

    #[error("Dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Unsupported artifact format version {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },
}

/// Fitted vectorizer + classifier, treated as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl Pipeline {
    pub fn new(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Fits on already-normalized documents.
    pub fn fit(&mut self, documents: &[String], labels: &[String]) -> Result<FitSummary, PipelineError> {
        if documents.len() != labels.len() {
            return Err(PipelineError::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }
        let rows = self.vectorizer.fit_transform(documents)?;
        self.classifier
            .fit(&rows, self.vectorizer.n_features(), labels)
    }

    /// The closed label set, in probability-vector order.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Probability per label in `classes()` order for one normalized document.
    pub fn predict_proba(&self, document: &str) -> Result<Vec<f64>, PipelineError> {
        let row = self.vectorizer.transform(document)?;
        Ok(self.classifier.predict_proba(&row)?.to_vec())
    }

    /// Most probable label for one normalized document.
    pub fn predict(&self, document: &str) -> Result<&str, PipelineError> {
        let row = self.vectorizer.transform(document)?;
        let idx = self.classifier.predict_index(&row)?;
        Ok(self.classes()[idx].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_corpus, trained_pipeline};

    #[test]
    fn test_classes_cover_training_labels() {
        let pipeline = trained_pipeline();
        let mut expected: Vec<String> = sample_corpus().into_iter().map(|(l, _)| l).collect();
        expected.sort();
        expected.dedup();
        assert_eq!(pipeline.classes(), expected.as_slice());
    }

    #[test]
    fn test_predict_matches_argmax_of_proba() {
        let pipeline = trained_pipeline();
        for text in [
            "java spring boot hibernate microservices",
            "recruitment payroll onboarding employee relations",
            "",
            "completely unrelated gardening vocabulary",
        ] {
            let proba = pipeline.predict_proba(text).unwrap();
            let best = logistic::argmax(&proba);
            assert_eq!(pipeline.predict(text).unwrap(), pipeline.classes()[best]);
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_distinctive_documents_get_their_category() {
        let pipeline = trained_pipeline();
        assert_eq!(
            pipeline
                .predict(&clean_text("Java developer: Spring Boot, Hibernate, J2EE"))
                .unwrap(),
            "Java Developer"
        );
        assert_eq!(
            pipeline
                .predict(&clean_text("HR executive handling recruitment and payroll"))
                .unwrap(),
            "HR"
        );
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let mut pipeline = Pipeline::default();
        let err = pipeline
            .fit(&["java".to_string()], &["A".to_string(), "B".to_string()])
            .unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { .. }));
    }

    #[test]
    fn test_unfitted_pipeline_fails_to_predict() {
        let pipeline = Pipeline::default();
        assert!(matches!(
            pipeline.predict_proba("java"),
            Err(PipelineError::NotFitted)
        ));
    }
}
