//! On-disk envelope for a trained [`Pipeline`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::{Pipeline, PipelineError};

/// Bumped whenever the serialized layout of [`PipelineArtifact`] changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub trained_at: DateTime<Utc>,
    pub training_documents: usize,
    /// Accuracy on the held-out split, when one was evaluated.
    pub holdout_accuracy: Option<f64>,
}

/// bincode-encoded `{format_version, metadata, pipeline}`.
/// `format_version` must stay the first field: `load` peeks at it before decoding the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    format_version: u32,
    pub metadata: ArtifactMetadata,
    pub pipeline: Pipeline,
}

impl PipelineArtifact {
    pub fn new(pipeline: Pipeline, metadata: ArtifactMetadata) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            metadata,
            pipeline,
        }
    }

    /// Writes the artifact, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let encoded = bincode::serialize(self)?;
        fs::write(path, encoded)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let data = fs::read(path)?;

        let found: u32 = bincode::deserialize(&data)?;
        if found != FORMAT_VERSION {
            return Err(PipelineError::UnsupportedFormat {
                found,
                expected: FORMAT_VERSION,
            });
        }

        Ok(bincode::deserialize(&data)?)
    }
}
