use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_MODEL_PATH: &str = "models/resume_classifier.bin";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            port: parse_or(&lookup, "PORT", 5000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Training configuration for the `train` binary.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// CSV with `Category` and `Resume` columns.
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub max_features: usize,
    pub test_size: f64,
    pub split_seed: u64,
    pub max_iter: usize,
    pub learning_rate: f64,
    pub regularization_c: f64,
    pub rust_log: String,
}

impl TrainConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = TrainConfig {
            data_path: lookup("TRAINING_DATA_PATH")
                .context("Required environment variable 'TRAINING_DATA_PATH' is not set")?
                .into(),
            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            max_features: parse_or(&lookup, "MAX_FEATURES", 5000)?,
            test_size: parse_or(&lookup, "TEST_SIZE", 0.2)?,
            split_seed: parse_or(&lookup, "SPLIT_SEED", 42)?,
            max_iter: parse_or(&lookup, "MAX_ITER", 1000)?,
            learning_rate: parse_or(&lookup, "LEARNING_RATE", 1.0)?,
            regularization_c: parse_or(&lookup, "REGULARIZATION_C", 1.0)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        };

        if !(config.test_size > 0.0 && config.test_size < 1.0) {
            bail!("TEST_SIZE must be between 0 and 1 (exclusive), got {}", config.test_size);
        }
        if config.max_features == 0 {
            bail!("MAX_FEATURES must be at least 1");
        }
        if config.regularization_c <= 0.0 || config.learning_rate <= 0.0 {
            bail!("REGULARIZATION_C and LEARNING_RATE must be positive");
        }

        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
    }
}
