//! Multinomial (softmax) logistic regression over sparse TF-IDF rows.

use std::collections::{BTreeSet, HashMap};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::pipeline::vectorizer::SparseRow;
use crate::pipeline::PipelineError;

/// Solver settings. The objective is mean cross-entropy plus `||W||² / (2·C·n)`;
/// intercepts are not penalized. The effective step is `learning_rate / (1 + 1/(C·n))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    /// Stop once the objective improves by less than this between iterations.
    pub tolerance: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 1.0,
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Outcome of a training run, for logging.
#[derive(Debug, Clone, Copy)]
pub struct FitSummary {
    pub iterations: usize,
    pub final_loss: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    /// Sorted unique training labels. Probability vectors follow this order.
    classes: Vec<String>,
    /// Shape (n_features, n_classes)
    coefficients: Option<Array2<f64>>,
    /// Shape (n_classes)
    intercepts: Option<Array1<f64>>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionConfig::default())
    }
}

impl LogisticRegression {
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            coefficients: None,
            intercepts: None,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    /// Fits the model with full-batch gradient descent.
    pub fn fit(
        &mut self,
        rows: &[SparseRow],
        n_features: usize,
        labels: &[String],
    ) -> Result<FitSummary, PipelineError> {
        if rows.len() != labels.len() {
            return Err(PipelineError::LengthMismatch {
                documents: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(PipelineError::TooFewClasses(classes.len()));
        }
        for row in rows {
            check_dimensions(row, n_features)?;
        }

        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let targets: Vec<usize> = labels.iter().map(|l| class_index[l.as_str()]).collect();

        let n_classes = classes.len();
        let n = rows.len() as f64;
        let penalty = 1.0 / (self.config.c * n);
        // Step must stay below 1/L, and the L2 term adds `penalty` to L.
        let lr = self.config.learning_rate / (1.0 + penalty);

        let mut weights = Array2::<f64>::zeros((n_features, n_classes));
        let mut intercepts = Array1::<f64>::zeros(n_classes);
        let mut grad_w = Array2::<f64>::zeros((n_features, n_classes));
        let mut grad_b = Array1::<f64>::zeros(n_classes);

        let mut previous_loss = f64::INFINITY;
        let mut summary = FitSummary {
            iterations: 0,
            final_loss: f64::NAN,
            converged: false,
        };

        for iter in 0..self.config.max_iter {
            grad_w.fill(0.0);
            grad_b.fill(0.0);
            let mut loss = 0.0;

            for (row, &target) in rows.iter().zip(&targets) {
                let mut error = softmax(&linear_scores(&weights, &intercepts, row));
                loss -= error[target].max(f64::MIN_POSITIVE).ln();
                error[target] -= 1.0;

                for &(j, value) in row {
                    grad_w.row_mut(j).scaled_add(value, &error);
                }
                grad_b += &error;
            }

            loss = loss / n + 0.5 * penalty * weights.iter().map(|w| w * w).sum::<f64>();

            grad_w /= n;
            grad_w.scaled_add(penalty, &weights);
            grad_b /= n;

            weights.scaled_add(-lr, &grad_w);
            intercepts.scaled_add(-lr, &grad_b);

            summary.iterations = iter + 1;
            summary.final_loss = loss;

            if loss > previous_loss {
                warn!(
                    "Logistic regression loss increased at iteration {}: {previous_loss:.6} -> {loss:.6}",
                    iter + 1
                );
            }
            if has_converged(previous_loss, loss, self.config.tolerance) {
                summary.converged = true;
                debug!("Logistic regression converged at iteration {}", iter + 1);
                break;
            }
            previous_loss = loss;
        }

        self.classes = classes;
        self.coefficients = Some(weights);
        self.intercepts = Some(intercepts);

        Ok(summary)
    }

    /// Class probabilities for one row, in `classes()` order. Sums to 1.
    pub fn predict_proba(&self, row: &SparseRow) -> Result<Array1<f64>, PipelineError> {
        let (weights, intercepts) = self.fitted()?;
        check_dimensions(row, weights.nrows())?;
        Ok(softmax(&linear_scores(weights, intercepts, row)))
    }

    /// Index into `classes()` of the most probable class; the first index wins ties.
    pub fn predict_index(&self, row: &SparseRow) -> Result<usize, PipelineError> {
        let proba = self.predict_proba(row)?;
        Ok(argmax(proba.as_slice().unwrap_or(&[])))
    }

    fn fitted(&self) -> Result<(&Array2<f64>, &Array1<f64>), PipelineError> {
        match (&self.coefficients, &self.intercepts) {
            (Some(w), Some(b)) => Ok((w, b)),
            _ => Err(PipelineError::NotFitted),
        }
    }
}

/// Converged once the loss decreases by less than `tolerance`. A loss that went up
/// has not converged.
fn has_converged(previous_loss: f64, loss: f64, tolerance: f64) -> bool {
    let improvement = previous_loss - loss;
    (0.0..tolerance).contains(&improvement)
}

fn check_dimensions(row: &SparseRow, n_features: usize) -> Result<(), PipelineError> {
    match row.iter().map(|&(j, _)| j).max() {
        Some(j) if j >= n_features => Err(PipelineError::DimensionMismatch {
            expected: n_features,
            got: j + 1,
        }),
        _ => Ok(()),
    }
}

fn linear_scores(weights: &Array2<f64>, intercepts: &Array1<f64>, row: &SparseRow) -> Array1<f64> {
    let mut z = intercepts.clone();
    for &(j, value) in row {
        z.scaled_add(value, &weights.row(j));
    }
    z
}

fn softmax(z: &Array1<f64>) -> Array1<f64> {
    let max_z = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp_z = z.mapv(|x| (x - max_z).exp());
    let sum = exp_z.sum();
    exp_z / sum
}

/// First index holding the maximum value.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
