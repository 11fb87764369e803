//! Held-out evaluation: per-category precision / recall / F1 plus averages.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    /// One entry per label seen in either `y_true` or `y_pred`, sorted by label.
    pub categories: Vec<CategoryMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    /// Averaged by support.
    pub weighted_avg: AverageMetrics,
    pub total_support: usize,
}

impl ClassificationReport {
    /// Ratios with a zero denominator are reported as 0.
    pub fn compute(y_true: &[String], y_pred: &[String]) -> Self {
        let labels: BTreeSet<&str> = y_true
            .iter()
            .chain(y_pred.iter())
            .map(String::as_str)
            .collect();

        let categories: Vec<CategoryMetrics> = labels
            .into_iter()
            .map(|label| {
                let mut tp = 0usize;
                let mut predicted = 0usize;
                let mut support = 0usize;
                for (t, p) in y_true.iter().zip(y_pred) {
                    let is_true = t == label;
                    let is_pred = p == label;
                    support += is_true as usize;
                    predicted += is_pred as usize;
                    tp += (is_true && is_pred) as usize;
                }
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                CategoryMetrics {
                    category: label.to_string(),
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support,
                }
            })
            .collect();

        let total = y_true.len().min(y_pred.len());
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();

        let macro_avg = average(&categories, |_| 1.0);
        let weighted_avg = average(&categories, |c| c.support as f64);

        Self {
            categories,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
            total_support: total,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn average(categories: &[CategoryMetrics], weight: impl Fn(&CategoryMetrics) -> f64) -> AverageMetrics {
    let total_weight: f64 = categories.iter().map(&weight).sum();
    if total_weight == 0.0 {
        return AverageMetrics {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        };
    }
    let weighted = |metric: fn(&CategoryMetrics) -> f64| {
        categories.iter().map(|c| metric(c) * weight(c)).sum::<f64>() / total_weight
    };
    AverageMetrics {
        precision: weighted(|c| c.precision),
        recall: weighted(|c| c.recall),
        f1: weighted(|c| c.f1),
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .categories
            .iter()
            .map(|c| c.category.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.categories {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                c.category, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9.2}  {:>9}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total_support
            )?;
        }
        Ok(())
    }
}
