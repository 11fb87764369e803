//! TF-IDF vectorizer over normalized resume text.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

/// Terms are runs of two or more word characters; single letters carry no signal.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// A sparse feature row: `(feature index, weight)` pairs sorted by index.
pub type SparseRow = Vec<(usize, f64)>;

/// TF-IDF vectorizer with smoothed IDF and L2-normalized rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Keep at most this many terms, ranked by corpus term count.
    max_features: Option<usize>,
    /// term -> feature index; indices follow lexicographic term order
    vocabulary: HashMap<String, usize>,
    /// idf weight per feature index
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(Some(5000))
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: Option<usize>) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// Number of features (vocabulary size) after fitting.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Learns the vocabulary and IDF weights from a corpus of normalized documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<(), PipelineError> {
        if documents.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }

        // BTreeMap keeps terms in lexicographic order for stable indices.
        let mut term_count: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            for (term, count) in count_terms(doc) {
                *term_count.entry(term).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if term_count.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        let mut terms: Vec<&str> = term_count.keys().copied().collect();
        if let Some(limit) = self.max_features {
            if terms.len() > limit {
                // Stable sort: equal counts keep lexicographic order.
                terms.sort_by(|a, b| term_count[b].cmp(&term_count[a]));
                terms.truncate(limit);
                terms.sort_unstable();
            }
        }

        let n_docs = documents.len() as f64;
        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq[term] as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(())
    }

    /// Maps one normalized document to an L2-normalized sparse TF-IDF row.
    /// Unknown terms are ignored; a document with no known terms yields an empty row.
    pub fn transform(&self, document: &str) -> Result<SparseRow, PipelineError> {
        if !self.is_fitted() {
            return Err(PipelineError::NotFitted);
        }

        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for (term, count) in count_terms(document) {
            if let Some(&idx) = self.vocabulary.get(term) {
                weights.insert(idx, count as f64 * self.idf[idx]);
            }
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }

        Ok(weights.into_iter().collect())
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseRow>, PipelineError> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}

/// Raw term counts for one (already normalized) document.
fn count_terms(document: &str) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for m in TOKEN_PATTERN.find_iter(document) {
        *counts.entry(m.as_str()).or_insert(0) += 1;
    }
    counts
}
