//! TF-IDF vector space and cosine similarity.
//!
//! The space is fitted on one batch of documents and discarded afterwards:
//! nothing here is cached across requests.
//!
//! Weighting:
//! - tokens are runs of two or more word characters, case preserved
//! - tf = raw term count in the document
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - every projected vector is L2-normalized

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid token regex"));

/// Splits text into vocabulary tokens. Single-character words are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Sparse, L2-normalized document vector keyed by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: BTreeMap<usize, f64>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.weights.values().all(|w| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(idx, w)| large.weights.get(idx).map(|o| w * o))
            .sum()
    }
}

/// A vocabulary and IDF table fitted on a batch of documents.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfSpace {
    /// Fits the vocabulary and IDF weights on `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<&str> = tokenize(doc.as_ref()).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());

        // BTreeMap iteration gives a sorted, stable vocabulary order.
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Projects `text` into the fitted space. Out-of-vocabulary tokens are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector {
            weights: counts
                .into_iter()
                .map(|(index, tf)| (index, tf * self.idf[index]))
                .collect(),
        };

        let norm = vector.norm();
        if norm > 0.0 {
            for weight in vector.weights.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity in [0, 1]. Returns 0.0 when either vector is all-zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Fits a fresh space on `job_texts` and scores `user_text` against each job.
/// The result is order-aligned with `job_texts`.
pub fn similarity_scores<S: AsRef<str>>(
    job_texts: &[S],
    user_text: &str,
) -> (TfidfSpace, Vec<f64>) {
    let space = TfidfSpace::fit(job_texts);
    let user_vector = space.transform(user_text);
    if user_vector.is_zero() {
        debug!("User skill text shares no terms with the job vocabulary");
    }
    let scores = job_texts
        .iter()
        .map(|text| cosine_similarity(&user_vector, &space.transform(text.as_ref())))
        .collect();
    (space, scores)
}
