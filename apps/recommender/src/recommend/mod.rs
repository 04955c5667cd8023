// Job recommendation core.
// Normalizes skills and requirements, scores TF-IDF similarity, counts exact
// matches and ranks. Everything is recomputed per request from a fresh snapshot.

pub mod engine;
pub mod handlers;
pub mod matcher;
pub mod normalizer;
pub mod ranker;
pub mod tfidf;
