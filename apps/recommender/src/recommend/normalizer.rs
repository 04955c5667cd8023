//! Document normalization for skills and job requirements.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::models::job::JobRow;

/// A normalized list of terms in two shapes: the joined text fed to the
/// vectorizer (order and duplicates preserved) and the exact-match set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedText {
    pub text: String,
    pub terms: HashSet<String>,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Lowercases and trims every item, discarding those that end up empty.
pub fn normalize_terms<S: AsRef<str>>(items: &[S]) -> NormalizedText {
    let cleaned: Vec<String> = items
        .iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect();

    NormalizedText {
        text: cleaned.join(" "),
        terms: cleaned.into_iter().collect(),
    }
}

/// Extracts a job's requirement strings from its stored JSON value.
///
/// A missing value is an empty list. A value that is not an array of strings
/// degrades the whole record to an empty list and logs a warning; it never
/// fails the request.
pub fn requirement_list(job: &JobRow) -> Vec<String> {
    let Some(raw) = job.requirements.as_ref() else {
        return Vec::new();
    };

    let items = match raw {
        Value::Array(items) => items,
        other => {
            warn!(
                "Job {} has invalid requirements: {other}",
                job.title.as_deref().unwrap_or("Unknown")
            );
            return Vec::new();
        }
    };

    let strings: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();

    strings.unwrap_or_else(|| {
        warn!(
            "Job {} has non-string requirement entries: {raw}",
            job.title.as_deref().unwrap_or("Unknown")
        );
        Vec::new()
    })
}
