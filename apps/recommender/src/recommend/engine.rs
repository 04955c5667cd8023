//! Recommendation pipeline: normalize → TF-IDF similarity → exact matches → rank.
//!
//! Pure and synchronous over one job snapshot. The vector space is rebuilt
//! on every call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::models::job::JobRow;
use crate::recommend::matcher::match_count;
use crate::recommend::normalizer::{normalize_terms, requirement_list, NormalizedText};
use crate::recommend::ranker::{rank, Candidate, MAX_RECOMMENDATIONS};
use crate::recommend::tfidf::similarity_scores;

const NO_TITLE: &str = "No title";
const NO_DESCRIPTION: &str = "No description";
const NOT_PROVIDED: &str = "Not Provided";
const UNKNOWN_COMPANY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub name: String,
}

/// A job annotated with its ranking keys for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedJob {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Value,
    pub salary: Value,
    pub location: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub company: CompanySummary,
    pub match_count: usize,
    pub similarity_score: f64,
}

/// Ranks `jobs` against `skills` and returns at most five recommendations.
///
/// Returns an empty list when there are no usable skills, no jobs, or no
/// job has any requirement text.
pub fn recommend(skills: &[String], jobs: &[JobRow]) -> Vec<RecommendedJob> {
    let user = normalize_terms(skills);
    if user.is_empty() {
        warn!("No skills provided in request");
        return Vec::new();
    }
    info!("User skills: {:?}", user.terms);

    if jobs.is_empty() {
        warn!("No jobs found in the data source");
        return Vec::new();
    }

    let documents: Vec<NormalizedText> = jobs
        .iter()
        .map(|job| normalize_terms(requirement_list(job).as_slice()))
        .collect();
    info!("Number of jobs processed: {}", jobs.len());

    if documents.iter().all(|doc| doc.text.is_empty()) {
        warn!("No valid job requirements to process");
        return Vec::new();
    }

    let job_texts: Vec<&str> = documents.iter().map(|doc| doc.text.as_str()).collect();
    // The user side of the similarity uses the raw skills, not the normalized ones.
    let user_text = skills.join(" ");
    let (space, similarities) = similarity_scores(job_texts.as_slice(), &user_text);
    info!(
        "TF-IDF space fitted on {} job requirement texts ({} terms)",
        job_texts.len(),
        space.vocabulary_len()
    );

    let candidates: Vec<Candidate> = documents
        .iter()
        .zip(&similarities)
        .enumerate()
        .map(|(index, (doc, &similarity))| Candidate {
            index,
            match_count: match_count(&user.terms, &doc.terms),
            similarity,
        })
        .collect();
    debug!("Scored candidates: {candidates:?}");

    let ranked = rank(candidates, MAX_RECOMMENDATIONS);
    if ranked.is_empty() {
        info!("No jobs matched the user's skills");
        return Vec::new();
    }

    let recommendations: Vec<RecommendedJob> = ranked
        .iter()
        .map(|c| to_recommendation(&jobs[c.index], c))
        .collect();
    info!("Recommended {} jobs", recommendations.len());
    recommendations
}

fn to_recommendation(job: &JobRow, candidate: &Candidate) -> RecommendedJob {
    RecommendedJob {
        id: job.id.to_string(),
        title: job.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
        description: job
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        requirements: job.requirements.clone().unwrap_or_else(|| json!([])),
        salary: job.salary.clone().unwrap_or_else(|| json!(NOT_PROVIDED)),
        location: job
            .location
            .clone()
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        job_type: job
            .job_type
            .clone()
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        company: CompanySummary {
            name: resolve_company_name(job.company.as_ref()),
        },
        match_count: candidate.match_count,
        similarity_score: candidate.similarity,
    }
}

/// Company is either a plain name or an object with a `name` field.
fn resolve_company_name(company: Option<&Value>) -> String {
    match company {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Object(fields)) => fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_COMPANY)
            .to_string(),
        _ => UNKNOWN_COMPANY.to_string(),
    }
}
