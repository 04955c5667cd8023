//! Axum route handlers for the Recommendation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::AppError;
use crate::recommend::engine::{recommend, RecommendedJob};
use crate::recommend::normalizer::normalize_terms;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub recommended_jobs: Vec<RecommendedJob>,
}

impl PredictResponse {
    fn empty() -> Self {
        Self {
            recommended_jobs: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /predict
///
/// Ranks the current job collection against the submitted skills and
/// returns up to five recommendations. No usable skills, no jobs, or no
/// matches all yield an empty list; a failing job source yields a 500.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            error!("No JSON data provided in request");
            AppError::Validation("No JSON data provided".to_string())
        }
        other => AppError::Validation(other.body_text()),
    })?;

    let skills = request.skills.unwrap_or_default();
    if normalize_terms(skills.as_slice()).is_empty() {
        warn!("No skills provided in request");
        return Ok(Json(PredictResponse::empty()));
    }

    let jobs = state.jobs.fetch_all().await?;

    // CPU-bound ranking: spawn_blocking to avoid blocking the async executor.
    let recommended_jobs = tokio::task::spawn_blocking(move || recommend(&skills, &jobs))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in ranking: {e}"))
        })?;

    Ok(Json(PredictResponse { recommended_jobs }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::jobs::testing::{make_job, FailingJobSource, StaticJobSource};
    use crate::jobs::JobSource;
    use crate::routes::build_router;

    fn router_with(source: impl JobSource + 'static) -> Router {
        build_router(AppState {
            jobs: Arc::new(source),
        })
    }

    async fn post_predict(router: Router, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri("/predict");
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn sample_jobs() -> StaticJobSource {
        StaticJobSource(vec![
            make_job("job 1", json!(["python", "java"])),
            make_job("job 2", json!(["python", "sql", "aws"])),
            make_job("job 3", json!(["excel"])),
            make_job("job 4", json!("notalist")),
        ])
    }

    #[tokio::test]
    async fn test_predict_ranks_by_match_count() {
        let (status, body) = post_predict(
            router_with(sample_jobs()),
            Some(r#"{"skills": ["Python", "SQL"]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["recommended_jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["title"], "job 2");
        assert_eq!(jobs[0]["match_count"], 2);
        assert_eq!(jobs[1]["title"], "job 1");
        assert_eq!(jobs[1]["match_count"], 1);
        assert_eq!(jobs[0]["company"]["name"], "Acme");
    }

    #[tokio::test]
    async fn test_predict_empty_skills_returns_empty_list() {
        let (status, body) =
            post_predict(router_with(sample_jobs()), Some(r#"{"skills": []}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"recommended_jobs": []}));
    }

    #[tokio::test]
    async fn test_predict_missing_skills_returns_empty_list() {
        let (status, body) = post_predict(router_with(sample_jobs()), Some("{}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"recommended_jobs": []}));
    }

    #[tokio::test]
    async fn test_predict_whitespace_skills_skip_job_source() {
        // A failing source proves the short-circuit happens before any read.
        let (status, body) = post_predict(
            router_with(FailingJobSource),
            Some(r#"{"skills": ["  ", ""]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"recommended_jobs": []}));
    }

    #[tokio::test]
    async fn test_predict_no_jobs_returns_empty_list() {
        let (status, body) = post_predict(
            router_with(StaticJobSource(vec![])),
            Some(r#"{"skills": ["rust"]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"recommended_jobs": []}));
    }

    #[tokio::test]
    async fn test_predict_missing_body_is_validation_error() {
        let (status, body) = post_predict(router_with(sample_jobs()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "No JSON data provided");
    }

    #[tokio::test]
    async fn test_predict_malformed_json_is_validation_error() {
        let (status, body) =
            post_predict(router_with(sample_jobs()), Some(r#"{"skills": "#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_predict_source_failure_is_reported() {
        let (status, body) = post_predict(
            router_with(FailingJobSource),
            Some(r#"{"skills": ["rust"]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
        assert!(body.get("recommended_jobs").is_none());
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = router_with(sample_jobs())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "job-recommender");
    }
}
