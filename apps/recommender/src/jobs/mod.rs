//! Job Source: where the per-request job snapshot comes from.
//!
//! `AppState` holds an `Arc<dyn JobSource>`; handlers never reach for a
//! global database handle. `PgJobSource` is the production backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobRow;

/// Reads the full, current collection of job postings.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<JobRow>, AppError>;
}

/// PostgreSQL-backed job source reading the `jobs` table.
pub struct PgJobSource {
    pool: PgPool,
}

impl PgJobSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobSource for PgJobSource {
    async fn fetch_all(&self) -> Result<Vec<JobRow>, AppError> {
        let jobs = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, description, requirements, salary,
                   location, job_type, company, created_at
            FROM jobs
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Fetched {} jobs from PostgreSQL", jobs.len());
        Ok(jobs)
    }
}
