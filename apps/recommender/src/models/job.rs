use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting as stored upstream. `requirements`, `salary` and `company`
/// are kept as raw JSON since their shape is not enforced by the writers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Value>,
    pub salary: Option<Value>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub company: Option<Value>,
    pub created_at: DateTime<Utc>,
}
