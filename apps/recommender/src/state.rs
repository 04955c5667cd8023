use std::sync::Arc;

use crate::jobs::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable job source. Default: PgJobSource over the service's pool.
    pub jobs: Arc<dyn JobSource>,
}
