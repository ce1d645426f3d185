use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/jobs", post(handlers::jobs::create_job))
        .route("/api/jobs", get(handlers::jobs::list_jobs))
        .route("/api/jobs/stats", get(handlers::jobs::get_stats))
        .route("/api/jobs/:id", get(handlers::jobs::get_job))
        .route("/api/jobs/:id", patch(handlers::jobs::update_job))
        .route("/api/jobs/:id", delete(handlers::jobs::delete_job))
}
