use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/time-slots", post(handlers::time_slots::create_time_slot))
        .route("/api/time-slots", get(handlers::time_slots::list_time_slots))
        .route("/api/time-slots/:id", delete(handlers::time_slots::delete_time_slot))
}
