use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/technicians", post(handlers::technicians::create_technician))
        .route("/api/technicians", get(handlers::technicians::list_technicians))
}
