use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/preferences", get(handlers::preferences::get_preferences))
        .route(
            "/api/preferences/email",
            put(handlers::preferences::update_email_preference),
        )
        .route(
            "/api/preferences/sms",
            put(handlers::preferences::update_sms_preference),
        )
}
