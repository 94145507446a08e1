//! Router assembly

use super::{contact::handle_contact_submit, health::handle_health};
use crate::{middleware::rate_limit::rate_limit_middleware, models::ApiResponse, AppState};
use axum::{
    extract::State,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let contact = Router::new()
        .route("/api/contact", post(handle_contact_submit))
        .route_layer(axum_middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .merge(contact)
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "GET /health",
            "contact": "POST /api/contact"
        }
    })))
}
