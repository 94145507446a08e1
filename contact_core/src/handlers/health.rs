//! Health check handler

use crate::{email::DeliveryChannel, models::ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let delivery_mode = match state.contact_service.dispatcher().mode() {
        DeliveryChannel::Provider => "provider",
        DeliveryChannel::Log => "log",
    };

    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "delivery_mode": delivery_mode,
    })))
}
