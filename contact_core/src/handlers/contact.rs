//! Contact form submission endpoint

use crate::{
    extractors::FormJson,
    models::{ContactForm, ContactResponse},
    AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

fn status_for(response: &ContactResponse) -> StatusCode {
    if response.success {
        StatusCode::OK
    } else if response.errors.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    }
}

pub async fn handle_contact_submit(
    State(state): State<AppState>,
    FormJson(form): FormJson<ContactForm>,
) -> impl IntoResponse {
    info!("POST /api/contact");

    let response = state.contact_service.submit(form).await;

    (status_for(&response), Json(response))
}
