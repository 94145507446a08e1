//! JSON extractor that answers malformed bodies in the contact response shape

use crate::models::ContactResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

pub struct FormJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FormJson(value)),
            Err(rejection) => Err(FormJsonRejection::from(rejection)),
        }
    }
}

#[derive(Debug)]
pub enum FormJsonRejection {
    MissingContentType,
    InvalidBody(String),
}

impl From<JsonRejection> for FormJsonRejection {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => FormJsonRejection::MissingContentType,
            other => FormJsonRejection::InvalidBody(other.body_text()),
        }
    }
}

impl IntoResponse for FormJsonRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            FormJsonRejection::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FormJsonRejection::InvalidBody(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(status = status.as_u16(), "{}", self);

        (status, Json(ContactResponse::malformed())).into_response()
    }
}

impl std::fmt::Display for FormJsonRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormJsonRejection::MissingContentType => write!(f, "Expected a JSON request body"),
            FormJsonRejection::InvalidBody(msg) => write!(f, "Invalid JSON: {}", msg),
        }
    }
}

impl std::error::Error for FormJsonRejection {}
