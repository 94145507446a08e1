//! Last-resort boundary: a panic anywhere in a handler becomes the generic failure reply

use crate::models::ContactResponse;
use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<Body>;

pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "request handler panicked");

    let body = serde_json::to_vec(&ContactResponse::send_failed()).unwrap_or_default();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
