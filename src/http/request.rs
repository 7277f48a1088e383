//! Request identity and body decoding.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the caller sent none
//! - Echo the ID on the response and forward it to the next stage
//! - Decode the lookup body into `LookupRequest`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Bodies are decoded by hand so decode failures use the uniform error
//!   payload instead of the framework's rejection text

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::domain::LookupRequest;
use crate::http::error::StageError;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Assigns `x-request-id` to inbound requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Copies `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// The request ID assigned by [`set_request_id_layer`], or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

pub fn decode_lookup(body: &[u8]) -> Result<LookupRequest, StageError> {
    serde_json::from_slice(body).map_err(StageError::MalformedInput)
}
