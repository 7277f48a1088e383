//! Request failure taxonomy shared by both stages.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `MalformedInput` | 400 | `invalid request body` |
//! | `InvalidFormat` | 422 | `invalid zipcode` |
//! | `NotFound` | 404 | `can not find zipcode` |
//! | `WeatherUnavailable` | 500 | `failed to fetch weather data` |
//! | `EnrichmentUnreachable` | 500 | `failed to reach enrichment service` |
//!
//! Method mismatches never get this far; the method router answers them
//! with a plain-text 405.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::domain::{ErrorPayload, InvalidCep, Phase};
use crate::providers::{DirectoryError, WeatherError};

#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid request body: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidFormat(#[from] InvalidCep),

    #[error("can not find zipcode: {0}")]
    NotFound(#[source] DirectoryError),

    #[error("failed to fetch weather data: {0}")]
    WeatherUnavailable(#[source] WeatherError),

    #[error("failed to reach enrichment service: {0}")]
    EnrichmentUnreachable(#[source] reqwest::Error),
}

impl StageError {
    pub fn status(&self) -> StatusCode {
        match self {
            StageError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            StageError::InvalidFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StageError::NotFound(_) => StatusCode::NOT_FOUND,
            StageError::WeatherUnavailable(_) | StageError::EnrichmentUnreachable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message; never includes upstream details.
    pub fn public_message(&self) -> &'static str {
        match self {
            StageError::MalformedInput(_) => "invalid request body",
            StageError::InvalidFormat(_) => "invalid zipcode",
            StageError::NotFound(_) => "can not find zipcode",
            StageError::WeatherUnavailable(_) => "failed to fetch weather data",
            StageError::EnrichmentUnreachable(_) => "failed to reach enrichment service",
        }
    }

    /// Last phase the request completed before failing.
    pub fn phase(&self) -> Phase {
        match self {
            StageError::MalformedInput(_) => Phase::Received,
            StageError::InvalidFormat(_) => Phase::Decoded,
            StageError::NotFound(_)
            | StageError::WeatherUnavailable(_)
            | StageError::EnrichmentUnreachable(_) => Phase::Validated,
        }
    }
}

impl IntoResponse for StageError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorPayload::new(self.public_message()))).into_response()
    }
}

/// Plain-text answer for anything but POST on a lookup route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
