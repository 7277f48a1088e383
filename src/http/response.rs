//! Response helpers.
//!
//! # Responsibilities
//! - Relay the enrichment stage's reply (status + JSON body) to the client
//! - Serve the health probe
//!
//! # Design Decisions
//! - Relayed bodies are decoded then re-encoded; byte identity is not kept
//! - A relayed body that is not JSON becomes `null`, status unchanged

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub stage: &'static str,
    pub version: &'static str,
}

pub fn health(stage: &'static str) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        stage,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Re-encode a downstream body under `status` with a JSON content type.
pub fn relay_json(status: StatusCode, body: &[u8]) -> Response {
    let payload = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(status = %status, error = %e, "Downstream body is not JSON, relaying null");
            Value::Null
        }
    };
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_relay_keeps_status_and_json() {
        let response = relay_json(StatusCode::NOT_FOUND, br#"{ "message" : "can not find zipcode" }"#);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
        assert_eq!(body_string(response).await, r#"{"message":"can not find zipcode"}"#);
    }

    #[tokio::test]
    async fn test_relay_non_json_is_null() {
        let response = relay_json(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_string(response).await, "null");
    }
}
