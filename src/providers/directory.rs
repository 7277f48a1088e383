//! Postal-code directory client (ViaCEP wire format).
//!
//! `GET {base}/ws/{cep}/json/`. A reply flagged with `erro`, a non-2xx
//! status, an undecodable body and a transport error are all misses as far
//! as the caller is concerned; the variants exist for logs and spans.

use async_trait::async_trait;
use axum::http::HeaderMap;
use opentelemetry::Context;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::domain::{Cep, DirectoryRecord};
use crate::observability::inject_context;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("directory returned status {0}")]
    Status(StatusCode),

    #[error("postal code {0} not found")]
    NotFound(String),
}

/// Resolves a postal code to its directory record.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    async fn lookup(&self, cep: &Cep, cx: &Context) -> Result<DirectoryRecord, DirectoryError>;
}

/// ViaCEP-compatible directory over HTTP.
#[derive(Debug, Clone)]
pub struct ViaCepDirectory {
    client: Client,
    base_url: String,
}

impl ViaCepDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn record_url(&self, cep: &Cep) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep)
    }
}

#[async_trait]
impl DirectoryLookup for ViaCepDirectory {
    async fn lookup(&self, cep: &Cep, cx: &Context) -> Result<DirectoryRecord, DirectoryError> {
        let mut headers = HeaderMap::new();
        inject_context(cx, &mut headers);

        let response = self
            .client
            .get(self.record_url(cep))
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }

        let record: DirectoryRecord = response.json().await?;
        if record.not_found || record.locality.is_empty() {
            return Err(DirectoryError::NotFound(cep.to_string()));
        }

        tracing::debug!(cep = %cep, locality = %record.locality, region = %record.region, "Postal code resolved");
        Ok(record)
    }
}
