//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that every upstream URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL {value:?} ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("{field}: must not be blank")]
    Blank { field: &'static str },
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "gateway.listener.bind_address", &config.gateway.listener.bind_address);
    check_timeout(
        &mut errors,
        "gateway.listener.request_timeout_secs",
        config.gateway.listener.request_timeout_secs,
    );
    check_url(&mut errors, "gateway.enrichment_url", &config.gateway.enrichment_url);
    check_timeout(&mut errors, "gateway.enrichment_timeout_secs", config.gateway.enrichment_timeout_secs);

    check_address(&mut errors, "enrichment.listener.bind_address", &config.enrichment.listener.bind_address);
    check_timeout(
        &mut errors,
        "enrichment.listener.request_timeout_secs",
        config.enrichment.listener.request_timeout_secs,
    );
    check_url(&mut errors, "enrichment.directory_url", &config.enrichment.directory_url);
    check_url(&mut errors, "enrichment.weather_url", &config.enrichment.weather_url);
    check_timeout(&mut errors, "enrichment.upstream_timeout_secs", config.enrichment.upstream_timeout_secs);
    if let Some(key) = &config.enrichment.weather_api_key {
        if key.trim().is_empty() {
            errors.push(ValidationError::Blank { field: "enrichment.weather_api_key" });
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        check_address(&mut errors, "observability.metrics_address", addr);
    }
    if let Some(endpoint) = &config.observability.otlp_endpoint {
        if endpoint.trim().is_empty() {
            errors.push(ValidationError::Blank { field: "observability.otlp_endpoint" });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let reason = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => return,
        Ok(url) => format!("unsupported scheme {:?}", url.scheme()),
        Err(e) => e.to_string(),
    };
    errors.push(ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    });
}

fn check_timeout(errors: &mut Vec<ValidationError>, field: &'static str, secs: u64) {
    if secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field });
    }
}
