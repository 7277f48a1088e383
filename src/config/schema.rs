//! Configuration schema definitions.
//!
//! One file configures both stages; each binary reads the section for the
//! stage it runs plus `[observability]`. All types derive Serde traits and
//! every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Entry stage (client-facing).
    pub gateway: GatewayConfig,

    /// Second stage (directory + weather enrichment).
    pub enrichment: EnrichmentConfig,

    /// Logging, tracing export and metrics.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Deadline for handling one inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl ListenerConfig {
    fn on_port(port: u16) -> Self {
        Self {
            bind_address: format!("0.0.0.0:{port}"),
            request_timeout_secs: 60,
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::on_port(8080)
    }
}

/// Gateway stage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub listener: ListenerConfig,

    /// Base URL of the enrichment stage; `/weather` is appended.
    pub enrichment_url: String,

    /// Hard bound on the call to the enrichment stage, in seconds.
    pub enrichment_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::on_port(8080),
            enrichment_url: "http://localhost:8081".to_string(),
            enrichment_timeout_secs: 30,
        }
    }
}

/// Enrichment stage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub listener: ListenerConfig,

    /// Base URL of the postal-code directory (ViaCEP-compatible).
    pub directory_url: String,

    /// Base URL of the weather service (WeatherAPI-compatible).
    pub weather_url: String,

    /// Weather service key. When absent the stage reports a fixed simulated
    /// reading instead of calling the weather service.
    pub weather_api_key: Option<String>,

    /// Bound on each directory / weather call, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::on_port(8081),
            directory_url: "https://viacep.com.br".to_string(),
            weather_url: "http://api.weatherapi.com".to_string(),
            weather_api_key: None,
            upstream_timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,

    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// OTLP gRPC collector endpoint; spans are not exported when unset.
    pub otlp_endpoint: Option<String>,

    /// Prometheus scrape listener; metrics are not exposed when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "cep_weather=info,tower_http=info".to_string(),
            otlp_endpoint: None,
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.gateway.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.gateway.enrichment_url, "http://localhost:8081");
        assert_eq!(config.gateway.enrichment_timeout_secs, 30);
        assert_eq!(config.enrichment.listener.bind_address, "0.0.0.0:8081");
        assert!(config.enrichment.weather_api_key.is_none());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.enrichment_url, "http://localhost:8081");
        assert_eq!(config.enrichment.directory_url, "https://viacep.com.br");
    }

    #[test]
    fn test_partial_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [gateway]
            enrichment_url = "http://enrichment:8081"

            [enrichment.listener]
            bind_address = "127.0.0.1:9000"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.enrichment_url, "http://enrichment:8081");
        assert_eq!(config.gateway.enrichment_timeout_secs, 30);
        assert_eq!(config.enrichment.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.enrichment.listener.request_timeout_secs, 60);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
