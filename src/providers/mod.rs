//! External collaborators of the enrichment stage.
//!
//! # Data Flow
//! ```text
//! Cep
//!     → directory.rs (postal-code directory → DirectoryRecord.locality)
//!     → weather.rs (locality → TemperatureSample in °C)
//! ```
//!
//! # Design Decisions
//! - Each collaborator is a trait object chosen once at startup
//! - Every call carries the caller's trace context in its headers
//! - Every call is bounded by the client timeout; no retries

use std::time::Duration;

use reqwest::Client;

pub mod directory;
pub mod weather;

pub use directory::{DirectoryError, DirectoryLookup, ViaCepDirectory};
pub use weather::{
    weather_provider, SimulatedWeatherProvider, WeatherApiProvider, WeatherError, WeatherProvider,
    SIMULATED_CELSIUS,
};

/// Outbound client with a hard per-request deadline.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
