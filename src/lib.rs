//! Postal-code weather lookup: a two-stage HTTP pipeline.
//!
//! The gateway validates a CEP and forwards it; the enrichment stage
//! resolves it to a city and attaches the current temperature in °C, °F
//! and K. One W3C trace spans both stages.

pub mod config;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod providers;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Stage};
