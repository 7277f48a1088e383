//! Domain types shared by both stages.
//!
//! # Data Flow
//! ```text
//! client JSON body
//!     → types.rs (LookupRequest decode)
//!     → cep.rs (format check, run independently by each stage)
//!     → [directory lookup → locality] (providers)
//!     → [weather lookup → TemperatureSample] (providers)
//!     → temperature.rs (°C → °F / K, one-decimal rounding)
//!     → types.rs (EnrichedResponse encode)
//! ```
//!
//! # Design Decisions
//! - Everything here is pure: no I/O, no clocks, no globals
//! - Fahrenheit and Kelvin are always derived from Celsius, never sourced
//! - Validation lives in one function but is called by both stages

pub mod cep;
pub mod phase;
pub mod temperature;
pub mod types;

pub use cep::{validate, Cep, InvalidCep};
pub use phase::Phase;
pub use temperature::Readings;
pub use types::{DirectoryRecord, EnrichedResponse, ErrorPayload, LookupRequest, TemperatureSample};
