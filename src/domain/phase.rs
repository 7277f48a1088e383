//! Per-request progress through a stage.
//!
//! # State Transitions
//! ```text
//! Received → Decoded → Validated → DownstreamCall → Responded
//!     └──────────┴──────────┴────────────┴──→ Failed(phase)
//! ```
//!
//! No retries: the first failure is terminal for the request.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Received,
    Decoded,
    Validated,
    DownstreamCall,
    Responded,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Received => "received",
            Phase::Decoded => "decoded",
            Phase::Validated => "validated",
            Phase::DownstreamCall => "downstream_call",
            Phase::Responded => "responded",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
