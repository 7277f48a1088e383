//! Postal-code (CEP) format validation.
//!
//! A CEP is accepted only as exactly eight ASCII decimal digits. No
//! normalisation is applied: `01310-100` and ` 01310100` are both rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of digits in a postal code.
pub const CEP_LEN: usize = 8;

/// Returns `true` iff `code` is exactly eight ASCII digits.
pub fn validate(code: &str) -> bool {
    code.len() == CEP_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Rejected postal code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zipcode: {0:?}")]
pub struct InvalidCep(pub String);

/// A postal code that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Parse a raw code, rejecting anything [`validate`] refuses.
    pub fn parse(code: &str) -> Result<Self, InvalidCep> {
        if validate(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(InvalidCep(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cep {
    type Err = InvalidCep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
