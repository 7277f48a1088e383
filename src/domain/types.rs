//! Wire types exchanged between client, stages and collaborators.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::temperature::Readings;

/// Body of `POST /` (gateway) and `POST /weather` (enrichment).
///
/// Only a JSON object is accepted. A missing or `null` `cep` decodes as an
/// empty string so it is rejected by the format check (422) rather than by
/// the decoder (400). Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "cep")]
    pub code: String,
}

impl LookupRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl<'de> Deserialize<'de> for LookupRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LookupRequestVisitor)
    }
}

struct LookupRequestVisitor;

impl<'de> Visitor<'de> for LookupRequestVisitor {
    type Value = LookupRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with a \"cep\" string")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut code: Option<Option<String>> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "cep" {
                if code.is_some() {
                    return Err(de::Error::duplicate_field("cep"));
                }
                code = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(LookupRequest {
            code: code.flatten().unwrap_or_default(),
        })
    }
}

/// Directory (ViaCEP) reply for one postal code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryRecord {
    #[serde(rename = "cep")]
    pub code: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "localidade")]
    pub locality: String,
    #[serde(rename = "uf")]
    pub region: String,
    #[serde(rename = "ibge")]
    pub national_code: String,
    #[serde(rename = "gia")]
    pub regional_code: String,
    #[serde(rename = "ddd")]
    pub area_code: String,
    #[serde(rename = "siafi")]
    pub siafi_code: String,
    /// The directory flags misses with `"erro": true` (older replies) or
    /// `"erro": "true"` (current replies).
    #[serde(rename = "erro", deserialize_with = "flag_or_string", skip_serializing_if = "is_false")]
    pub not_found: bool,
}

fn flag_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Raw weather reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub celsius: f64,
}

/// `200` body of the enrichment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResponse {
    #[serde(rename = "city")]
    pub locality: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl EnrichedResponse {
    pub fn new(locality: impl Into<String>, sample: TemperatureSample) -> Self {
        let readings = Readings::from_celsius(sample.celsius);
        Self {
            locality: locality.into(),
            temp_c: readings.celsius,
            temp_f: readings.fahrenheit,
            temp_k: readings.kelvin,
        }
    }
}

/// Uniform error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
