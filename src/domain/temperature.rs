//! Temperature scale conversion.
//!
//! Rounding rule: round half away from zero on the value scaled by ten
//! (`f64::round`), applied identically to all three scales. `-0.0` is
//! normalised to `0.0` so it never reaches the wire as `-0.0`.

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    // Adding 0.0 turns -0.0 into 0.0.
    (value * 10.0).round() / 10.0 + 0.0
}

/// One Celsius sample expressed in the three scales, already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl Readings {
    /// Derive all scales from the raw Celsius value, then round each.
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius: round_one_decimal(celsius),
            fahrenheit: round_one_decimal(celsius_to_fahrenheit(celsius)),
            kelvin: round_one_decimal(celsius_to_kelvin(celsius)),
        }
    }
}
