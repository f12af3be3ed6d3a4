use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AreaError {
    #[error("radius must be non-negative")]
    NegativeRadius,

    #[error("radius must be a finite number")]
    NonFinite,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub area: f64,
}

pub fn area(radius: f64) -> Result<f64, AreaError> {
    if !radius.is_finite() {
        return Err(AreaError::NonFinite);
    }
    if radius < 0.0 {
        return Err(AreaError::NegativeRadius);
    }
    Ok(PI * radius * radius)
}

/// Beyond this magnitude an `f64` has no fractional digits left
const MAX_EXACT_INTEGER: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round half away from zero to `places` decimal places.
///
/// Precision finer than the value can hold leaves it unchanged.
pub fn round_to(value: f64, places: u32) -> f64 {
    let Ok(exponent) = i32::try_from(places) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    scaled.round() / factor
}

pub fn circle(radius: f64, precision: Option<u32>) -> Result<Circle, AreaError> {
    let raw = area(radius)?;
    let area = match precision {
        Some(places) => round_to(raw, places),
        None => raw,
    };
    Ok(Circle { radius, area })
}
