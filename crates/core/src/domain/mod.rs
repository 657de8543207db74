pub mod decision;
pub mod game;
pub mod price;
pub mod selection;
pub mod steam;

use thiserror::Error;

/// Violation of a declared field invariant on a decoded schema type.
///
/// Raised after deserialization, before a value is allowed to flow into the
/// pipeline. Structural mismatches (missing fields, wrong types) surface as
/// `serde_json` errors earlier in the decode path; this covers the numeric
/// range constraints the wire format cannot express.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange { field: &'static str, min: f64, max: f64, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

pub(crate) fn check_unit_interval(field: &'static str, value: f64) -> Result<(), SchemaError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SchemaError::OutOfRange { field, min: 0.0, max: 1.0, value });
    }
    Ok(())
}
