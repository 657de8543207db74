use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::SchemaError;

/// Normalized price snapshot for a single aggregator id.
///
/// `current_price` and `historical_low` come from independent parts of the
/// overview response; no cross-field relation between them is enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceInfo {
    /// Current lowest price at the tracked shop.
    pub current_price: f64,
    /// All-time lowest recorded price.
    pub historical_low: f64,
    /// Current discount as a percentage between 0 and 100.
    pub discount_percent: u8,
    /// Shop name, e.g. "Steam".
    pub store: String,
}

impl PriceInfo {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.current_price < 0.0 {
            return Err(SchemaError::Negative {
                field: "current_price",
                value: self.current_price,
            });
        }
        if self.historical_low < 0.0 {
            return Err(SchemaError::Negative {
                field: "historical_low",
                value: self.historical_low,
            });
        }
        if self.discount_percent > 100 {
            return Err(SchemaError::OutOfRange {
                field: "discount_percent",
                min: 0.0,
                max: 100.0,
                value: f64::from(self.discount_percent),
            });
        }
        Ok(())
    }
}
