use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{check_unit_interval, SchemaError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    Wait,
}

/// Buy/wait verdict for one priced game, produced by the decision agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PurchaseDecision {
    pub recommendation: Recommendation,
    /// Detailed explanation for the recommendation.
    pub reason: String,
    /// Confidence level between 0 and 1.
    pub confidence: f64,
}

impl PurchaseDecision {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unit_interval("confidence", self.confidence)
    }
}

impl fmt::Display for PurchaseDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.recommendation {
            Recommendation::Buy => "buy",
            Recommendation::Wait => "wait",
        };
        write!(f, "{verdict} (confidence {:.2}): {}", self.confidence, self.reason)
    }
}
