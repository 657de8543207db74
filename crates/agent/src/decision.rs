use std::sync::Arc;

use dealscout_core::{PriceInfo, PurchaseDecision};
use thiserror::Error;
use tracing::info;

use crate::invoke::invoke_structured;
use crate::llm::{LlmClient, LlmError};

const SYSTEM_PROMPT: &str = "\
You are a game purchase advisor. You receive one price record for a game: \
the current price, the historical low, the current discount percentage, and \
the store.

Recommend \"buy\" when the current price is at or near the historical low, \
or the discount is substantial and unlikely to improve soon. Recommend \
\"wait\" when the game is at or near full price, or history shows it has \
been sold much cheaper. Explain the price relation in reason and express \
how certain you are in confidence.";

#[derive(Debug, Error)]
#[error("purchase decision failed for price record {index}")]
pub struct DecisionError {
    /// Zero-based position of the record whose invocation failed.
    pub index: usize,
    #[source]
    pub source: LlmError,
}

/// Produces one buy/wait verdict per price record.
///
/// Invocations are strictly sequential, one model call per record, and the
/// batch is all-or-nothing: a failure on record N discards the decisions
/// already produced for records 0..N-1.
pub struct PurchaseDecisionAgent {
    client: Arc<dyn LlmClient>,
}

impl PurchaseDecisionAgent {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn decide(
        &self,
        price_infos: &[PriceInfo],
    ) -> Result<Vec<PurchaseDecision>, DecisionError> {
        let mut decisions = Vec::with_capacity(price_infos.len());

        for (index, price_info) in price_infos.iter().enumerate() {
            let payload = serde_json::to_string(price_info).map_err(|error| DecisionError {
                index,
                source: LlmError::SchemaViolation(error.to_string()),
            })?;

            let decision: PurchaseDecision =
                invoke_structured(self.client.as_ref(), SYSTEM_PROMPT, &payload)
                    .await
                    .map_err(|source| DecisionError { index, source })?;

            decision.validate().map_err(|violation| DecisionError {
                index,
                source: LlmError::SchemaViolation(violation.to_string()),
            })?;

            decisions.push(decision);
        }

        info!(count = decisions.len(), "purchase decisions produced");
        Ok(decisions)
    }
}
