use std::sync::Arc;

use dealscout_agent::{
    CandidateSelector, DecisionError, GameEntityResolver, LlmClient, PurchaseDecisionAgent,
    ResolutionError, SelectionError,
};
use dealscout_core::{next_stage, render_result, PipelineState, Stage, StateError};
use dealscout_tools::{DealsApi, UpstreamError};
use thiserror::Error;
use tracing::debug;

use crate::stages;

/// Any failure that aborts a pipeline run.
///
/// The executor does not catch or retry: the first stage error propagates
/// to the caller unchanged. "No data" outcomes are not errors; they end the
/// run gracefully with a fixed message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Wires the three agents and the deals client into the five-stage graph.
pub struct PriceAdvisor {
    resolver: GameEntityResolver,
    selector: CandidateSelector,
    decision: PurchaseDecisionAgent,
    deals: Arc<dyn DealsApi>,
}

impl PriceAdvisor {
    pub fn new(llm: Arc<dyn LlmClient>, deals: Arc<dyn DealsApi>) -> Self {
        Self {
            resolver: GameEntityResolver::new(llm.clone()),
            selector: CandidateSelector::new(llm.clone()),
            decision: PurchaseDecisionAgent::new(llm),
            deals,
        }
    }

    /// Run the full pipeline for one query and render the user-facing
    /// result string.
    pub async fn advise(&self, user_query: &str) -> Result<String, PipelineError> {
        let state = self.run_pipeline(user_query).await?;
        Ok(render_result(&state))
    }

    /// Run the pipeline and return the terminal state snapshot.
    pub async fn run_pipeline(
        &self,
        user_query: &str,
    ) -> Result<PipelineState, PipelineError> {
        let mut state = PipelineState::new(user_query);
        let mut stage = Stage::Resolve;

        while stage != Stage::End {
            debug!(?stage, "entering pipeline stage");
            let update = match stage {
                Stage::Resolve => stages::resolve_entity(&state, &self.resolver).await?,
                Stage::Search => stages::search_candidates(&state, self.deals.as_ref()).await?,
                Stage::Select => stages::select_candidates(&state, &self.selector).await?,
                Stage::Price => stages::fetch_prices(&state, self.deals.as_ref()).await?,
                Stage::Decide => stages::make_decision(&state, &self.decision).await?,
                Stage::End => break,
            };
            state = state.apply(update)?;
            stage = next_stage(stage, &state);
        }

        Ok(state)
    }
}
