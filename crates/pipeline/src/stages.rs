use dealscout_agent::{CandidateSelector, GameEntityResolver, PurchaseDecisionAgent};
use dealscout_core::pipeline::routing::{is_confident, messages};
use dealscout_core::{PipelineState, StageUpdate};
use dealscout_tools::DealsApi;
use tracing::info;

use crate::executor::PipelineError;

pub(crate) async fn resolve_entity(
    state: &PipelineState,
    resolver: &GameEntityResolver,
) -> Result<StageUpdate, PipelineError> {
    let entity = resolver.resolve(&state.user_query).await?;
    Ok(StageUpdate { game_entity: Some(entity), ..StageUpdate::default() })
}

/// Search the aggregator catalog for the resolved name.
///
/// A low-confidence resolution short-circuits here: no search traffic is
/// issued, the candidate list stays empty, and the fixed low-confidence
/// message becomes the run's result.
pub(crate) async fn search_candidates(
    state: &PipelineState,
    deals: &dyn DealsApi,
) -> Result<StageUpdate, PipelineError> {
    let confident = state.game_entity.as_ref().is_some_and(is_confident);
    if !confident {
        info!("resolver confidence below threshold, skipping catalog search");
        return Ok(StageUpdate {
            candidates: Some(Vec::new()),
            result: Some(messages::LOW_CONFIDENCE.to_string()),
            ..StageUpdate::default()
        });
    }

    let keyword = state
        .game_entity
        .as_ref()
        .map(|entity| entity.game_name.clone())
        .unwrap_or_default();
    let candidates = deals.search(&keyword).await?;
    Ok(StageUpdate { candidates: Some(candidates), ..StageUpdate::default() })
}

pub(crate) async fn select_candidates(
    state: &PipelineState,
    selector: &CandidateSelector,
) -> Result<StageUpdate, PipelineError> {
    let selection = selector.select(&state.user_query, state.candidates()).await?;
    Ok(StageUpdate { selection: Some(selection), ..StageUpdate::default() })
}

pub(crate) async fn fetch_prices(
    state: &PipelineState,
    deals: &dyn DealsApi,
) -> Result<StageUpdate, PipelineError> {
    let Some(selection) = state.selection.as_ref().filter(|s| !s.selected_ids.is_empty()) else {
        return Ok(StageUpdate { price_infos: Some(Vec::new()), ..StageUpdate::default() });
    };

    let price_infos = deals.fetch_prices(&selection.selected_ids).await?;
    Ok(StageUpdate { price_infos: Some(price_infos), ..StageUpdate::default() })
}

/// Turn price records into buy/wait verdicts.
///
/// An empty price list never reaches the decision agent; it yields the
/// fixed "no price information" result instead.
pub(crate) async fn make_decision(
    state: &PipelineState,
    agent: &PurchaseDecisionAgent,
) -> Result<StageUpdate, PipelineError> {
    if state.price_infos().is_empty() {
        info!("no price data, skipping decision agent");
        return Ok(StageUpdate {
            result: Some(messages::NO_PRICES.to_string()),
            ..StageUpdate::default()
        });
    }

    let decisions = agent.decide(state.price_infos()).await?;
    let rendered = decisions
        .iter()
        .enumerate()
        .map(|(index, decision)| format!("{}. {decision}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(StageUpdate { result: Some(rendered), ..StageUpdate::default() })
}
