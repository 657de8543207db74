use crate::domain::game::GameEntity;
use crate::pipeline::state::PipelineState;

/// Resolver confidence at or below this value ends the run before any
/// search traffic is issued.
pub const CONFIDENCE_THRESHOLD: f64 = 0.2;

/// Fixed user-facing strings for the short-circuit outcomes. "No data" is a
/// normal result, never an error.
pub mod messages {
    pub const LOW_CONFIDENCE: &str =
        "No matching game found. The title may be misspelled or the game may not exist.";
    pub const NO_CANDIDATES: &str = "No matching games found.";
    pub const NO_SELECTION: &str = "Could not determine a specific game.";
    pub const NO_PRICES: &str = "No price information available.";
}

/// The five pipeline stages plus the terminal marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Search,
    Select,
    Price,
    Decide,
    End,
}

/// Routing table for the pipeline graph.
///
/// resolve → search → {select | END} → {price | END} → decide → END
///
/// The decision is a pure function of the completed stage and the state
/// snapshot it produced; stages themselves never pick their successor.
pub fn next_stage(completed: Stage, state: &PipelineState) -> Stage {
    match completed {
        Stage::Resolve => Stage::Search,
        Stage::Search => {
            if state.candidates().is_empty() {
                Stage::End
            } else {
                Stage::Select
            }
        }
        Stage::Select => {
            if state.has_selection() {
                Stage::Price
            } else {
                Stage::End
            }
        }
        Stage::Price => Stage::Decide,
        Stage::Decide | Stage::End => Stage::End,
    }
}

/// Whether the resolved entity is confident enough to search for.
pub fn is_confident(entity: &GameEntity) -> bool {
    entity.confidence > CONFIDENCE_THRESHOLD
}

/// Map a terminal state to the string shown to the user.
///
/// A state that ended with an explicit result (a decision summary or a fixed
/// short-circuit message) is returned as-is; otherwise the short-circuit
/// that left `result` unset determines the message.
pub fn render_result(state: &PipelineState) -> String {
    if let Some(result) = &state.result {
        return result.clone();
    }
    if state.selection.is_some() && !state.has_selection() {
        return messages::NO_SELECTION.to_string();
    }
    messages::NO_CANDIDATES.to_string()
}
