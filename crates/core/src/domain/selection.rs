use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the selector interpreted the user's intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// The user asked about one specific title.
    Single,
    /// The user asked about a series or "all of them".
    Series,
    /// The query was ambiguous but most plausibly targets the newest entry.
    Latest,
}

/// The selector agent's choice among the offered candidates.
///
/// `selected_ids` is deliberately not validated against the candidate ids
/// that were offered; the price tool tolerates unknown ids by skipping
/// them, so the permissive contract is preserved end to end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CandidateSelection {
    pub selection_type: SelectionType,
    /// Aggregator ids to price, in the order they should be reported.
    pub selected_ids: Vec<String>,
    /// Detailed explanation for the selection.
    pub reason: String,
}
