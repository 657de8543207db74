use std::collections::HashSet;
use std::sync::Arc;

use dealscout_core::{Candidate, CandidateSelection};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::invoke::invoke_structured;
use crate::llm::{LlmClient, LlmError};

const SYSTEM_PROMPT: &str = "\
You are a game candidate selector. You receive the user's original query and \
a list of catalog candidates, each with an id, a title, and a type.

Choose a selection_type and the matching candidate ids:
- single: the user clearly asks about one specific title; select exactly one id.
- series: the user asks about a series or \"all of them\"; select every id \
that belongs to the series.
- latest: the query is ambiguous but most plausibly targets the newest \
entry; select the id of the most recent title.

Only use ids from the provided candidates. Explain your choice in reason. \
If none of the candidates fit the query, return an empty selected_ids list.";

#[derive(Debug, Error)]
#[error("could not select among {candidate_count} candidates for query `{query}`")]
pub struct SelectionError {
    pub query: String,
    pub candidate_count: usize,
    #[source]
    pub source: LlmError,
}

#[derive(Serialize)]
struct SelectorPayload<'a> {
    user_query: &'a str,
    candidates: &'a [Candidate],
}

/// Chooses which catalog candidates the user actually means.
pub struct CandidateSelector {
    client: Arc<dyn LlmClient>,
}

impl CandidateSelector {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// The returned `selected_ids` are deliberately not filtered against
    /// the offered candidates; the price tool skips ids the aggregator has
    /// no data for, so unknown ids degrade to missing rows rather than
    /// failures. Out-of-set ids are logged for observability.
    pub async fn select(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<CandidateSelection, SelectionError> {
        let fail = |source: LlmError| SelectionError {
            query: query.to_string(),
            candidate_count: candidates.len(),
            source,
        };

        let payload = serde_json::to_string(&SelectorPayload { user_query: query, candidates })
            .map_err(|error| fail(LlmError::SchemaViolation(error.to_string())))?;

        let selection: CandidateSelection =
            invoke_structured(self.client.as_ref(), SYSTEM_PROMPT, &payload)
                .await
                .map_err(fail)?;

        let offered: HashSet<&str> =
            candidates.iter().map(|candidate| candidate.id.as_str()).collect();
        for id in &selection.selected_ids {
            if !offered.contains(id.as_str()) {
                debug!(id, "selector returned an id outside the offered candidates");
            }
        }

        info!(
            selection_type = ?selection.selection_type,
            selected = selection.selected_ids.len(),
            "candidate selection finished"
        );
        Ok(selection)
    }
}
