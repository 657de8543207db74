use thiserror::Error;

use crate::domain::game::{Candidate, GameEntity};
use crate::domain::price::PriceInfo;
use crate::domain::selection::CandidateSelection;

/// Snapshot of everything the pipeline has produced so far.
///
/// Each field is written exactly once by its producing stage. Stages never
/// mutate the snapshot directly; they return a [`StageUpdate`] and the
/// executor rebuilds the snapshot through [`PipelineState::apply`], which
/// rejects any second write.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineState {
    pub user_query: String,
    pub game_entity: Option<GameEntity>,
    pub candidates: Option<Vec<Candidate>>,
    pub selection: Option<CandidateSelection>,
    pub price_infos: Option<Vec<PriceInfo>>,
    pub result: Option<String>,
}

/// Partial update returned by one stage, merged by field name.
///
/// `None` means "this stage does not touch that field".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageUpdate {
    pub game_entity: Option<GameEntity>,
    pub candidates: Option<Vec<Candidate>>,
    pub selection: Option<CandidateSelection>,
    pub price_infos: Option<Vec<PriceInfo>>,
    pub result: Option<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("pipeline field `{0}` was already set")]
    FieldAlreadySet(&'static str),
}

impl PipelineState {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            game_entity: None,
            candidates: None,
            selection: None,
            price_infos: None,
            result: None,
        }
    }

    /// Rebuild the snapshot with the fields a stage produced.
    ///
    /// A field that is already populated cannot be written again; that
    /// would mean a stage observed or overwrote a later stage's output.
    pub fn apply(&self, update: StageUpdate) -> Result<Self, StateError> {
        let mut next = self.clone();

        if let Some(game_entity) = update.game_entity {
            if next.game_entity.is_some() {
                return Err(StateError::FieldAlreadySet("game_entity"));
            }
            next.game_entity = Some(game_entity);
        }
        if let Some(candidates) = update.candidates {
            if next.candidates.is_some() {
                return Err(StateError::FieldAlreadySet("candidates"));
            }
            next.candidates = Some(candidates);
        }
        if let Some(selection) = update.selection {
            if next.selection.is_some() {
                return Err(StateError::FieldAlreadySet("selection"));
            }
            next.selection = Some(selection);
        }
        if let Some(price_infos) = update.price_infos {
            if next.price_infos.is_some() {
                return Err(StateError::FieldAlreadySet("price_infos"));
            }
            next.price_infos = Some(price_infos);
        }
        if let Some(result) = update.result {
            if next.result.is_some() {
                return Err(StateError::FieldAlreadySet("result"));
            }
            next.result = Some(result);
        }

        Ok(next)
    }

    /// Candidates produced by the search stage, empty until then.
    pub fn candidates(&self) -> &[Candidate] {
        self.candidates.as_deref().unwrap_or_default()
    }

    /// Price records produced by the price stage, empty until then.
    pub fn price_infos(&self) -> &[PriceInfo] {
        self.price_infos.as_deref().unwrap_or_default()
    }

    /// True once the selector produced a selection with at least one id.
    pub fn has_selection(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| !selection.selected_ids.is_empty())
    }
}
