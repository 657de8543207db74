use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{check_unit_interval, SchemaError};

/// Canonical Steam identity resolved from a free-text query.
///
/// Produced once per query by the entity resolver agent and immutable
/// afterwards. `confidence` gates the downstream search stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GameEntity {
    /// Canonical Steam game name.
    pub game_name: String,
    /// Whether the query refers to a DLC rather than a base game.
    #[serde(default)]
    pub is_dlc: bool,
    /// Resolver confidence between 0 and 1.
    pub confidence: f64,
}

impl GameEntity {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unit_interval("confidence", self.confidence)
    }
}

/// One aggregator catalog match for a resolved game name.
///
/// Produced by the search tool; the list may be empty, which is a normal
/// outcome rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// Aggregator identifier, valid as input to the price overview endpoint.
    pub id: String,
    pub title: String,
    /// Catalog entry kind as reported upstream, e.g. "game" or "dlc".
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "game".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Candidate, GameEntity};
    use crate::domain::SchemaError;

    #[test]
    fn game_entity_accepts_boundary_confidence_values() {
        for confidence in [0.0, 0.5, 1.0] {
            let entity = GameEntity {
                game_name: "Portal 2".to_string(),
                is_dlc: false,
                confidence,
            };
            assert_eq!(entity.validate(), Ok(()));
        }
    }

    #[test]
    fn game_entity_rejects_confidence_outside_unit_interval() {
        let entity = GameEntity {
            game_name: "Portal 2".to_string(),
            is_dlc: false,
            confidence: 1.3,
        };
        assert_eq!(
            entity.validate(),
            Err(SchemaError::OutOfRange { field: "confidence", min: 0.0, max: 1.0, value: 1.3 })
        );
    }

    #[test]
    fn candidate_kind_defaults_to_game_when_wire_type_is_absent() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"id":"01849783","title":"Portal 2"}"#)
                .expect("candidate without type should decode");
        assert_eq!(candidate.kind, "game");
    }

    #[test]
    fn candidate_decodes_wire_type_field() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"id":"018497","title":"Portal 2 DLC","type":"dlc"}"#)
                .expect("candidate with type should decode");
        assert_eq!(candidate.kind, "dlc");
    }
}
