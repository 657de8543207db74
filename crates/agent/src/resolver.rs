use std::sync::Arc;

use dealscout_core::GameEntity;
use thiserror::Error;
use tracing::info;

use crate::invoke::invoke_structured;
use crate::llm::{LlmClient, LlmError};

const SYSTEM_PROMPT: &str = "\
You are a Steam game entity resolver. Given a free-text user query about a \
game, identify the canonical Steam title it refers to.

Rules:
- game_name is the exact canonical Steam store title, correcting typos, \
abbreviations, and non-English names.
- is_dlc is true only when the query clearly refers to downloadable content \
rather than a base game.
- confidence reflects how certain you are that the query maps to this title, \
from 0 (no idea) to 1 (unambiguous). Use a low value when the query does not \
look like a real game.";

#[derive(Debug, Error)]
#[error("could not resolve a game entity for query `{query}`")]
pub struct ResolutionError {
    pub query: String,
    #[source]
    pub source: LlmError,
}

/// Resolves a free-text query into a canonical [`GameEntity`].
pub struct GameEntityResolver {
    client: Arc<dyn LlmClient>,
}

impl GameEntityResolver {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, query: &str) -> Result<GameEntity, ResolutionError> {
        let entity: GameEntity = invoke_structured(self.client.as_ref(), SYSTEM_PROMPT, query)
            .await
            .map_err(|source| ResolutionError { query: query.to_string(), source })?;

        entity.validate().map_err(|violation| ResolutionError {
            query: query.to_string(),
            source: LlmError::SchemaViolation(violation.to_string()),
        })?;

        info!(
            game_name = %entity.game_name,
            is_dlc = entity.is_dlc,
            confidence = entity.confidence,
            "resolved game entity"
        );
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::GameEntityResolver;
    use crate::llm::{LlmClient, LlmError};

    struct FixedLlm(Value);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn complete_structured(
            &self,
            _system_prompt: &str,
            _user_payload: &str,
            _target_schema: &Value,
        ) -> Result<Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn resolves_a_conforming_entity() {
        let resolver = GameEntityResolver::new(Arc::new(FixedLlm(
            json!({"game_name": "Portal 2", "is_dlc": false, "confidence": 0.95}),
        )));

        let entity = resolver.resolve("portal 2").await.expect("should resolve");
        assert_eq!(entity.game_name, "Portal 2");
        assert_eq!(entity.confidence, 0.95);
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_a_resolution_error() {
        let resolver = GameEntityResolver::new(Arc::new(FixedLlm(
            json!({"game_name": "Portal 2", "is_dlc": false, "confidence": 1.7}),
        )));

        let error = resolver.resolve("portal 2").await.expect_err("should fail validation");
        assert_eq!(error.query, "portal 2");
        assert!(matches!(error.source, LlmError::SchemaViolation(_)));
    }
}
