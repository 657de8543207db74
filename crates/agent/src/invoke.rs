use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm::{LlmClient, LlmError};

/// Run one structured agent call: generate the JSON Schema for `T`, invoke
/// the model, and decode the reply into `T`.
///
/// Structural mismatches between the reply and `T` surface as
/// [`LlmError::SchemaViolation`]; numeric range checks remain with the
/// caller, which knows which invariants its type declares.
pub async fn invoke_structured<T>(
    client: &dyn LlmClient,
    system_prompt: &str,
    user_payload: &str,
) -> Result<T, LlmError>
where
    T: DeserializeOwned + JsonSchema,
{
    let schema = target_schema::<T>()?;
    let value = client.complete_structured(system_prompt, user_payload, &schema).await?;
    serde_json::from_value(value).map_err(|error| LlmError::SchemaViolation(error.to_string()))
}

fn target_schema<T: JsonSchema>() -> Result<Value, LlmError> {
    let schema = schemars::gen::SchemaGenerator::default().into_root_schema_for::<T>();
    serde_json::to_value(schema).map_err(|error| LlmError::SchemaViolation(error.to_string()))
}
