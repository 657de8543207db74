//! LLM-backed agents for the deal advisor pipeline.
//!
//! Three agents share one provider seam: the entity resolver turns a
//! free-text query into a canonical Steam identity, the candidate selector
//! picks among catalog matches, and the decision agent turns price data
//! into buy/wait recommendations.
//!
//! Each agent is a thin configuration (fixed instruction prompt + target
//! output schema) over the shared [`LlmClient`] trait; the model is invoked
//! with a declared JSON Schema and its output is decoded and range-checked
//! before it may enter the pipeline. The agents never decide control flow -
//! routing between stages belongs to the pipeline executor.

pub mod decision;
pub mod invoke;
pub mod llm;
pub mod resolver;
pub mod selector;

pub use decision::{DecisionError, PurchaseDecisionAgent};
pub use llm::{ChatClient, LlmClient, LlmError};
pub use resolver::{GameEntityResolver, ResolutionError};
pub use selector::{CandidateSelector, SelectionError};
