//! The five-stage advisor pipeline.
//!
//! resolve → search → {select | END} → {price | END} → decide → END
//!
//! Each stage is an async function that reads the current
//! [`dealscout_core::PipelineState`] snapshot and returns a partial
//! [`dealscout_core::StageUpdate`]; the executor merges updates and routes
//! between stages with the pure routing table from `dealscout-core`. Stage
//! errors propagate unchanged - the executor never catches or retries.

pub mod executor;
mod stages;

pub use executor::{PipelineError, PriceAdvisor};
