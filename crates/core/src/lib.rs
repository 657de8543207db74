//! Dealscout core - data contracts, configuration, and the pipeline state machine
//!
//! This crate holds everything that is pure: the schema types exchanged
//! between pipeline stages (and used as LLM output contracts), the
//! configuration layer, and the state-machine plumbing that sequences the
//! five stages (resolve → search → select → price → decide).
//!
//! No I/O lives here. HTTP clients are in `dealscout-tools`, LLM-backed
//! agents in `dealscout-agent`, and the async executor that wires them
//! together in `dealscout-pipeline`.

pub mod config;
pub mod domain;
pub mod pipeline;

pub use domain::decision::{PurchaseDecision, Recommendation};
pub use domain::game::{Candidate, GameEntity};
pub use domain::price::PriceInfo;
pub use domain::selection::{CandidateSelection, SelectionType};
pub use domain::steam::{RecentRating, ReleaseType, SteamInfo};
pub use domain::SchemaError;
pub use pipeline::routing::{next_stage, render_result, Stage, CONFIDENCE_THRESHOLD};
pub use pipeline::state::{PipelineState, StageUpdate, StateError};
