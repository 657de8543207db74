//! HTTP tool clients for the external collaborators.
//!
//! Two upstreams are wrapped here: the deals aggregator (IsThereAnyDeal),
//! which provides catalog search and batched price overviews, and the Steam
//! storefront, which provides metadata and recent-review summaries. Both
//! clients are stateless wrappers over a shared `reqwest::Client`; response
//! decoding is split into transport-free functions so it can be exercised
//! against fixture payloads.

pub mod deals;
pub mod error;
pub mod steam;

pub use deals::{DealsApi, ItadClient};
pub use error::UpstreamError;
pub use steam::SteamStoreClient;
