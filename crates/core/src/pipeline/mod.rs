//! Pure pipeline plumbing: the state snapshot threaded through the five
//! stages, the partial-update merge that enforces the set-once invariant,
//! and the routing table that decides which stage runs next.

pub mod routing;
pub mod state;
