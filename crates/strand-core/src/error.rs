//! Validation failures raised by the graph store.
//!
//! Only *invalid requests* are errors. Queries against unknown ids return
//! `None`, and structural anomalies such as dangling links are reported by
//! dedicated query methods instead of failing.

use crate::snapshot::NodeId;

/// Errors returned by [`GraphStore`](crate::GraphStore) and
/// [`Crawler`](crate::Crawler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A traversal root was requested for an id that is not registered.
    #[error("origin {0} is not a registered node")]
    InvalidOrigin(NodeId),

    /// A default origin was requested from a store with no nodes.
    #[error("cannot choose an origin: the store has no nodes")]
    EmptyStore,
}
