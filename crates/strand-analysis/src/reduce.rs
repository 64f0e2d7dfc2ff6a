//! Redundant-edge elimination (transitive reduction).
//!
//! For every node `u` with at least two successors, each direct edge
//! `u → v` is tested in turn: if `v` can still be reached from `u` through
//! `u`'s *other* successors, the edge is redundant and is removed from the
//! working copy. Later tests for the same `u` see earlier removals, so the
//! outcome depends on the order successors are tested in. That order is
//! fixed by [`ReductionOrder`] (ascending ids unless configured otherwise).
//!
//! Reachability is preserved: every removed edge is bypassed by a path that
//! survives in the result.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use strand_core::config::ReductionOrder;
use strand_core::{Edge, GraphStore, NodeId, Snapshot};

/// Outcome of a transitive reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reduction {
    /// The input with every redundant edge removed.
    pub reduced: Snapshot,
    /// Removed edges in the order they were judged redundant.
    pub removed: Vec<Edge>,
}

impl Reduction {
    /// Number of removed edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.removed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Delete the removed edges from the live `store`.
    ///
    /// Returns how many were actually present there.
    pub fn apply_to(&self, store: &mut GraphStore) -> usize {
        store.remove_edges(&self.removed)
    }
}

/// Reduce with ascending successor order.
#[must_use]
pub fn reduce(snapshot: &Snapshot) -> Reduction {
    reduce_with_order(snapshot, ReductionOrder::Ascending)
}

/// Reduce, testing each node's successors in `order`.
///
/// `snapshot` is never modified; the reduction runs on a private copy.
#[must_use]
#[instrument(skip(snapshot), fields(nodes = snapshot.len(), edges = snapshot.edge_count()))]
pub fn reduce_with_order(snapshot: &Snapshot, order: ReductionOrder) -> Reduction {
    let mut working = snapshot.clone();
    let mut removed = Vec::new();

    for u in snapshot.ids() {
        let mut candidates: Vec<NodeId> = working
            .successors(u)
            .map(|succ| succ.iter().copied().collect())
            .unwrap_or_default();
        if candidates.len() < 2 {
            continue;
        }
        if order == ReductionOrder::Descending {
            candidates.reverse();
        }

        for v in candidates {
            if v == u {
                continue;
            }
            if reachable_bypassing(&working, u, v) {
                let edge = Edge::new(u, v);
                working.remove_edge(edge);
                trace!(from = u, to = v, "redundant edge");
                removed.push(edge);
            }
        }
    }

    debug!(removed = removed.len(), "reduced snapshot");
    Reduction {
        reduced: working,
        removed,
    }
}

/// Can `v` be reached from `u` without using the direct edge `u → v`?
fn reachable_bypassing(working: &Snapshot, u: NodeId, v: NodeId) -> bool {
    let Some(direct) = working.successors(u) else {
        return false;
    };
    let mut stack: Vec<NodeId> = direct.iter().copied().filter(|s| *s != v).collect();
    let mut visited: HashSet<NodeId> = HashSet::from([u]);

    while let Some(node) = stack.pop() {
        if node == v {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(succ) = working.successors(node) {
            stack.extend(succ.iter().copied().filter(|s| !visited.contains(s)));
        }
    }
    false
}
