//! Reachability helpers.

use std::collections::BTreeSet;

use tracing::instrument;

use strand_core::{NodeId, Snapshot};

use crate::distance::distance;
use crate::scc::decompose;

/// Every id reachable from `origin` through a path of at least one edge.
///
/// `origin` itself is included only when it lies on a cycle. Dangling
/// targets are included but not expanded. Unknown `origin` gives an empty
/// set.
#[must_use]
#[instrument(skip(snapshot))]
pub fn descendants(snapshot: &Snapshot, origin: NodeId) -> BTreeSet<NodeId> {
    let mut reached = BTreeSet::new();
    let mut stack: Vec<NodeId> = snapshot
        .successors(origin)
        .map(|succ| succ.iter().copied().collect())
        .unwrap_or_default();

    while let Some(id) = stack.pop() {
        if !reached.insert(id) {
            continue;
        }
        if let Some(succ) = snapshot.successors(id) {
            stack.extend(succ.iter().copied().filter(|s| !reached.contains(s)));
        }
    }
    reached
}

/// Return `true` if `to` can be reached from `from` (trivially so when they
/// are the same known id).
#[must_use]
pub fn reachable(snapshot: &Snapshot, from: NodeId, to: NodeId) -> bool {
    distance(snapshot, from, to).is_some()
}

/// An id from which every key is reachable.
///
/// Only the first extracted component can hold such an id, since it has no
/// incoming edges from other components. Its smallest member is checked and
/// returned if it reaches every key.
#[must_use]
#[instrument(skip(snapshot), fields(nodes = snapshot.len()))]
pub fn find_root(snapshot: &Snapshot) -> Option<NodeId> {
    let partition = decompose(snapshot);
    let candidate = partition.components().first()?.representative();
    let reached = descendants(snapshot, candidate);
    snapshot
        .ids()
        .all(|id| id == candidate || reached.contains(&id))
        .then_some(candidate)
}
