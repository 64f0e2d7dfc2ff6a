//! SCC contraction: collapse every component to its representative.

use tracing::{debug, instrument};

use strand_core::{Snapshot, Successors};

use crate::scc::{SccPartition, decompose};

/// Quotient of `snapshot` by `partition`.
///
/// Every component's representative (its smallest id) becomes a key. An
/// edge `a → b` becomes `rep(a) → rep(b)` when the two representatives
/// differ; edges inside a component vanish, as do dangling links. The
/// result is acyclic whenever `partition` is the SCC partition of
/// `snapshot`.
#[must_use]
#[instrument(skip(snapshot, partition), fields(components = partition.len()))]
pub fn contract(snapshot: &Snapshot, partition: &SccPartition) -> Snapshot {
    let mut contracted: Snapshot = partition
        .components()
        .iter()
        .map(|c| (c.representative(), Successors::new()))
        .collect();

    for edge in snapshot.edges() {
        let (Some(from), Some(to)) = (
            partition.representative_of(edge.from),
            partition.representative_of(edge.to),
        ) else {
            continue;
        };
        if from == to {
            continue;
        }
        let mut successors = contracted.remove(from).unwrap_or_default();
        successors.insert(to);
        contracted.insert(from, successors);
    }

    debug!(
        nodes = contracted.len(),
        edges = contracted.edge_count(),
        "contracted snapshot"
    );
    contracted
}

/// Decompose and contract in one step.
#[must_use]
pub fn condense(snapshot: &Snapshot) -> Snapshot {
    contract(snapshot, &decompose(snapshot))
}
