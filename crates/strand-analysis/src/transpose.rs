//! Edge reversal.

use tracing::instrument;

use strand_core::{Snapshot, Successors};

/// Reverse every edge of `snapshot`.
///
/// Every key of `snapshot` is a key of the result, with an empty successor
/// set when nothing pointed at it. Dangling targets also become keys, holding
/// the ids that linked to them.
#[must_use]
#[instrument(skip(snapshot), fields(nodes = snapshot.len()))]
pub fn transpose(snapshot: &Snapshot) -> Snapshot {
    let mut reversed: Snapshot = snapshot.ids().map(|id| (id, Successors::new())).collect();
    for edge in snapshot.edges() {
        let mut sources = reversed.remove(edge.to).unwrap_or_default();
        sources.insert(edge.from);
        reversed.insert(edge.to, sources);
    }
    reversed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_edges_and_keeps_sources() {
        let s = Snapshot::from_edges([(1, 2), (2, 3), (1, 3)]);
        let t = transpose(&s);
        assert_eq!(t.successors(1), Some(&Successors::new()), "1 has no incoming edges");
        assert_eq!(t.successors(2), Some(&Successors::from([1])));
        assert_eq!(t.successors(3), Some(&Successors::from([1, 2])));
    }

    #[test]
    fn transposing_twice_restores_edges() {
        let s = Snapshot::from_edges([(1, 2), (2, 1), (3, 3), (4, 1)]);
        let tt = transpose(&transpose(&s));
        assert_eq!(tt.edges().collect::<Vec<_>>(), s.edges().collect::<Vec<_>>());
    }

    #[test]
    fn empty_snapshot_transposes_to_empty() {
        assert!(transpose(&Snapshot::new()).is_empty());
    }
}
