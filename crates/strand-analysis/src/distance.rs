//! Shortest hop count.

use std::collections::{HashSet, VecDeque};

use tracing::{instrument, trace};

use strand_core::{NodeId, Snapshot};

/// Number of edges on a shortest path from `start` to `end`.
///
/// Returns `None` if either id is wholly unknown to the snapshot (neither a
/// key nor any successor value) or if `end` is unreachable. `start == end`
/// is `Some(0)` for any known id. Dangling ids can be reached but have no
/// successors of their own.
#[must_use]
#[instrument(skip(snapshot))]
pub fn distance(snapshot: &Snapshot, start: NodeId, end: NodeId) -> Option<usize> {
    if !is_known(snapshot, start) || !is_known(snapshot, end) {
        trace!("unknown endpoint");
        return None;
    }
    if start == end {
        return Some(0);
    }

    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut depth = 0usize;
    let mut same_level = 1usize;
    let mut next_level = 0usize;

    while let Some(node) = queue.pop_front() {
        for &next in snapshot.successors(node).into_iter().flatten() {
            if next == end {
                return Some(depth + 1);
            }
            if visited.insert(next) {
                queue.push_back(next);
                next_level += 1;
            }
        }

        same_level -= 1;
        if same_level == 0 {
            depth += 1;
            same_level = next_level;
            next_level = 0;
        }
    }
    None
}

fn is_known(snapshot: &Snapshot, id: NodeId) -> bool {
    snapshot.contains(id) || snapshot.iter().any(|(_, succ)| succ.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        // 1 -> 2 -> 3 -> 4, plus a shortcut 1 -> 3 and a dangling 4 -> 9.
        Snapshot::from_edges([(1, 2), (2, 3), (3, 4), (1, 3), (4, 9)])
    }

    #[test]
    fn same_node_is_zero() {
        assert_eq!(distance(&sample(), 2, 2), Some(0));
        assert_eq!(distance(&sample(), 9, 9), Some(0), "dangling ids are known");
    }

    #[test]
    fn shortest_path_wins() {
        let s = sample();
        assert_eq!(distance(&s, 1, 2), Some(1));
        assert_eq!(distance(&s, 1, 3), Some(1));
        assert_eq!(distance(&s, 1, 4), Some(2));
        assert_eq!(distance(&s, 1, 9), Some(3));
    }

    #[test]
    fn unreachable_and_unknown_are_none() {
        let s = sample();
        assert_eq!(distance(&s, 4, 1), None);
        assert_eq!(distance(&s, 9, 1), None, "dangling ids have no successors");
        assert_eq!(distance(&s, 1, 77), None);
        assert_eq!(distance(&s, 77, 77), None, "unknown even when equal");
    }

    #[test]
    fn isolated_key_is_unreachable() {
        let s = Snapshot::from_walks([vec![1, 2], vec![2], vec![3]]);
        assert_eq!(distance(&s, 1, 3), None);
        assert_eq!(distance(&s, 1, 2), Some(1));
    }

    #[test]
    fn levels_are_counted_across_wide_fronts() {
        // 0 fans out to 1..=5, each of which points at 6; 6 -> 7.
        let mut edges: Vec<(NodeId, NodeId)> = (1..=5).map(|i| (0, i)).collect();
        edges.extend((1..=5).map(|i| (i, 6)));
        edges.push((6, 7));
        let s = Snapshot::from_edges(edges);
        assert_eq!(distance(&s, 0, 6), Some(2));
        assert_eq!(distance(&s, 0, 7), Some(3));
    }

    #[test]
    fn cycles_terminate() {
        let s = Snapshot::from_edges([(1, 2), (2, 1)]);
        assert_eq!(distance(&s, 1, 2), Some(1));
        assert_eq!(distance(&s, 2, 1), Some(1));
    }
}
