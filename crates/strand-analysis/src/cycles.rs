//! Cycle search.
//!
//! An explicit-stack depth-first walk keeps the current root-to-frontier
//! path. Reaching a node that is already on the path closes a cycle, which
//! is returned immediately. A node whose successors are all exhausted
//! without finding one is marked dead and never explored again, even from a
//! later root.
//!
//! Self-loops are cycles: `u → u` yields `[u, u]`.

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use strand_core::{NodeId, Snapshot};

use crate::arena::DenseGraph;

/// Find one cycle in `snapshot`.
///
/// Walks start from `candidates` (in the given order, unknown ids skipped)
/// or from every key in ascending order. Walks still follow edges anywhere
/// in the snapshot; candidates only choose where to start.
///
/// The result starts and ends with the same id, e.g. `[0, 1, 2, 0]`.
#[must_use]
#[instrument(skip(snapshot, candidates), fields(nodes = snapshot.len()))]
pub fn find_cycle(snapshot: &Snapshot, candidates: Option<&[NodeId]>) -> Option<Vec<NodeId>> {
    let graph = DenseGraph::from_snapshot(snapshot);
    let roots: Vec<usize> = match candidates {
        Some(ids) => ids.iter().filter_map(|id| graph.index_of(*id)).collect(),
        None => (0..graph.len()).collect(),
    };

    let mut search = CycleSearch::new(&graph);
    for root in roots {
        if let Some(cycle) = search.from_root(root) {
            debug!(len = cycle.len(), "found cycle");
            return Some(cycle);
        }
    }
    debug!("no cycle");
    None
}

/// Return `true` if `snapshot` has no cycle (self-loops count as cycles).
#[must_use]
pub fn is_dag(snapshot: &Snapshot) -> bool {
    find_cycle(snapshot, None).is_none()
}

struct CycleSearch<'g> {
    graph: &'g DenseGraph,
    dead: FixedBitSet,
    /// Stack position of each node currently on the path.
    on_path: Vec<Option<usize>>,
    /// (node, position of the next successor to try); doubles as the path.
    stack: Vec<(usize, usize)>,
}

impl<'g> CycleSearch<'g> {
    fn new(graph: &'g DenseGraph) -> Self {
        Self {
            graph,
            dead: FixedBitSet::with_capacity(graph.len()),
            on_path: vec![None; graph.len()],
            stack: Vec::new(),
        }
    }

    fn from_root(&mut self, root: usize) -> Option<Vec<NodeId>> {
        if self.dead.contains(root) {
            return None;
        }
        self.enter(root);

        while let Some(&(node, pos)) = self.stack.last() {
            let successors = self.graph.successors(node);
            let Some(&next) = successors.get(pos) else {
                self.leave(node);
                continue;
            };
            if let Some(frame) = self.stack.last_mut() {
                frame.1 = pos + 1;
            }

            if let Some(start) = self.on_path[next] {
                let mut cycle: Vec<NodeId> = self.stack[start..]
                    .iter()
                    .map(|(ix, _)| self.graph.id(*ix))
                    .collect();
                cycle.push(self.graph.id(next));
                return Some(cycle);
            }
            if !self.dead.contains(next) {
                self.enter(next);
            }
        }
        None
    }

    fn enter(&mut self, node: usize) {
        self.on_path[node] = Some(self.stack.len());
        self.stack.push((node, 0));
    }

    fn leave(&mut self, node: usize) {
        self.stack.pop();
        self.on_path[node] = None;
        self.dead.insert(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed_walk(snapshot: &Snapshot, cycle: &[NodeId]) {
        assert!(cycle.len() >= 2);
        assert_eq!(cycle.first(), cycle.last());
        for pair in cycle.windows(2) {
            assert!(
                snapshot
                    .successors(pair[0])
                    .is_some_and(|s| s.contains(&pair[1])),
                "{} -> {} is not an edge",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn finds_the_triangle() {
        let s = Snapshot::from_walks([vec![0, 1, 2, 0], vec![2, 3, 4], vec![4]]);
        assert_eq!(find_cycle(&s, None), Some(vec![0, 1, 2, 0]));
        assert!(!is_dag(&s));
    }

    #[test]
    fn dag_has_no_cycle() {
        let s = Snapshot::from_walks([vec![1, 2, 3], vec![1, 3], vec![3]]);
        assert_eq!(find_cycle(&s, None), None);
        assert!(is_dag(&s));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let s = Snapshot::from_edges([(1, 2), (2, 2)]);
        assert_eq!(find_cycle(&s, None), Some(vec![2, 2]));
    }

    #[test]
    fn cycle_reached_after_dead_branch() {
        // 1 -> 2 is a dead end, 1 -> 5 -> 6 -> 5 is a cycle off the path root.
        let s = Snapshot::from_walks([vec![1, 2], vec![2], vec![1, 5, 6, 5]]);
        let cycle = find_cycle(&s, None).unwrap();
        assert_eq!(cycle, vec![5, 6, 5]);
        assert_closed_walk(&s, &cycle);
    }

    #[test]
    fn restarts_for_disconnected_regions() {
        let s = Snapshot::from_walks([vec![1, 2], vec![2], vec![10, 11, 10]]);
        let cycle = find_cycle(&s, None).unwrap();
        assert_closed_walk(&s, &cycle);
        assert_eq!(cycle, vec![10, 11, 10]);
    }

    #[test]
    fn candidates_choose_roots() {
        let s = Snapshot::from_walks([vec![1, 2], vec![2], vec![10, 11, 10]]);
        assert_eq!(find_cycle(&s, Some(&[1, 2])), None);
        assert_eq!(find_cycle(&s, Some(&[99])), None, "unknown ids are skipped");
        assert_eq!(find_cycle(&s, Some(&[11])), Some(vec![11, 10, 11]));
    }

    #[test]
    fn dangling_links_are_leaves() {
        let s = Snapshot::from_edges([(1, 2), (2, 7)]);
        assert!(is_dag(&s));
    }

    #[test]
    fn long_cycle_does_not_overflow() {
        let n: NodeId = 100_000;
        let mut s = Snapshot::from_edges((0..n).map(|i| (i, i + 1)));
        s.insert(n, [0].into_iter().collect());
        let cycle = find_cycle(&s, None).unwrap();
        assert_eq!(cycle.len(), usize::try_from(n).unwrap() + 2);
    }
}
