//! Reachability-limited snapshots of the store and incremental re-crawl.
//!
//! # Overview
//!
//! [`SubgraphBuilder::build`] walks the store depth-first from an origin and
//! records the successor set of every node it reaches (copied, never
//! aliased). A node whose id is not registered is a leaf: it contributes no
//! entry and the walk does not continue through it. Without an origin the
//! whole store is covered by restarting from every not-yet-visited node.
//!
//! Two walkers are provided. The iterative one keeps an explicit stack and is
//! safe on arbitrarily deep graphs; the recursive one follows the call stack
//! and is kept for parity checks. Both produce identical snapshots.
//!
//! ## Crawl
//!
//! [`SubgraphBuilder::crawl`] refreshes an earlier snapshot against the live
//! store without rebuilding it:
//!
//! 1. Keys whose node has been deleted are dropped.
//! 2. Keys whose successor set changed are overwritten; successors that are
//!    new *and* not already keys form the frontier.
//! 3. The walk restarts from each frontier id and merges into the result.
//!
//! Nodes that became unreachable stay in the refreshed snapshot. The
//! [`Crawler`](crate::Crawler) wraps this with origin tracking and pruning.

use std::collections::BTreeSet;

use tracing::{debug, instrument, trace};

use crate::config::Traversal;
use crate::snapshot::{NodeId, Snapshot};
use crate::store::GraphStore;

/// Builds snapshots from a borrowed [`GraphStore`].
#[derive(Debug, Clone, Copy)]
pub struct SubgraphBuilder<'a> {
    store: &'a GraphStore,
    traversal: Traversal,
}

impl<'a> SubgraphBuilder<'a> {
    /// Create a builder using the iterative walker.
    #[must_use]
    pub const fn new(store: &'a GraphStore) -> Self {
        Self {
            store,
            traversal: Traversal::Iterative,
        }
    }

    /// Select the walker used by [`build`](Self::build) and
    /// [`crawl`](Self::crawl).
    #[must_use]
    pub const fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    #[must_use]
    pub const fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Snapshot everything reachable from `origin`, or the whole store.
    ///
    /// An unregistered `origin` yields an empty snapshot.
    #[must_use]
    #[instrument(skip(self))]
    pub fn build(&self, origin: Option<NodeId>) -> Snapshot {
        let snapshot = match self.traversal {
            Traversal::Iterative => self.build_iterative(origin),
            Traversal::Recursive => self.build_recursive(origin),
        };
        debug!(
            nodes = snapshot.len(),
            edges = snapshot.edge_count(),
            "built snapshot"
        );
        snapshot
    }

    /// [`build`](Self::build) with the explicit-stack walker.
    #[must_use]
    pub fn build_iterative(&self, origin: Option<NodeId>) -> Snapshot {
        let mut snapshot = Snapshot::new();
        match origin {
            Some(id) => self.walk_iterative(id, &mut snapshot),
            None => {
                for id in self.store.ids() {
                    self.walk_iterative(id, &mut snapshot);
                }
            }
        }
        snapshot
    }

    /// [`build`](Self::build) with the call-stack walker.
    ///
    /// Recursion depth equals the longest simple path explored, so this can
    /// overflow on deep graphs. Prefer [`build_iterative`](Self::build_iterative).
    #[must_use]
    pub fn build_recursive(&self, origin: Option<NodeId>) -> Snapshot {
        let mut snapshot = Snapshot::new();
        match origin {
            Some(id) => self.walk_recursive(id, &mut snapshot),
            None => {
                for id in self.store.ids() {
                    self.walk_recursive(id, &mut snapshot);
                }
            }
        }
        snapshot
    }

    /// Refresh `previous` against the live store.
    ///
    /// Crawling an unchanged store returns `previous` unchanged.
    #[must_use]
    #[instrument(skip(self, previous), fields(nodes = previous.len()))]
    pub fn crawl(&self, previous: Snapshot) -> Snapshot {
        let mut snapshot = previous;
        let mut gone: Vec<NodeId> = Vec::new();
        let mut frontier: BTreeSet<NodeId> = BTreeSet::new();
        let mut changed = 0usize;

        let keys: BTreeSet<NodeId> = snapshot.ids().collect();
        for id in &keys {
            let Some(live) = self.store.get_node(*id) else {
                gone.push(*id);
                continue;
            };
            let Some(stored) = snapshot.successors(*id) else {
                continue;
            };
            if stored == live {
                continue;
            }

            changed += 1;
            frontier.extend(
                live.difference(stored)
                    .copied()
                    .filter(|to| !keys.contains(to)),
            );
            snapshot.insert(*id, live.clone());
        }

        for id in &gone {
            snapshot.remove(*id);
        }

        for id in &frontier {
            self.walk(*id, &mut snapshot);
        }

        debug!(
            gone = gone.len(),
            changed,
            frontier = frontier.len(),
            nodes = snapshot.len(),
            "crawled snapshot"
        );
        snapshot
    }

    /// Walk from every dangling successor that is now registered.
    ///
    /// Returns the number of ids used as new walk roots.
    pub(crate) fn extend_revived(&self, snapshot: &mut Snapshot) -> usize {
        let revived: BTreeSet<NodeId> = snapshot
            .dangling_links()
            .map(|edge| edge.to)
            .filter(|id| self.store.contains(*id))
            .collect();
        for id in &revived {
            self.walk(*id, snapshot);
        }
        revived.len()
    }

    /// Walk from every registered id that is not yet a key.
    pub(crate) fn extend_all(&self, snapshot: &mut Snapshot) {
        for id in self.store.ids() {
            self.walk(id, snapshot);
        }
    }

    /// Walk from `start` into `snapshot`, stopping at existing keys.
    pub(crate) fn walk(&self, start: NodeId, snapshot: &mut Snapshot) {
        match self.traversal {
            Traversal::Iterative => self.walk_iterative(start, snapshot),
            Traversal::Recursive => self.walk_recursive(start, snapshot),
        }
    }

    /// Depth-first walk that stops at existing keys and unregistered ids.
    fn walk_iterative(&self, start: NodeId, snapshot: &mut Snapshot) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if snapshot.contains(id) {
                continue;
            }
            let Some(successors) = self.store.get_node(id) else {
                trace!(id, "unregistered id treated as leaf");
                continue;
            };
            snapshot.insert(id, successors.clone());
            stack.extend(successors.iter().copied().filter(|s| !snapshot.contains(*s)));
        }
    }

    fn walk_recursive(&self, id: NodeId, snapshot: &mut Snapshot) {
        if snapshot.contains(id) {
            return;
        }
        let Some(successors) = self.store.get_node(id) else {
            trace!(id, "unregistered id treated as leaf");
            return;
        };
        snapshot.insert(id, successors.clone());
        for child in successors {
            self.walk_recursive(*child, snapshot);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Successors;

    /// Two disconnected regions: {1,2,3} with a cycle and {10,11}.
    fn two_region_store() -> GraphStore {
        GraphStore::from_edges([(1, 2), (2, 3), (3, 1), (10, 11)])
    }

    #[test]
    fn build_from_origin_covers_reachable_only() {
        let store = two_region_store();
        let snapshot = SubgraphBuilder::new(&store).build(Some(1));
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn build_without_origin_covers_store() {
        let store = two_region_store();
        let snapshot = SubgraphBuilder::new(&store).build(None);
        assert_eq!(snapshot, store.to_snapshot());
    }

    #[test]
    fn build_from_unregistered_origin_is_empty() {
        let store = two_region_store();
        assert!(SubgraphBuilder::new(&store).build(Some(99)).is_empty());
    }

    #[test]
    fn dangling_target_is_a_leaf() {
        let mut store = GraphStore::from_edges([(1, 2), (2, 3)]);
        store.delete_nodes([2]);
        let snapshot = SubgraphBuilder::new(&store).build(Some(1));
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(snapshot.successors(1), Some(&Successors::from([2])));
    }

    #[test]
    fn snapshot_is_copied_not_aliased() {
        let mut store = GraphStore::from_edges([(1, 2)]);
        let snapshot = SubgraphBuilder::new(&store).build(Some(1));
        store.add_edges(1, [5]);
        assert_eq!(snapshot.successors(1), Some(&Successors::from([2])));
    }

    #[test]
    fn recursive_and_iterative_agree() {
        let store = two_region_store();
        let builder = SubgraphBuilder::new(&store);
        for origin in [None, Some(1), Some(10), Some(11), Some(42)] {
            assert_eq!(
                builder.build_recursive(origin),
                builder.build_iterative(origin),
                "origin {origin:?}"
            );
        }
    }

    #[test]
    fn crawl_unchanged_is_noop() {
        let store = two_region_store();
        let builder = SubgraphBuilder::new(&store);
        let snapshot = builder.build(Some(1));
        assert_eq!(builder.crawl(snapshot.clone()), snapshot);
    }

    #[test]
    fn crawl_picks_up_new_links_and_drops_deleted_nodes() {
        let mut store = two_region_store();
        let before = SubgraphBuilder::new(&store).build(Some(1));

        store.add_edges(3, [10]);
        store.delete_nodes([2]);

        let after = SubgraphBuilder::new(&store).crawl(before);
        assert_eq!(after.ids().collect::<Vec<_>>(), vec![1, 3, 10, 11]);
        assert_eq!(after.successors(3), Some(&Successors::from([1, 10])));
    }

    #[test]
    fn crawl_keeps_nodes_that_became_unreachable() {
        let mut store = GraphStore::from_edges([(1, 2), (2, 3)]);
        let before = SubgraphBuilder::new(&store).build(Some(1));

        store.delete_edges(1, [2]);
        let after = SubgraphBuilder::new(&store).crawl(before);
        assert!(after.contains(2), "raw crawl does not prune");
        assert_eq!(after.successors(1), Some(&Successors::new()));
    }
}
