//! Dense, integer-indexed view of a snapshot.
//!
//! Node ids are mapped to `0..n` in ascending id order and successor lists
//! are stored in Compressed Sparse Row form. Only edges whose target is a
//! snapshot key are kept: dangling links have no index and are dropped.
//!
//! All stack-based traversals in this crate run over a [`DenseGraph`] so
//! they can keep per-node state in flat vectors and bitsets.

use std::collections::HashMap;

use strand_core::{NodeId, Snapshot};

/// CSR adjacency over the keys of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGraph {
    /// Dense index → node id (ascending).
    index_to_node: Vec<NodeId>,
    /// Node id → dense index.
    node_to_index: HashMap<NodeId, usize>,
    /// Offsets into `targets`. Length = `n + 1`.
    offsets: Vec<usize>,
    /// Successor indices, ascending per node.
    targets: Vec<usize>,
}

impl DenseGraph {
    /// Index every key of `snapshot` and keep its in-snapshot edges.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let index_to_node: Vec<NodeId> = snapshot.ids().collect();
        let node_to_index: HashMap<NodeId, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect();
        Self::with_edges_from(index_to_node, node_to_index, snapshot)
    }

    /// Reuse this graph's node indexing for the edges of `other`.
    ///
    /// Edges of `other` touching ids outside this graph are ignored. Used to
    /// walk a transpose over the same index space as the original.
    #[must_use]
    pub fn reindex(&self, other: &Snapshot) -> Self {
        Self::with_edges_from(
            self.index_to_node.clone(),
            self.node_to_index.clone(),
            other,
        )
    }

    fn with_edges_from(
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        snapshot: &Snapshot,
    ) -> Self {
        let mut offsets = Vec::with_capacity(index_to_node.len() + 1);
        let mut targets = Vec::new();
        offsets.push(0);

        for id in &index_to_node {
            if let Some(successors) = snapshot.successors(*id) {
                targets.extend(
                    successors
                        .iter()
                        .filter_map(|to| node_to_index.get(to).copied()),
                );
            }
            offsets.push(targets.len());
        }

        Self {
            index_to_node,
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Number of indexed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index_to_node.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_to_node.is_empty()
    }

    /// Node id at dense index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn id(&self, idx: usize) -> NodeId {
        self.index_to_node[idx]
    }

    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.node_to_index.get(&id).copied()
    }

    /// Successor indices of `idx`, ascending.
    #[must_use]
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Number of in-snapshot edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_keys_in_ascending_order() {
        let s = Snapshot::from_edges([(30, 10), (10, 20), (20, 30)]);
        let g = DenseGraph::from_snapshot(&s);
        assert_eq!(g.len(), 3);
        assert_eq!((g.id(0), g.id(1), g.id(2)), (10, 20, 30));
        assert_eq!(g.index_of(20), Some(1));
        assert_eq!(g.successors(2), &[0]);
    }

    #[test]
    fn dangling_links_are_dropped() {
        let s = Snapshot::from_edges([(1, 2), (1, 99)]);
        let g = DenseGraph::from_snapshot(&s);
        assert_eq!(g.len(), 1, "only key 1 is indexed");
        assert!(g.successors(0).is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.index_of(99), None);
    }

    #[test]
    fn reindex_shares_index_space() {
        let s = Snapshot::from_walks([vec![1, 2, 3], vec![3]]);
        let g = DenseGraph::from_snapshot(&s);
        let t = Snapshot::from_edges([(2, 1), (3, 2), (7, 3)]);
        let r = g.reindex(&t);
        assert_eq!(r.len(), g.len());
        assert_eq!(r.successors(g.index_of(3).unwrap()), &[1]);
        assert!(r.successors(0).is_empty());
    }
}
