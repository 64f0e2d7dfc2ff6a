//! Primitive graph types: node ids, edges and adjacency snapshots.
//!
//! # Overview
//!
//! A [`Snapshot`] is an ordered mapping from node id to the set of its
//! successor ids. It is the value every analysis consumes. Snapshots may
//! contain **dangling links**: successor ids that are not themselves keys
//! (the target was deleted or never registered). Traversals treat such ids
//! as leaves and never fail on them.
//!
//! Both the key map and the successor sets are `BTree` collections, so
//! iteration order, serialized output and [`Snapshot::content_hash`] are
//! deterministic for equal snapshots.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Node identifier.
pub type NodeId = u64;

/// Outgoing edges of one node. Set semantics: parallel edges collapse.
pub type Successors = BTreeSet<NodeId>;

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed edge `from → to`.
///
/// Edges are derived data: they are always reconstructed from a successor
/// set and never stored on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    /// Return the same edge pointing the other way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Return `true` if the edge starts and ends at the same node.
    #[must_use]
    pub const fn is_self_loop(self) -> bool {
        self.from == self.to
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((from, to): (NodeId, NodeId)) -> Self {
        Self { from, to }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A point-in-time adjacency map: node id → successor ids.
///
/// Every key appears once. Successor values may reference ids that are not
/// keys (dangling links).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    adjacency: BTreeMap<NodeId, Successors>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a set of edges.
    ///
    /// Only edge sources become keys. Targets that never appear as a source
    /// stay dangling, exactly as they were described.
    pub fn from_edges<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut snapshot = Self::new();
        for edge in edges {
            let edge = edge.into();
            snapshot.adjacency.entry(edge.from).or_default().insert(edge.to);
        }
        snapshot
    }

    /// Build a snapshot from walks (ordered id sequences).
    ///
    /// Each walk is split into consecutive-pair edges. A single-id walk
    /// registers that id with no successors; an empty walk is ignored.
    pub fn from_walks<W, I>(walks: W) -> Self
    where
        W: IntoIterator<Item = I>,
        I: IntoIterator<Item = NodeId>,
    {
        let mut snapshot = Self::new();
        for walk in walks {
            let mut previous: Option<NodeId> = None;
            for id in walk {
                match previous {
                    Some(from) => {
                        snapshot.adjacency.entry(from).or_default().insert(id);
                    }
                    None => {
                        snapshot.adjacency.entry(id).or_default();
                    }
                }
                previous = Some(id);
            }
        }
        snapshot
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Return `true` if `id` is a key of this snapshot.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Successor set of `id`, or `None` if `id` is not a key.
    #[must_use]
    pub fn successors(&self, id: NodeId) -> Option<&Successors> {
        self.adjacency.get(&id)
    }

    /// Keys in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// `(id, successors)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Successors)> + '_ {
        self.adjacency.iter().map(|(id, succ)| (*id, succ))
    }

    /// All edges in ascending `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(from, succ)| succ.iter().map(|to| Edge::new(*from, *to)))
    }

    /// Total number of edges, dangling ones included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    /// Every id the snapshot knows about: keys plus every successor value.
    #[must_use]
    pub fn known_ids(&self) -> BTreeSet<NodeId> {
        self.adjacency
            .iter()
            .flat_map(|(id, succ)| std::iter::once(*id).chain(succ.iter().copied()))
            .collect()
    }

    /// Edges whose target is not a key of this snapshot.
    pub fn dangling_links(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges().filter(|edge| !self.contains(edge.to))
    }

    /// Insert or replace the successor set of `id`, returning the old one.
    pub fn insert(&mut self, id: NodeId, successors: Successors) -> Option<Successors> {
        self.adjacency.insert(id, successors)
    }

    /// Remove `id` as a key. Edges pointing at it are left in place.
    pub fn remove(&mut self, id: NodeId) -> Option<Successors> {
        self.adjacency.remove(&id)
    }

    /// Remove a single edge. Returns `true` if it was present.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        self.adjacency
            .get_mut(&edge.from)
            .is_some_and(|succ| succ.remove(&edge.to))
    }

    /// Keep only the keys reachable from `origin` (origin included).
    ///
    /// If `origin` is not a key the snapshot becomes empty.
    pub fn retain_reachable(&mut self, origin: NodeId) {
        let mut reached: BTreeSet<NodeId> = BTreeSet::new();
        let mut stack = vec![origin];
        while let Some(id) = stack.pop() {
            let Some(succ) = self.adjacency.get(&id) else {
                continue;
            };
            if !reached.insert(id) {
                continue;
            }
            stack.extend(succ.iter().copied().filter(|s| !reached.contains(s)));
        }
        self.adjacency.retain(|id, _| reached.contains(id));
    }

    /// BLAKE3 fingerprint of the key set and edge set.
    ///
    /// Equal snapshots always hash equal; use this to detect when a cached
    /// analysis needs to be recomputed.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (id, succ) in &self.adjacency {
            hasher.update(&id.to_le_bytes());
            hasher.update(b"\x00");
            for to in succ {
                hasher.update(&to.to_le_bytes());
            }
            hasher.update(b"\x01");
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Consume the snapshot and return the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<NodeId, Successors> {
        self.adjacency
    }
}

impl From<BTreeMap<NodeId, Successors>> for Snapshot {
    fn from(adjacency: BTreeMap<NodeId, Successors>) -> Self {
        Self { adjacency }
    }
}

impl FromIterator<(NodeId, Successors)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (NodeId, Successors)>>(iter: T) -> Self {
        Self {
            adjacency: iter.into_iter().collect(),
        }
    }
}

impl Extend<(NodeId, Successors)> for Snapshot {
    fn extend<T: IntoIterator<Item = (NodeId, Successors)>>(&mut self, iter: T) {
        self.adjacency.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a NodeId, &'a Successors);
    type IntoIter = std::collections::btree_map::Iter<'a, NodeId, Successors>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjacency.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_collapses_parallel_edges() {
        let s = Snapshot::from_edges([(1, 2), (1, 2), (2, 3)]);
        assert_eq!(s.len(), 2, "only sources become keys");
        assert_eq!(s.edge_count(), 2);
        assert!(!s.contains(3), "3 stays dangling");
    }

    #[test]
    fn from_walks_splits_consecutive_pairs() {
        let s = Snapshot::from_walks([vec![1, 2, 3], vec![3, 1], vec![9], vec![]]);
        let edges: Vec<(NodeId, NodeId)> = s.edges().map(|e| (e.from, e.to)).collect();
        assert_eq!(edges, vec![(1, 2), (2, 3), (3, 1)]);
        assert!(s.contains(9), "single-id walk registers the id");
        assert!(s.successors(9).is_some_and(BTreeSet::is_empty));
    }

    #[test]
    fn known_ids_include_dangling_targets() {
        let s = Snapshot::from_edges([(1, 2), (2, 7)]);
        assert_eq!(s.known_ids(), BTreeSet::from([1, 2, 7]));
        let dangling: Vec<Edge> = s.dangling_links().collect();
        assert_eq!(dangling, vec![Edge::new(2, 7)]);
    }

    #[test]
    fn retain_reachable_drops_unreachable_keys() {
        let mut s = Snapshot::from_edges([(1, 2), (2, 1), (3, 1), (4, 4)]);
        s.retain_reachable(1);
        assert_eq!(s.ids().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn retain_reachable_unknown_origin_empties() {
        let mut s = Snapshot::from_edges([(1, 2)]);
        s.retain_reachable(5);
        assert!(s.is_empty());
    }

    #[test]
    fn content_hash_tracks_edges_and_keys() {
        let a = Snapshot::from_edges([(1, 2), (2, 3)]);
        let b = Snapshot::from_edges([(2, 3), (1, 2)]);
        assert_eq!(a.content_hash(), b.content_hash());
        assert!(a.content_hash().starts_with("blake3:"));

        let mut c = a.clone();
        c.insert(3, Successors::new());
        assert_ne!(a.content_hash(), c.content_hash(), "new key changes hash");
    }

    #[test]
    fn remove_edge_reports_presence() {
        let mut s = Snapshot::from_edges([(1, 2)]);
        assert!(s.remove_edge(Edge::new(1, 2)));
        assert!(!s.remove_edge(Edge::new(1, 2)));
        assert!(!s.remove_edge(Edge::new(8, 9)));
    }

    #[test]
    fn serializes_as_plain_map() {
        let s = Snapshot::from_edges([(1, 2)]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"1":[2]}"#);
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
