//! The mutable node registry.
//!
//! # Overview
//!
//! [`GraphStore`] owns every registered node and its outgoing edges. It is
//! the only mutable structure in strand: snapshots are taken from it on
//! demand by [`SubgraphBuilder`](crate::SubgraphBuilder) and analysed
//! separately.
//!
//! ## Deletion modes
//!
//! [`GraphStore::delete_nodes`] removes nodes from the registry but leaves
//! edges that other nodes hold towards them. Those edges become **dangling
//! links**, which traversals treat as leaves. When a clean graph is wanted,
//! [`GraphStore::delete_nodes_scrubbing`] also removes every incoming edge,
//! at O(total edges) cost.
//!
//! ## Absent ids
//!
//! Operating on an id that is not registered is never an error: edge
//! mutations on an absent source are no-ops and report `false`. The one
//! validated operation is [`GraphStore::set_origin`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::snapshot::{Edge, NodeId, Snapshot, Successors};

/// Registry of nodes keyed by id, each holding its successor set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, Successors>,
    origin: Option<NodeId>,
}

impl GraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-construct a store from edges.
    ///
    /// Both endpoints of every edge are registered, so the resulting store
    /// has no dangling links.
    pub fn from_edges<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut store = Self::new();
        for edge in edges {
            let edge = edge.into();
            store.nodes.entry(edge.from).or_default().insert(edge.to);
            store.nodes.entry(edge.to).or_default();
        }
        store
    }

    /// Bulk-construct a store from walks (ordered id sequences).
    ///
    /// Each walk contributes its consecutive pairs as edges and registers
    /// every id it visits. Empty walks are ignored.
    pub fn from_walks<W, I>(walks: W) -> Self
    where
        W: IntoIterator<Item = I>,
        I: IntoIterator<Item = NodeId>,
    {
        let mut store = Self::new();
        for walk in walks {
            let mut previous: Option<NodeId> = None;
            for id in walk {
                store.nodes.entry(id).or_default();
                if let Some(from) = previous {
                    store.nodes.entry(from).or_default().insert(id);
                }
                previous = Some(id);
            }
        }
        store
    }

    // -----------------------------------------------------------------------
    // Node operations
    // -----------------------------------------------------------------------

    /// Register `id` with the given successors, replacing any previous entry.
    pub fn add_node(&mut self, id: NodeId, successors: impl IntoIterator<Item = NodeId>) {
        self.nodes.insert(id, successors.into_iter().collect());
    }

    /// Remove nodes from the registry, leaving edges that point at them.
    ///
    /// Returns the number of nodes actually removed. Removing the current
    /// origin clears it.
    pub fn delete_nodes(&mut self, ids: impl IntoIterator<Item = NodeId>) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.nodes.remove(&id).is_some() {
                removed += 1;
                if self.origin == Some(id) {
                    self.origin = None;
                }
            }
        }
        removed
    }

    /// Remove nodes and every edge pointing at them from the remaining nodes.
    ///
    /// Returns the number of nodes removed. Incoming edges are scrubbed even
    /// for ids that were not registered, so this also cleans up dangling
    /// links towards them.
    #[instrument(skip(self, ids))]
    pub fn delete_nodes_scrubbing(&mut self, ids: impl IntoIterator<Item = NodeId>) -> usize {
        let ids: BTreeSet<NodeId> = ids.into_iter().collect();
        let removed = self.delete_nodes(ids.iter().copied());

        let mut scrubbed = 0usize;
        for succ in self.nodes.values_mut() {
            let before = succ.len();
            succ.retain(|to| !ids.contains(to));
            scrubbed += before - succ.len();
        }

        debug!(removed, scrubbed, "deleted nodes and incoming edges");
        removed
    }

    /// Successor set of `id`, or `None` if it is not registered.
    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<&Successors> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Edge operations
    // -----------------------------------------------------------------------

    /// Add edges `from → to` for each target. Idempotent.
    ///
    /// Returns `false` (and does nothing) if `from` is not registered.
    /// Targets do not need to be registered.
    pub fn add_edges(&mut self, from: NodeId, to: impl IntoIterator<Item = NodeId>) -> bool {
        let Some(succ) = self.nodes.get_mut(&from) else {
            return false;
        };
        succ.extend(to);
        true
    }

    /// Remove edges `from → to` for each target. Missing edges are ignored.
    ///
    /// Returns `false` if `from` is not registered.
    pub fn delete_edges(&mut self, from: NodeId, to: impl IntoIterator<Item = NodeId>) -> bool {
        let Some(succ) = self.nodes.get_mut(&from) else {
            return false;
        };
        for id in to {
            succ.remove(&id);
        }
        true
    }

    /// All edges in ascending `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .flat_map(|(from, succ)| succ.iter().map(|to| Edge::new(*from, *to)))
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(BTreeSet::len).sum()
    }

    /// Edges whose target is not registered.
    pub fn dangling_links(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges().filter(|edge| !self.contains(edge.to))
    }

    /// Return `true` if any edge points at an unregistered id.
    #[must_use]
    pub fn exists_dangling_link(&self) -> bool {
        self.dangling_links().next().is_some()
    }

    /// Delete every edge in `removed` from the live store.
    ///
    /// Intended for applying a computed transitive reduction. Returns the
    /// number of edges that were present and got removed.
    pub fn remove_edges<'a>(&mut self, removed: impl IntoIterator<Item = &'a Edge>) -> usize {
        let mut count = 0;
        for edge in removed {
            if self
                .nodes
                .get_mut(&edge.from)
                .is_some_and(|succ| succ.remove(&edge.to))
            {
                count += 1;
            }
        }
        count
    }

    /// Copy the whole registry into a snapshot, unreachable nodes included.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::from(self.nodes.clone())
    }

    // -----------------------------------------------------------------------
    // Origin
    // -----------------------------------------------------------------------

    /// The explicitly chosen traversal root, if any.
    #[must_use]
    pub const fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    /// Choose the traversal root.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOrigin`] if `id` is not registered.
    pub fn set_origin(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.validate_origin(id)?;
        self.origin = Some(id);
        Ok(())
    }

    /// Check that `id` can serve as a traversal root.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOrigin`] if `id` is not registered.
    pub fn validate_origin(&self, id: NodeId) -> Result<NodeId, GraphError> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(GraphError::InvalidOrigin(id))
        }
    }

    /// The explicit origin, falling back to the smallest registered id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyStore`] when no origin was set and the
    /// store has no nodes.
    pub fn default_origin(&self) -> Result<NodeId, GraphError> {
        self.origin
            .or_else(|| self.nodes.keys().next().copied())
            .ok_or(GraphError::EmptyStore)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
