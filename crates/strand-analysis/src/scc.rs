//! Strongly connected components (Kosaraju).
//!
//! # Phases
//!
//! 1. **Label**: an explicit-stack depth-first walk numbers every key in
//!    post-order. A node is labeled only once all of its in-snapshot
//!    successors have been visited; labels count up from 0. Roots are taken
//!    in ascending id order.
//! 2. **Transpose**: every edge is reversed
//!    ([`transpose`](crate::transpose::transpose)).
//! 3. **Extract**: repeatedly take the not-yet-extracted node with the
//!    highest label and collect everything it reaches in the transpose
//!    without crossing into already-extracted nodes. That set is one
//!    component.
//!
//! Components come out in topological order of the condensation: the first
//! one has no incoming edges from any other component.
//!
//! Dangling targets are not keys and take no part in the partition.

use std::collections::{BTreeMap, BTreeSet};

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use strand_core::{NodeId, Snapshot};

use crate::arena::DenseGraph;
use crate::transpose::transpose;

// ---------------------------------------------------------------------------
// Component / SccPartition
// ---------------------------------------------------------------------------

/// A maximal set of mutually reachable ids, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Component {
    members: Vec<NodeId>,
}

impl Component {
    fn new(mut members: Vec<NodeId>) -> Self {
        members.sort_unstable();
        Self { members }
    }

    /// Member ids in ascending order. Never empty.
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// The smallest member id, used as the component's stand-in when
    /// contracting.
    #[must_use]
    pub fn representative(&self) -> NodeId {
        self.members[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; components have at least one member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.binary_search(&id).is_ok()
    }

    /// Return `true` if the component has more than one member.
    ///
    /// A single node with a self-loop is still reported as trivial here; use
    /// the snapshot to check for self-loops.
    #[must_use]
    pub fn is_nontrivial(&self) -> bool {
        self.members.len() > 1
    }
}

/// A partition of a snapshot's keys into strongly connected components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SccPartition {
    components: Vec<Component>,
    #[serde(skip)]
    membership: BTreeMap<NodeId, usize>,
}

impl SccPartition {
    fn from_components(components: Vec<Component>) -> Self {
        let membership = components
            .iter()
            .enumerate()
            .flat_map(|(ix, c)| c.members.iter().map(move |id| (*id, ix)))
            .collect();
        Self {
            components,
            membership,
        }
    }

    /// Components in extraction order (topological order of the
    /// condensation).
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Exactly one component covers every key.
    #[must_use]
    pub fn is_strongly_connected(&self) -> bool {
        self.components.len() == 1
    }

    /// The component holding `id`, or `None` if `id` is not a key.
    #[must_use]
    pub fn component_of(&self, id: NodeId) -> Option<&Component> {
        self.membership.get(&id).map(|ix| &self.components[*ix])
    }

    /// Representative of the component holding `id`.
    #[must_use]
    pub fn representative_of(&self, id: NodeId) -> Option<NodeId> {
        self.component_of(id).map(Component::representative)
    }

    /// Components as sets, sorted by representative. Handy for comparing
    /// partitions regardless of extraction order.
    #[must_use]
    pub fn as_sets(&self) -> BTreeSet<BTreeSet<NodeId>> {
        self.components
            .iter()
            .map(|c| c.members.iter().copied().collect())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Partition the keys of `snapshot` into strongly connected components.
#[must_use]
#[instrument(skip(snapshot), fields(nodes = snapshot.len()))]
pub fn decompose(snapshot: &Snapshot) -> SccPartition {
    let graph = DenseGraph::from_snapshot(snapshot);
    let finish_order = postorder(&graph);
    let reversed = graph.reindex(&transpose(snapshot));
    let components = extract_components(&reversed, &finish_order);

    let partition = SccPartition::from_components(components);
    debug!(
        components = partition.len(),
        nontrivial = partition
            .components()
            .iter()
            .filter(|c| c.is_nontrivial())
            .count(),
        "decomposed snapshot"
    );
    partition
}

/// Number of strongly connected components.
#[must_use]
#[instrument(skip(snapshot))]
pub fn scc_count(snapshot: &Snapshot) -> usize {
    decompose(snapshot).len()
}

/// Return `true` if every key reaches every other key.
///
/// An empty snapshot has no components and is not strongly connected.
#[must_use]
#[instrument(skip(snapshot))]
pub fn is_strongly_connected(snapshot: &Snapshot) -> bool {
    decompose(snapshot).is_strongly_connected()
}

/// Post-order label of every key.
///
/// For every edge `u → v` that the walk follows or finds already finished,
/// `label(u) > label(v)`. In a DAG that holds for every edge.
#[must_use]
pub fn labels(snapshot: &Snapshot) -> BTreeMap<NodeId, usize> {
    let graph = DenseGraph::from_snapshot(snapshot);
    postorder(&graph)
        .into_iter()
        .enumerate()
        .map(|(label, ix)| (graph.id(ix), label))
        .collect()
}

// ---------------------------------------------------------------------------
// Labeler
// ---------------------------------------------------------------------------

/// Dense indices in finish order: position in the result is the label.
fn postorder(graph: &DenseGraph) -> Vec<usize> {
    let n = graph.len();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut order = Vec::with_capacity(n);
    // (node, position of the next successor to try)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited.contains(root) {
            continue;
        }
        visited.insert(root);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, pos) = *frame;
            let successors = graph.successors(node);
            let next = successors[pos..]
                .iter()
                .position(|s| !visited.contains(*s));

            if let Some(offset) = next {
                let child = successors[pos + offset];
                frame.1 = pos + offset + 1;
                visited.insert(child);
                stack.push((child, 0));
            } else {
                stack.pop();
                trace!(id = graph.id(node), label = order.len(), "labeled");
                order.push(node);
            }
        }
    }
    order
}

// ---------------------------------------------------------------------------
// ComponentExtractor
// ---------------------------------------------------------------------------

/// Walk `reversed` from each node in descending label order, collecting one
/// component per walk.
fn extract_components(reversed: &DenseGraph, finish_order: &[usize]) -> Vec<Component> {
    let mut extracted = FixedBitSet::with_capacity(reversed.len());
    let mut components = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for &start in finish_order.iter().rev() {
        if extracted.contains(start) {
            continue;
        }
        extracted.insert(start);
        stack.push(start);
        let mut members = Vec::new();

        while let Some(node) = stack.pop() {
            members.push(reversed.id(node));
            for &pred in reversed.successors(node) {
                if !extracted.contains(pred) {
                    extracted.insert(pred);
                    stack.push(pred);
                }
            }
        }

        components.push(Component::new(members));
    }
    components
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
