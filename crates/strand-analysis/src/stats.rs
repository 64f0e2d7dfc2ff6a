//! Summary statistics for a snapshot.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of keys.
//! - **edge_count**: Edges between keys. Dangling links are counted
//!   separately in **dangling_link_count**.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. Zero for
//!   graphs with fewer than two nodes. Self-loops count as edges, so a graph
//!   full of them can exceed 1.0.
//! - **scc_count**: Number of strongly connected components.
//! - **cycle_count**: Components that contain a cycle: more than one member,
//!   or a single member with a self-loop.
//! - **weakly_connected_component_count**: Components when edge direction is
//!   ignored.
//! - **isolated_node_count**: Keys with no in-snapshot edges in either
//!   direction.
//! - **max_in_degree** / **max_out_degree**: Highest degrees over keys,
//!   counting in-snapshot edges only.
//! - **reduced_edge_count**: Edges left after contracting SCCs and removing
//!   redundant edges from the result.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::Serialize;
use tracing::instrument;

use strand_core::{NodeId, Snapshot, Successors};

use crate::arena::DenseGraph;
use crate::contract::contract;
use crate::interop::to_petgraph;
use crate::reduce::reduce;
use crate::scc::decompose;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of keys.
    pub node_count: usize,
    /// Number of edges whose target is also a key.
    pub edge_count: usize,
    /// Edges whose target is not a key.
    pub dangling_link_count: usize,
    /// `edge_count / (node_count * (node_count - 1))`.
    pub density: f64,
    /// Number of strongly connected components.
    pub scc_count: usize,
    /// Number of components containing a cycle.
    pub cycle_count: usize,
    /// Number of weakly connected components over keys.
    pub weakly_connected_component_count: usize,
    /// Keys with no in or out edges.
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// Edges in the transitively reduced condensation.
    pub reduced_edge_count: usize,
    /// Whether the snapshot is acyclic.
    pub is_dag: bool,
}

impl GraphStats {
    /// Compute statistics for `snapshot`.
    #[must_use]
    #[instrument(skip(snapshot), fields(nodes = snapshot.len()))]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let graph = DenseGraph::from_snapshot(snapshot);
        let node_count = graph.len();
        let edge_count = graph.edge_count();
        let dangling_link_count = snapshot.dangling_links().count();

        let partition = decompose(snapshot);
        let cycle_count = partition
            .components()
            .iter()
            .filter(|c| {
                c.is_nontrivial()
                    || snapshot
                        .successors(c.representative())
                        .is_some_and(|succ| succ.contains(&c.representative()))
            })
            .count();

        let degrees = degree_centrality(snapshot);
        let isolated_node_count = degrees
            .values()
            .filter(|d| d.in_degree == 0 && d.out_degree == 0)
            .count();
        let max_in_degree = degrees.values().map(|d| d.in_degree).max().unwrap_or(0);
        let max_out_degree = degrees.values().map(|d| d.out_degree).max().unwrap_or(0);

        let keys_only: Snapshot = snapshot
            .iter()
            .map(|(id, succ)| {
                let kept: Successors = succ.iter().copied().filter(|s| snapshot.contains(*s)).collect();
                (id, kept)
            })
            .collect();
        let (pg, _) = to_petgraph(&keys_only);
        let weakly_connected_component_count = connected_components(&pg);

        let reduced_edge_count = reduce(&contract(snapshot, &partition))
            .reduced
            .edge_count();

        Self {
            node_count,
            edge_count,
            dangling_link_count,
            density: compute_density(node_count, edge_count),
            scc_count: partition.len(),
            cycle_count,
            weakly_connected_component_count,
            isolated_node_count,
            max_in_degree,
            max_out_degree,
            reduced_edge_count,
            is_dag: cycle_count == 0,
        }
    }

    /// Return `true` if there are no edges between keys.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }
}

// ---------------------------------------------------------------------------
// Degree centrality
// ---------------------------------------------------------------------------

/// In and out degree of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Degree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl Degree {
    #[must_use]
    pub const fn total(self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// Degree of every key, counting only edges between keys.
#[must_use]
pub fn degree_centrality(snapshot: &Snapshot) -> BTreeMap<NodeId, Degree> {
    let mut degrees: BTreeMap<NodeId, Degree> =
        snapshot.ids().map(|id| (id, Degree::default())).collect();
    for edge in snapshot.edges() {
        if !snapshot.contains(edge.to) {
            continue;
        }
        if let Some(d) = degrees.get_mut(&edge.from) {
            d.out_degree += 1;
        }
        if let Some(d) = degrees.get_mut(&edge.to) {
            d.in_degree += 1;
        }
    }
    degrees
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_stats() {
        let stats = GraphStats::from_snapshot(&Snapshot::new());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!((stats.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.scc_count, 0);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert!(stats.is_flat());
        assert!(stats.is_dag);
    }

    #[test]
    fn end_to_end_example_stats() {
        let s = Snapshot::from_walks([vec![0, 1, 2, 0], vec![2, 3, 4], vec![4]]);
        let stats = GraphStats::from_snapshot(&s);
        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.scc_count, 3);
        assert_eq!(stats.cycle_count, 1);
        assert!(stats.has_cycles());
        assert!(!stats.is_dag);
        assert_eq!(stats.weakly_connected_component_count, 1);
        assert_eq!(stats.max_out_degree, 2, "2 -> {{0, 3}}");
        assert_eq!(stats.reduced_edge_count, 2);
    }

    #[test]
    fn self_loop_counts_as_cycle() {
        let s = Snapshot::from_edges([(1, 1)]);
        let stats = GraphStats::from_snapshot(&s);
        assert_eq!(stats.scc_count, 1);
        assert_eq!(stats.cycle_count, 1);
        assert!(!stats.is_dag);
    }

    #[test]
    fn dangling_links_counted_separately() {
        let s = Snapshot::from_edges([(1, 2), (2, 9), (2, 8)]);
        let stats = GraphStats::from_snapshot(&s);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.dangling_link_count, 2);
        assert!((stats.density - 0.5).abs() < 1e-10);
    }

    #[test]
    fn isolated_and_disjoint() {
        let s = Snapshot::from_walks([vec![1, 2], vec![2], vec![3, 4], vec![4], vec![5]]);
        let stats = GraphStats::from_snapshot(&s);
        assert_eq!(stats.isolated_node_count, 1);
        assert_eq!(stats.weakly_connected_component_count, 3);
    }

    #[test]
    fn hub_degrees() {
        let s = Snapshot::from_walks([vec![1, 3], vec![2, 3], vec![4, 3], vec![3, 5], vec![5]]);
        let degrees = degree_centrality(&s);
        assert_eq!(
            degrees[&3],
            Degree {
                in_degree: 3,
                out_degree: 1
            }
        );
        assert_eq!(degrees[&3].total(), 4);
        let stats = GraphStats::from_snapshot(&s);
        assert_eq!(stats.max_in_degree, 3);
        assert_eq!(stats.max_out_degree, 1);
    }
}
