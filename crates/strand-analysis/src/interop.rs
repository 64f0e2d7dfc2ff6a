//! Conversion to petgraph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use strand_core::{NodeId, Snapshot};

/// Build a petgraph [`DiGraph`] from `snapshot`.
///
/// Every known id (keys and dangling targets) becomes a node weighted by its
/// id, added in ascending id order. The returned map translates ids to
/// petgraph indices.
#[must_use]
pub fn to_petgraph(snapshot: &Snapshot) -> (DiGraph<NodeId, ()>, HashMap<NodeId, NodeIndex>) {
    let known = snapshot.known_ids();
    let mut graph = DiGraph::with_capacity(known.len(), snapshot.edge_count());
    let mut node_map = HashMap::with_capacity(known.len());

    for id in known {
        node_map.insert(id, graph.add_node(id));
    }
    for edge in snapshot.edges() {
        if let (Some(from), Some(to)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
            graph.add_edge(*from, *to, ());
        }
    }
    (graph, node_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::{is_cyclic_directed, tarjan_scc};

    #[test]
    fn dangling_targets_become_nodes() {
        let s = Snapshot::from_edges([(1, 2), (2, 9)]);
        let (g, map) = to_petgraph(&s);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.contains_edge(map[&2], map[&9]));
        assert_eq!(g[map[&9]], 9);
    }

    #[test]
    fn petgraph_sees_the_same_structure() {
        let s = Snapshot::from_walks([vec![0, 1, 2, 0], vec![2, 3, 4], vec![4]]);
        let (g, _) = to_petgraph(&s);
        assert!(is_cyclic_directed(&g));
        assert_eq!(tarjan_scc(&g).len(), 3);
    }
}
