//! Recursive and iterative snapshot builders must agree byte-for-byte.

use strand_core::config::Traversal;
use strand_core::{GraphStore, Snapshot, SubgraphBuilder};

/// Connected example with cycles, a self-loop and a dangling link.
///
/// ```text
///     0   8 ← 10
///   ↙ ⇅     ↘ ↑
///   1 → 2     9 → 11
///   ↓ ↗ ↑     ↑
///   3 → 4 ← 5 ⇄ 12
///     ↖ ↓ ↗ ↑
///       7   6
/// ```
fn connected_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(0, [1, 2]);
    store.add_node(1, [2, 3]);
    store.add_node(2, [0]);
    store.add_node(3, [2, 4]);
    store.add_node(4, [2, 7]);
    store.add_node(5, [4, 5, 12]);
    store.add_node(6, [5]);
    store.add_node(7, [3, 5]);
    store.add_node(8, [9]);
    store.add_node(9, [10, 11]);
    store.add_node(10, [8]);
    store.add_node(11, []);
    store.add_node(12, [5, 9, 40]);
    store
}

/// Three disconnected regions plus an isolated node.
fn disconnected_store() -> GraphStore {
    GraphStore::from_walks([
        vec![20, 21, 22, 23, 21],
        vec![22, 24],
        vec![30, 31, 30],
        vec![50],
    ])
}

fn bytes(snapshot: &Snapshot) -> Vec<u8> {
    serde_json::to_vec(snapshot).unwrap()
}

fn assert_builders_agree(store: &GraphStore, origin: Option<u64>) {
    let builder = SubgraphBuilder::new(store);
    let iterative = builder.build_iterative(origin);
    let recursive = builder.build_recursive(origin);

    assert_eq!(bytes(&iterative), bytes(&recursive), "origin {origin:?}");
    assert_eq!(iterative.content_hash(), recursive.content_hash());

    let via_config = builder.with_traversal(Traversal::Recursive).build(origin);
    assert_eq!(via_config, iterative);
}

#[test]
fn connected_graph_builders_agree() {
    let store = connected_store();
    for origin in store.ids().map(Some).chain([None, Some(40)]) {
        assert_builders_agree(&store, origin);
    }
}

#[test]
fn disconnected_graph_builders_agree() {
    let store = disconnected_store();
    for origin in store.ids().map(Some).chain([None]) {
        assert_builders_agree(&store, origin);
    }
}

#[test]
fn connected_graph_reachability_from_zero() {
    let store = connected_store();
    let snapshot = SubgraphBuilder::new(&store).build(Some(0));
    let ids: Vec<u64> = snapshot.ids().collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12]);
    assert!(!snapshot.contains(6), "6 only has outgoing edges");
    assert!(!snapshot.contains(40), "unregistered target contributes no entry");
    assert_eq!(snapshot.dangling_links().count(), 1);
}

#[test]
fn disconnected_whole_store_is_union_of_regions() {
    let store = disconnected_store();
    let builder = SubgraphBuilder::new(&store);
    let whole = builder.build(None);

    let mut union = Snapshot::new();
    for origin in [20, 30, 50] {
        union.extend(builder.build(Some(origin)).into_inner());
    }
    assert_eq!(whole, union);
    assert_eq!(whole.len(), store.node_count());
}

#[test]
fn deep_chain_iterative_build_does_not_overflow() {
    let store = GraphStore::from_walks([(0..200_000u64).collect::<Vec<_>>()]);
    let snapshot = SubgraphBuilder::new(&store).build(Some(0));
    assert_eq!(snapshot.len(), 200_000);
}
