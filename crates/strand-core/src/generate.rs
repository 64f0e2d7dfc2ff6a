//! Seeded random graph generation.
//!
//! Used by benchmarks, the `strand generate` command and tests that need a
//! reproducible graph larger than a hand-written fixture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::snapshot::NodeId;
use crate::store::GraphStore;

/// Build a store with ids `0..node_count` where each ordered pair `(u, v)`,
/// `u != v`, becomes an edge with probability `edge_probability`.
///
/// The probability is clamped to `[0.0, 1.0]`. The same seed always yields
/// the same store.
#[must_use]
pub fn random_store(node_count: u64, edge_probability: f64, seed: u64) -> GraphStore {
    let p = if edge_probability.is_nan() {
        0.0
    } else {
        edge_probability.clamp(0.0, 1.0)
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = GraphStore::new();

    for from in 0..node_count {
        let successors: Vec<NodeId> = (0..node_count)
            .filter(|to| *to != from)
            .filter(|_| rng.gen_bool(p))
            .collect();
        store.add_node(from, successors);
    }

    debug!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        seed,
        "generated random store"
    );
    store
}
