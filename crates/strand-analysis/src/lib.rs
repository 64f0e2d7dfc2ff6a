#![forbid(unsafe_code)]
//! strand-analysis library.
//!
//! Read-only algorithms over [`Snapshot`](strand_core::Snapshot)s.
//!
//! ## Pipeline
//!
//! ```text
//! GraphStore
//!        ↓  SubgraphBuilder::build / Crawler::crawl   (strand-core)
//! Snapshot (may contain cycles and dangling links)
//!        ├─ distance::distance            shortest hop count
//!        ├─ scc::decompose                Kosaraju partition (via transpose)
//!        ├─ cycles::find_cycle            one witness cycle, or a DAG
//!        ├─ reduce::reduce                redundant-edge elimination
//!        └─ contract::contract            SCCs collapsed to representatives (DAG)
//! ```
//!
//! Every traversal uses an explicit stack over a dense index arena
//! ([`arena::DenseGraph`]), so native stack depth stays constant regardless
//! of graph depth.
//!
//! # Conventions
//!
//! - **Absent ids**: queries about unknown ids return `None`/`false`, never
//!   an error.
//! - **Dangling links** (edges to ids that are not snapshot keys) are
//!   tolerated everywhere and never traversed through.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod arena;
pub mod contract;
pub mod cycles;
pub mod distance;
pub mod interop;
pub mod reach;
pub mod reduce;
pub mod scc;
pub mod stats;
pub mod transpose;

// Re-export primary entry points at crate level for convenience.
pub use contract::{condense, contract};
pub use cycles::{find_cycle, is_dag};
pub use distance::distance;
pub use reach::{descendants, find_root, reachable};
pub use reduce::{Reduction, reduce, reduce_with_order};
pub use scc::{Component, SccPartition, decompose, is_strongly_connected, scc_count};
pub use interop::to_petgraph;
pub use stats::{Degree, GraphStats, degree_centrality};
pub use transpose::transpose;
