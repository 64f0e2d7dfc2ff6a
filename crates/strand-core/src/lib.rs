#![forbid(unsafe_code)]
//! strand-core library.
//!
//! Owns the mutable link graph ([`GraphStore`]) and everything needed to take
//! reachability-limited snapshots of it ([`SubgraphBuilder`], [`Crawler`]).
//! Analysis over snapshots lives in `strand-analysis`.
//!
//! # Conventions
//!
//! - **Errors**: [`GraphError`] for validation failures; `anyhow::Result` for
//!   I/O-bound helpers such as [`config::load_config`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!   The library never installs a subscriber.

pub mod config;
pub mod crawler;
pub mod error;
pub mod generate;
pub mod snapshot;
pub mod store;
pub mod subgraph;

pub use crawler::Crawler;
pub use error::GraphError;
pub use snapshot::{Edge, NodeId, Snapshot, Successors};
pub use store::GraphStore;
pub use subgraph::SubgraphBuilder;
