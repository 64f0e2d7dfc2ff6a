//! Origin-tracking snapshot holder with incremental refresh.
//!
//! # Overview
//!
//! A [`Crawler`] exclusively owns one snapshot and the origin it was taken
//! from. [`Crawler::crawl`] brings the snapshot up to date with the store
//! using [`SubgraphBuilder::crawl`] and then reconciles it so the result
//! matches a fresh [`SubgraphBuilder::build`] from the same origin:
//!
//! - previously dangling successors that have since been registered are
//!   walked as extra frontier;
//! - keys no longer reachable from the origin are pruned.
//!
//! ## Deleted origin
//!
//! If the origin itself has been deleted there is nothing to rebuild from.
//! The crawler then keeps the last known structure (minus every deleted
//! node, the origin included) and does **not** prune. This intentionally
//! differs from a fresh build, which would be empty.
//!
//! ## Whole-store crawler
//!
//! A crawler created without an origin covers the whole store; crawling it
//! additionally walks every registered id not yet present.

use tracing::{debug, instrument, warn};

use crate::config::Traversal;
use crate::error::GraphError;
use crate::snapshot::{NodeId, Snapshot};
use crate::store::GraphStore;
use crate::subgraph::SubgraphBuilder;

/// Owns a snapshot and the origin it is maintained from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crawler {
    origin: Option<NodeId>,
    traversal: Traversal,
    snapshot: Snapshot,
}

impl Crawler {
    /// Validate `origin` and take the initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOrigin`] if `origin` is given but not
    /// registered in `store`.
    pub fn new(store: &GraphStore, origin: Option<NodeId>) -> Result<Self, GraphError> {
        Self::with_traversal(store, origin, Traversal::default())
    }

    /// [`new`](Self::new) with an explicit walker.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOrigin`] if `origin` is given but not
    /// registered in `store`.
    pub fn with_traversal(
        store: &GraphStore,
        origin: Option<NodeId>,
        traversal: Traversal,
    ) -> Result<Self, GraphError> {
        if let Some(id) = origin {
            store.validate_origin(id)?;
        }
        let snapshot = SubgraphBuilder::new(store)
            .with_traversal(traversal)
            .build(origin);
        Ok(Self {
            origin,
            traversal,
            snapshot,
        })
    }

    #[must_use]
    pub const fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Give up ownership of the maintained snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Bring the snapshot up to date with `store`.
    ///
    /// Returns `true` if the snapshot changed.
    #[instrument(skip(self, store), fields(origin = ?self.origin))]
    pub fn crawl(&mut self, store: &GraphStore) -> bool {
        let builder = SubgraphBuilder::new(store).with_traversal(self.traversal);
        let before = self.snapshot.content_hash();
        let mut snapshot = builder.crawl(std::mem::take(&mut self.snapshot));

        match self.origin {
            Some(origin) if store.contains(origin) => {
                // A re-registered origin may have been dropped by an earlier crawl.
                builder.walk(origin, &mut snapshot);
                let revived = builder.extend_revived(&mut snapshot);
                let reachable_before = snapshot.len();
                snapshot.retain_reachable(origin);
                debug!(
                    revived,
                    pruned = reachable_before - snapshot.len(),
                    "reconciled crawl with origin"
                );
            }
            Some(origin) => {
                warn!(origin, "crawl origin was deleted; keeping last known structure");
            }
            None => builder.extend_all(&mut snapshot),
        }

        self.snapshot = snapshot;
        self.snapshot.content_hash() != before
    }

    /// Move to a new origin and rebuild from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOrigin`] if `origin` is not registered;
    /// the crawler is left unchanged in that case.
    pub fn reset(&mut self, store: &GraphStore, origin: Option<NodeId>) -> Result<(), GraphError> {
        *self = Self::with_traversal(store, origin, self.traversal)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
