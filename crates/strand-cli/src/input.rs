//! Graph description files.
//!
//! ```json
//! {
//!   "nodes": { "1": [2, 3], "4": [] },
//!   "edges": [[2, 3]],
//!   "walks": [[3, 4, 1]]
//! }
//! ```
//!
//! All three sections are optional and are merged in that order. Ids that
//! only appear as edge or walk targets are registered with no successors;
//! targets listed only under `nodes` values stay unregistered, so a file can
//! describe dangling links on purpose.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use strand_core::{GraphStore, NodeId};

/// Parsed graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<BTreeMap<NodeId, Vec<NodeId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<(NodeId, NodeId)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walks: Option<Vec<Vec<NodeId>>>,
}

impl GraphInput {
    /// Describe every node of `store` under `nodes`.
    pub fn from_store(store: &GraphStore) -> Self {
        let nodes = store
            .ids()
            .map(|id| {
                let successors = store
                    .get_node(id)
                    .map(|succ| succ.iter().copied().collect())
                    .unwrap_or_default();
                (id, successors)
            })
            .collect();
        Self {
            nodes: Some(nodes),
            ..Self::default()
        }
    }

    /// Build the live store.
    pub fn into_store(self) -> GraphStore {
        let mut store = GraphStore::new();
        for (id, successors) in self.nodes.unwrap_or_default() {
            store.add_node(id, successors);
        }

        let bulk_edges = GraphStore::from_edges(self.edges.unwrap_or_default());
        let bulk_walks = GraphStore::from_walks(self.walks.unwrap_or_default());
        for bulk in [bulk_edges, bulk_walks] {
            for id in bulk.ids() {
                let successors = bulk.get_node(id).into_iter().flatten().copied();
                if store.contains(id) {
                    store.add_edges(id, successors);
                } else {
                    store.add_node(id, successors);
                }
            }
        }
        store
    }
}

/// Read a description from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_input(path: Option<&Path>) -> Result<GraphInput> {
    let (source, raw) = match path {
        Some(p) if p != Path::new("-") => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read {}", p.display()))?;
            (p.display().to_string(), raw)
        }
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read graph from stdin")?;
            ("<stdin>".to_string(), raw)
        }
    };

    let input: GraphInput =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {source}"))?;
    debug!(source, "loaded graph description");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sections_merge() {
        let input: GraphInput = serde_json::from_str(
            r#"{"nodes": {"1": [2, 9]}, "edges": [[2, 3]], "walks": [[3, 1], [7]]}"#,
        )
        .expect("parse");
        let store = input.into_store();
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![1, 2, 3, 7]);
        assert_eq!(store.edge_count(), 4);
        let dangling: Vec<_> = store.dangling_links().map(|e| (e.from, e.to)).collect();
        assert_eq!(dangling, vec![(1, 9)], "nodes values are not auto-registered");
    }

    #[test]
    fn empty_object_is_empty_store() {
        let input: GraphInput = serde_json::from_str("{}").expect("parse");
        assert!(input.into_store().is_empty());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(serde_json::from_str::<GraphInput>(r#"{"vertices": {}}"#).is_err());
    }

    #[test]
    fn store_round_trips_through_description() {
        let store = GraphStore::from_walks([vec![1, 2, 3, 1], vec![4]]);
        let back = GraphInput::from_store(&store).into_store();
        assert_eq!(back, store);
    }

    #[test]
    fn load_input_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write");
        let err = load_input(Some(file.path())).expect_err("should fail");
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
