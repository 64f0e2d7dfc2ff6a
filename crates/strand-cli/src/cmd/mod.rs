//! Command handlers.
//!
//! Every analysis command loads the input graph into a [`Session`], takes
//! one snapshot (from `--origin`, or of the whole store) and renders one
//! result.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use strand_core::config::{AnalysisConfig, DEFAULT_CONFIG_FILE, load_config};
use strand_core::{GraphStore, NodeId, Snapshot, SubgraphBuilder};

use crate::input::load_input;
use crate::output::{CliError, OutputMode, render_error};

pub mod contract;
pub mod cycle;
pub mod dangling;
pub mod descendants;
pub mod distance;
pub mod generate;
pub mod reduce;
pub mod sccs;
pub mod stats;

/// Global options shared by every analysis command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub origin: Option<NodeId>,
}

/// A loaded store plus the configuration to analyze it with.
pub struct Session {
    pub store: GraphStore,
    pub config: AnalysisConfig,
    pub output: OutputMode,
}

impl Session {
    /// Load config and input, then validate `--origin` against the store.
    ///
    /// An unregistered origin is rendered as a structured error and
    /// returned as `Err`.
    pub fn open(options: &GlobalOptions, output: OutputMode) -> Result<Self> {
        let config_path = options
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let config = load_config(&config_path)?;
        let mut store = load_input(options.input.as_deref())?.into_store();

        if let Some(origin) = options.origin {
            if let Err(err) = store.set_origin(origin) {
                render_error(output, &CliError::from(&err))?;
                return Err(err.into());
            }
        }

        info!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            origin = ?store.origin(),
            "loaded graph"
        );
        Ok(Self {
            store,
            config,
            output,
        })
    }

    /// Snapshot from the validated origin, or of the whole store.
    pub fn snapshot(&self) -> Snapshot {
        SubgraphBuilder::new(&self.store)
            .with_traversal(self.config.traversal.mode)
            .build(self.store.origin())
    }
}
