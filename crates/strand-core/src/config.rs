//! Analysis configuration loaded from `strand.toml`.
//!
//! ```toml
//! [traversal]
//! mode = "iterative"   # or "recursive"
//!
//! [reduction]
//! order = "ascending"  # or "descending"
//! ```
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "strand.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub reduction: ReductionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalConfig {
    #[serde(default)]
    pub mode: Traversal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionConfig {
    #[serde(default)]
    pub order: ReductionOrder,
}

/// How snapshot construction walks the store.
///
/// Both modes produce identical snapshots. `Recursive` uses native call
/// recursion and can overflow the stack on deep graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    #[default]
    Iterative,
    Recursive,
}

/// Order in which a node's successors are tested during transitive
/// reduction. The result depends on this order when several alternate
/// paths exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionOrder {
    #[default]
    Ascending,
    Descending,
}

/// Load configuration from `path`, returning defaults if the file is missing.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
