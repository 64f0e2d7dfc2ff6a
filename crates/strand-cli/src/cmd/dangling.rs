//! `strand dangling`: edges pointing at unregistered ids.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_core::Edge;

use super::Session;
use crate::output::{pretty_section, render_mode};

/// Arguments for `strand dangling`.
#[derive(Args, Debug, Default)]
pub struct DanglingArgs {}

#[derive(Debug, Serialize)]
struct DanglingOutput {
    exists: bool,
    edges: Vec<Edge>,
}

/// Execute `strand dangling`.
///
/// Checks the whole store, not just the snapshot, since a link is dangling
/// with respect to the registry.
pub fn run_dangling(_args: &DanglingArgs, session: &Session) -> anyhow::Result<()> {
    let edges: Vec<Edge> = session.store.dangling_links().collect();
    let payload = DanglingOutput {
        exists: !edges.is_empty(),
        edges,
    };
    render_mode(
        session.output,
        &payload,
        |p, w| {
            for edge in &p.edges {
                writeln!(w, "{} {}", edge.from, edge.to)?;
            }
            Ok(())
        },
        |p, w| {
            if !p.exists {
                return writeln!(w, "No dangling links.");
            }
            pretty_section(w, &format!("Dangling links ({})", p.edges.len()))?;
            for edge in &p.edges {
                writeln!(w, "  - {} -> {} (unregistered)", edge.from, edge.to)?;
            }
            Ok(())
        },
    )
}
