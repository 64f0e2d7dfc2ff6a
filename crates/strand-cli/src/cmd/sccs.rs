//! `strand sccs`: strongly connected components.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::{Component, decompose};

use super::Session;
use crate::output::{join_ids, pretty_section, render_mode};

/// Arguments for `strand sccs`.
#[derive(Args, Debug, Default)]
pub struct SccsArgs {
    /// Only list components with more than one member.
    #[arg(long)]
    nontrivial: bool,
}

#[derive(Debug, Serialize)]
struct SccsOutput {
    count: usize,
    strongly_connected: bool,
    components: Vec<Component>,
}

/// Execute `strand sccs`.
pub fn run_sccs(args: &SccsArgs, session: &Session) -> anyhow::Result<()> {
    let partition = decompose(&session.snapshot());
    let payload = SccsOutput {
        count: partition.len(),
        strongly_connected: partition.is_strongly_connected(),
        components: partition
            .components()
            .iter()
            .filter(|c| !args.nontrivial || c.is_nontrivial())
            .cloned()
            .collect(),
    };
    render_mode(session.output, &payload, render_sccs_text, render_sccs_pretty)
}

fn render_sccs_text(payload: &SccsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for component in &payload.components {
        writeln!(w, "{}", join_ids(component.members(), " "))?;
    }
    Ok(())
}

fn render_sccs_pretty(payload: &SccsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Strongly connected components ({})", payload.count),
    )?;
    for (idx, component) in payload.components.iter().enumerate() {
        writeln!(
            w,
            "{:>4}. [{}] {}",
            idx + 1,
            component.representative(),
            join_ids(component.members(), ", ")
        )?;
    }
    if payload.strongly_connected {
        writeln!(w, "\nThe graph is strongly connected.")?;
    }
    Ok(())
}
