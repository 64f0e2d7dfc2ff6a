//! `strand contract`: collapse each SCC to its smallest id.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::{contract, decompose};
use strand_core::Snapshot;

use super::Session;
use crate::output::{join_ids, pretty_section, render_mode};

/// Arguments for `strand contract`.
#[derive(Args, Debug, Default)]
pub struct ContractArgs {}

#[derive(Debug, Serialize)]
struct ContractOutput {
    components: usize,
    dag: Snapshot,
}

/// Execute `strand contract`.
pub fn run_contract(_args: &ContractArgs, session: &Session) -> anyhow::Result<()> {
    let snapshot = session.snapshot();
    let partition = decompose(&snapshot);
    let payload = ContractOutput {
        components: partition.len(),
        dag: contract(&snapshot, &partition),
    };
    render_mode(
        session.output,
        &payload,
        |p, w| render_adjacency(&p.dag, w),
        |p, w| {
            pretty_section(w, &format!("Contracted DAG ({} nodes)", p.components))?;
            render_adjacency(&p.dag, w)
        },
    )
}

fn render_adjacency(dag: &Snapshot, w: &mut dyn Write) -> std::io::Result<()> {
    for (id, successors) in dag.iter() {
        writeln!(w, "{id}: {}", join_ids(successors, " "))?;
    }
    Ok(())
}
