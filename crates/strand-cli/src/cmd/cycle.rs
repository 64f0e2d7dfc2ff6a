//! `strand cycle`: find one cycle, or confirm the graph is a DAG.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::{find_cycle, is_dag};
use strand_core::NodeId;

use super::Session;
use crate::output::{join_ids, render_mode};

/// Arguments for `strand cycle`.
#[derive(Args, Debug, Default)]
pub struct CycleArgs {
    /// Start the search only from these ids (repeatable).
    #[arg(long = "from", value_name = "ID")]
    from: Vec<NodeId>,
}

#[derive(Debug, Serialize)]
struct CycleOutput {
    is_dag: bool,
    cycle: Option<Vec<NodeId>>,
}

/// Execute `strand cycle`.
pub fn run_cycle(args: &CycleArgs, session: &Session) -> anyhow::Result<()> {
    let candidates = (!args.from.is_empty()).then_some(args.from.as_slice());
    let snapshot = session.snapshot();
    let cycle = find_cycle(&snapshot, candidates);
    let payload = CycleOutput {
        is_dag: match candidates {
            None => cycle.is_none(),
            Some(_) => is_dag(&snapshot),
        },
        cycle,
    };
    render_mode(
        session.output,
        &payload,
        |p, w| render_cycle(p, w, " "),
        |p, w| render_cycle(p, w, " -> "),
    )
}

fn render_cycle(payload: &CycleOutput, w: &mut dyn Write, sep: &str) -> std::io::Result<()> {
    match &payload.cycle {
        Some(cycle) => writeln!(w, "{}", join_ids(cycle, sep)),
        None => writeln!(w, "no cycle found"),
    }
}
