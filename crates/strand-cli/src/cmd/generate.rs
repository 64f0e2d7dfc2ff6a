//! `strand generate`: emit a seeded random graph description.

use std::io::Write;

use clap::Args;

use strand_core::generate::random_store;

use crate::input::GraphInput;
use crate::output::{OutputMode, render_mode};

/// Arguments for `strand generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes (ids `0..nodes`).
    #[arg(long, default_value_t = 10)]
    nodes: u64,
    /// Probability of each ordered pair becoming an edge.
    #[arg(long, default_value_t = 0.2)]
    probability: f64,
    /// RNG seed; the same seed always yields the same graph.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Execute `strand generate`.
///
/// JSON output is a valid `--input` file.
pub fn run_generate(args: &GenerateArgs, output: OutputMode) -> anyhow::Result<()> {
    let store = random_store(args.nodes, args.probability, args.seed);
    let payload = GraphInput::from_store(&store);
    render_mode(output, &payload, render_edges, render_edges)
}

fn render_edges(payload: &GraphInput, w: &mut dyn Write) -> std::io::Result<()> {
    for (from, successors) in payload.nodes.iter().flatten() {
        for to in successors {
            writeln!(w, "{from} {to}")?;
        }
    }
    Ok(())
}
