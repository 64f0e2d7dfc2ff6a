//! `strand distance`: shortest hop count between two ids.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::distance;
use strand_core::NodeId;

use super::Session;
use crate::output::render_mode;

/// Arguments for `strand distance`.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Start id.
    from: NodeId,
    /// End id.
    to: NodeId,
}

#[derive(Debug, Serialize)]
struct DistanceOutput {
    from: NodeId,
    to: NodeId,
    distance: Option<usize>,
}

/// Execute `strand distance`.
pub fn run_distance(args: &DistanceArgs, session: &Session) -> anyhow::Result<()> {
    let payload = DistanceOutput {
        from: args.from,
        to: args.to,
        distance: distance(&session.snapshot(), args.from, args.to),
    };
    render_mode(
        session.output,
        &payload,
        |p, w| match p.distance {
            Some(d) => writeln!(w, "{d}"),
            None => writeln!(w, "unreachable"),
        },
        |p, w| match p.distance {
            Some(d) => writeln!(w, "{} -> {}: {d} hop(s)", p.from, p.to),
            None => writeln!(w, "{} -> {}: unreachable", p.from, p.to),
        },
    )
}
