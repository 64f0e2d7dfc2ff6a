//! `strand descendants`: everything reachable from one id.

use std::collections::BTreeSet;

use clap::Args;
use serde::Serialize;

use strand_analysis::descendants;
use strand_core::NodeId;

use super::Session;
use crate::output::{join_ids, render_mode};

/// Arguments for `strand descendants`.
#[derive(Args, Debug)]
pub struct DescendantsArgs {
    /// Id to start from.
    id: NodeId,
}

#[derive(Debug, Serialize)]
struct DescendantsOutput {
    id: NodeId,
    descendants: BTreeSet<NodeId>,
}

/// Execute `strand descendants`.
pub fn run_descendants(args: &DescendantsArgs, session: &Session) -> anyhow::Result<()> {
    let payload = DescendantsOutput {
        id: args.id,
        descendants: descendants(&session.snapshot(), args.id),
    };
    render_mode(
        session.output,
        &payload,
        |p, w| writeln!(w, "{}", join_ids(&p.descendants, " ")),
        |p, w| {
            writeln!(
                w,
                "{} reaches {} id(s): {}",
                p.id,
                p.descendants.len(),
                join_ids(&p.descendants, ", ")
            )
        },
    )
}
