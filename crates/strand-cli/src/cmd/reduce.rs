//! `strand reduce`: transitive reduction.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::{Reduction, reduce_with_order};
use strand_core::config::ReductionOrder;

use super::Session;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `strand reduce`.
#[derive(Args, Debug, Default)]
pub struct ReduceArgs {
    /// Successor test order; overrides `[reduction] order` from the config.
    #[arg(long, value_parser = parse_order)]
    order: Option<ReductionOrder>,
}

fn parse_order(raw: &str) -> Result<ReductionOrder, String> {
    match raw.to_ascii_lowercase().as_str() {
        "ascending" | "asc" => Ok(ReductionOrder::Ascending),
        "descending" | "desc" => Ok(ReductionOrder::Descending),
        other => Err(format!("unknown order '{other}' (expected ascending|descending)")),
    }
}

#[derive(Debug, Serialize)]
struct ReduceOutput {
    order: ReductionOrder,
    #[serde(flatten)]
    reduction: Reduction,
}

/// Execute `strand reduce`.
pub fn run_reduce(args: &ReduceArgs, session: &Session) -> anyhow::Result<()> {
    let order = args.order.unwrap_or(session.config.reduction.order);
    let payload = ReduceOutput {
        order,
        reduction: reduce_with_order(&session.snapshot(), order),
    };
    render_mode(session.output, &payload, render_reduce_text, render_reduce_pretty)
}

fn render_reduce_text(payload: &ReduceOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for edge in &payload.reduction.removed {
        writeln!(w, "{} {}", edge.from, edge.to)?;
    }
    Ok(())
}

fn render_reduce_pretty(payload: &ReduceOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Transitive reduction")?;
    pretty_kv(w, "order", format!("{:?}", payload.order).to_lowercase())?;
    pretty_kv(w, "removed", payload.reduction.len().to_string())?;
    pretty_kv(
        w,
        "remaining",
        payload.reduction.reduced.edge_count().to_string(),
    )?;
    for edge in &payload.reduction.removed {
        writeln!(w, "  - {} -> {}", edge.from, edge.to)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parses_short_and_long_forms() {
        assert_eq!(parse_order("DESC"), Ok(ReductionOrder::Descending));
        assert_eq!(parse_order("ascending"), Ok(ReductionOrder::Ascending));
        assert!(parse_order("random").is_err());
    }
}
