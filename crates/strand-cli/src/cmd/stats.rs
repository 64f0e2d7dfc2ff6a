//! `strand stats`: summary statistics for the snapshot.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use strand_analysis::GraphStats;

use super::Session;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `strand stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

#[derive(Debug, Serialize)]
struct StatsOutput {
    content_hash: String,
    #[serde(flatten)]
    stats: GraphStats,
}

/// Execute `strand stats`.
pub fn run_stats(_args: &StatsArgs, session: &Session) -> anyhow::Result<()> {
    let snapshot = session.snapshot();
    let payload = StatsOutput {
        content_hash: snapshot.content_hash(),
        stats: GraphStats::from_snapshot(&snapshot),
    };
    render_mode(session.output, &payload, render_stats_text, render_stats_pretty)
}

fn rows(payload: &StatsOutput) -> Vec<(&'static str, String)> {
    let s = &payload.stats;
    vec![
        ("nodes", s.node_count.to_string()),
        ("edges", s.edge_count.to_string()),
        ("dangling_links", s.dangling_link_count.to_string()),
        ("density", format!("{:.4}", s.density)),
        ("sccs", s.scc_count.to_string()),
        ("cyclic_sccs", s.cycle_count.to_string()),
        ("weak_components", s.weakly_connected_component_count.to_string()),
        ("isolated", s.isolated_node_count.to_string()),
        ("max_in_degree", s.max_in_degree.to_string()),
        ("max_out_degree", s.max_out_degree.to_string()),
        ("reduced_edges", s.reduced_edge_count.to_string()),
        ("is_dag", s.is_dag.to_string()),
        ("content_hash", payload.content_hash.clone()),
    ]
}

fn render_stats_text(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for (key, value) in rows(payload) {
        writeln!(w, "{key}\t{value}")?;
    }
    Ok(())
}

fn render_stats_pretty(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    for (key, value) in rows(payload) {
        pretty_kv(w, key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::Snapshot;

    #[test]
    fn text_lists_one_stat_per_line() {
        let snapshot = Snapshot::from_edges([(1, 2), (2, 1)]);
        let payload = StatsOutput {
            content_hash: snapshot.content_hash(),
            stats: GraphStats::from_snapshot(&snapshot),
        };
        let mut out = Vec::new();
        render_stats_text(&payload, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("nodes\t2\n"));
        assert!(rendered.contains("is_dag\tfalse\n"));
        assert!(rendered.contains("content_hash\tblake3:"));
    }
}
