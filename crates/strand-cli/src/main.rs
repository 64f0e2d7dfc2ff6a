#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use strand_core::NodeId;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cmd::{GlobalOptions, Session};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "strand: directed link-graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Graph description file (JSON). Reads stdin when omitted or `-`.
    #[arg(short, long, global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Config file (defaults to ./strand.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true)]
    json: bool,

    /// Snapshot only what is reachable from this id.
    #[arg(long, global = true, value_name = "ID")]
    origin: Option<NodeId>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }

    fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            input: self.input.clone(),
            config: self.config.clone(),
            origin: self.origin,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summary statistics",
        after_help = "EXAMPLES:\n    strand stats --input graph.json\n    strand stats --input graph.json --origin 3 --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Strongly connected components",
        after_help = "EXAMPLES:\n    strand sccs --input graph.json\n    strand sccs --input graph.json --nontrivial"
    )]
    Sccs(cmd::sccs::SccsArgs),

    #[command(
        about = "Find one cycle, or confirm the graph is acyclic",
        after_help = "EXAMPLES:\n    strand cycle --input graph.json\n    strand cycle --input graph.json --from 4 --from 7"
    )]
    Cycle(cmd::cycle::CycleArgs),

    #[command(
        about = "Shortest hop count between two ids",
        after_help = "EXAMPLES:\n    strand distance 1 5 --input graph.json"
    )]
    Distance(cmd::distance::DistanceArgs),

    #[command(
        about = "Remove edges implied by longer paths",
        after_help = "EXAMPLES:\n    strand reduce --input graph.json\n    strand reduce --input graph.json --order descending"
    )]
    Reduce(cmd::reduce::ReduceArgs),

    #[command(
        about = "Collapse each SCC to its smallest id",
        after_help = "EXAMPLES:\n    strand contract --input graph.json --json"
    )]
    Contract(cmd::contract::ContractArgs),

    #[command(
        about = "Ids reachable from one id",
        after_help = "EXAMPLES:\n    strand descendants 3 --input graph.json"
    )]
    Descendants(cmd::descendants::DescendantsArgs),

    #[command(
        about = "Edges pointing at unregistered ids",
        after_help = "EXAMPLES:\n    strand dangling --input graph.json"
    )]
    Dangling(cmd::dangling::DanglingArgs),

    #[command(
        about = "Emit a seeded random graph description",
        after_help = "EXAMPLES:\n    strand generate --nodes 100 --probability 0.05 --seed 7 --json > graph.json"
    )]
    Generate(cmd::generate::GenerateArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("STRAND_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "strand=debug,info"
        } else {
            "strand=info,warn"
        })
    });

    let format = env::var("STRAND_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    debug!(?output, "resolved output mode");

    if let Commands::Generate(ref args) = cli.command {
        return cmd::generate::run_generate(args, output);
    }

    let session = Session::open(&cli.global_options(), output)?;
    match cli.command {
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &session),
        Commands::Sccs(ref args) => cmd::sccs::run_sccs(args, &session),
        Commands::Cycle(ref args) => cmd::cycle::run_cycle(args, &session),
        Commands::Distance(ref args) => cmd::distance::run_distance(args, &session),
        Commands::Reduce(ref args) => cmd::reduce::run_reduce(args, &session),
        Commands::Contract(ref args) => cmd::contract::run_contract(args, &session),
        Commands::Descendants(ref args) => cmd::descendants::run_descendants(args, &session),
        Commands::Dangling(ref args) => cmd::dangling::run_dangling(args, &session),
        Commands::Generate(ref args) => cmd::generate::run_generate(args, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["strand", "stats", "--json", "--origin", "4", "-i", "g.json"]);
        assert!(cli.json);
        assert_eq!(cli.origin, Some(4));
        assert_eq!(cli.input, Some(PathBuf::from("g.json")));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["strand", "--format", "text", "sccs"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn distance_takes_two_ids() {
        let cli = Cli::parse_from(["strand", "distance", "1", "5"]);
        assert!(matches!(cli.command, Commands::Distance(_)));
        assert!(Cli::try_parse_from(["strand", "distance", "1"]).is_err());
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::parse_from(["strand", "generate", "--nodes", "5", "--seed", "9"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn non_numeric_origin_is_rejected() {
        assert!(Cli::try_parse_from(["strand", "--origin", "abc", "stats"]).is_err());
    }
}
