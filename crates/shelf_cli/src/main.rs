//! Shelf CLI: analysis and row legalization of Bookshelf placements.
//!
//! Every subcommand ingests the design in `--design DIR` (default: the
//! current directory), optionally builds a random trial ledger with
//! `--trial`, and prints its result as text or JSON.

#![warn(missing_docs)]

mod edit;
mod legality;
mod legalize;
mod node;
mod pipeline;
mod rank;
mod summary;
mod wirelength;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Shelf: inspect and legalize Bookshelf placements.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about = "Bookshelf placement analysis")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also print notes and per-step detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `shelf.toml` to use instead of the one in the design directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print counts of nodes, nets, rows and placed entries.
    Summary(DesignArgs),
    /// Print total wirelength, or the HPWL of one net.
    Wirelength(WirelengthArgs),
    /// Print the coordinates of one node.
    Node(NodeArgs),
    /// List nodes by area, largest first.
    Sizes(RankArgs),
    /// List nets by HPWL, longest first.
    Nets(RankArgs),
    /// Print the longest and shortest nets.
    Extremes(DesignArgs),
    /// Count overlaps, misaligned and out-of-bounds nodes.
    Legality(LegalityArgs),
    /// Pack nodes into rows and report the nodes that did not fit.
    Legalize(LegalizeArgs),
    /// Move one node and report the wirelength change.
    Edit(EditArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Directory holding the Bookshelf files.
    #[arg(short, long, default_value = ".")]
    pub design: PathBuf,

    /// Output format for results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Operate on a freshly randomized trial ledger instead of the primary one.
    #[arg(long)]
    pub trial: bool,

    /// Seed for `--trial` (overrides `[trial] seed`).
    #[arg(long, requires = "trial")]
    pub seed: Option<u64>,
}

/// Arguments for `shelf wirelength`.
#[derive(Args, Debug)]
pub struct WirelengthArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Synthetic net id (`n0`, `n1`, ...). Omit for the total.
    #[arg(long)]
    pub net: Option<String>,
}

/// Arguments for `shelf node`.
#[derive(Args, Debug)]
pub struct NodeArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Node id.
    pub id: String,
}

/// Arguments for `shelf sizes` and `shelf nets`.
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Number of rows printed in text mode (default: `[report] top_nets`).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `shelf legality`.
#[derive(Args, Debug)]
pub struct LegalityArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// List every violating node and pair, not just the counts.
    #[arg(long)]
    pub details: bool,
}

/// Arguments for `shelf legalize`.
#[derive(Args, Debug)]
pub struct LegalizeArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Packing heuristic (default: `[legalize] strategy`).
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyChoice>,

    /// Write the legalized placement as a `.pl` file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `shelf edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Node id.
    pub id: String,

    /// New x origin.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// New y origin.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Write the edited ledger as a `.pl` file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Row legalization heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Node order, leftmost free site of the first row that fits.
    FirstFitLeftPack,
    /// Descending original x, rightmost free site of the first row that fits.
    RightToLeftPack,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress status output.
    pub quiet: bool,
    /// Whether to print notes and extra detail.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => stderr_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Summary(ref args) => summary::run(args, &global),
        Command::Wirelength(ref args) => wirelength::run(args, &global),
        Command::Node(ref args) => node::run(args, &global),
        Command::Sizes(ref args) => rank::run_sizes(args, &global),
        Command::Nets(ref args) => rank::run_nets(args, &global),
        Command::Extremes(ref args) => rank::run_extremes(args, &global),
        Command::Legality(ref args) => legality::run(args, &global),
        Command::Legalize(ref args) => legalize::run(args, &global),
        Command::Edit(ref args) => edit::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_summary_defaults() {
        let cli = Cli::parse_from(["shelf", "summary"]);
        match cli.command {
            Command::Summary(ref args) => {
                assert_eq!(args.design, PathBuf::from("."));
                assert_eq!(args.format, ReportFormat::Text);
                assert!(!args.trial);
                assert!(args.seed.is_none());
            }
            _ => panic!("expected Summary command"),
        }
    }

    #[test]
    fn parse_wirelength_with_net() {
        let cli = Cli::parse_from([
            "shelf",
            "wirelength",
            "--design",
            "bench/adaptec1",
            "--net",
            "n42",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Wirelength(ref args) => {
                assert_eq!(args.net.as_deref(), Some("n42"));
                assert_eq!(args.design.design, PathBuf::from("bench/adaptec1"));
                assert_eq!(args.design.format, ReportFormat::Json);
            }
            _ => panic!("expected Wirelength command"),
        }
    }

    #[test]
    fn parse_trial_with_seed() {
        let cli = Cli::parse_from(["shelf", "legality", "--trial", "--seed", "7", "--details"]);
        match cli.command {
            Command::Legality(ref args) => {
                assert!(args.design.trial);
                assert_eq!(args.design.seed, Some(7));
                assert!(args.details);
            }
            _ => panic!("expected Legality command"),
        }
    }

    #[test]
    fn seed_requires_trial() {
        assert!(Cli::try_parse_from(["shelf", "summary", "--seed", "7"]).is_err());
    }

    #[test]
    fn parse_legalize_strategy() {
        let cli = Cli::parse_from([
            "shelf",
            "legalize",
            "--strategy",
            "right-to-left-pack",
            "-o",
            "out.pl",
        ]);
        match cli.command {
            Command::Legalize(ref args) => {
                assert_eq!(args.strategy, Some(StrategyChoice::RightToLeftPack));
                assert_eq!(args.output, Some(PathBuf::from("out.pl")));
            }
            _ => panic!("expected Legalize command"),
        }
    }

    #[test]
    fn parse_edit_negative_coordinates() {
        let cli = Cli::parse_from(["shelf", "edit", "o12", "-3.5", "10"]);
        match cli.command {
            Command::Edit(ref args) => {
                assert_eq!(args.id, "o12");
                assert_eq!(args.x, -3.5);
                assert_eq!(args.y, 10.0);
                assert!(args.output.is_none());
            }
            _ => panic!("expected Edit command"),
        }
    }

    #[test]
    fn parse_rank_limit() {
        let cli = Cli::parse_from(["shelf", "nets", "-n", "3"]);
        match cli.command {
            Command::Nets(ref args) => assert_eq!(args.limit, Some(3)),
            _ => panic!("expected Nets command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["shelf", "--quiet", "--color", "never", "sizes"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["shelf", "extremes", "--config", "/tmp/shelf.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/shelf.toml"));
    }

    #[test]
    fn node_requires_id() {
        assert!(Cli::try_parse_from(["shelf", "node"]).is_err());
    }
}
