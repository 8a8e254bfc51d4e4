//! Triage CLI — pages build diagnostics under count and token budgets.
//!
//! Provides `triage page`, which reads a JSON-lines diagnostics snapshot,
//! applies the request's filter and budgets, and prints one page as JSON or
//! human-readable text together with the cursor for the next page.

#![warn(missing_docs)]

mod page;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Triage — budgeted, paginated build diagnostics.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about = "Budgeted build diagnostics pager")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) log output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `triage.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of diagnostics.
    Page(PageArgs),
}

/// Arguments for the `triage page` subcommand.
#[derive(Parser, Debug)]
pub struct PageArgs {
    /// JSON-lines file with one diagnostic per line.
    #[arg(short, long)]
    pub input: String,

    /// JSON file holding the current build progress.
    #[arg(long)]
    pub progress: Option<String>,

    /// Maximum number of diagnostics on the page.
    #[arg(long)]
    pub max_diagnostics: Option<u64>,

    /// Maximum summed token cost of the page.
    #[arg(long)]
    pub token_limit: Option<u64>,

    /// Severity filter: `all`, `error`, or `warning`.
    #[arg(long)]
    pub severity: Option<String>,

    /// Glob matched against each diagnostic's file path.
    #[arg(long)]
    pub file_pattern: Option<String>,

    /// Cursor returned by the previous page.
    #[arg(long)]
    pub cursor: Option<String>,

    /// Abandon the call after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Output format for the page.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,
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

/// Page output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let color = use_color(cli.color, std::io::stdout().is_terminal());

    let global = GlobalArgs {
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Page(ref args) => page::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Initializes `env_logger`; `RUST_LOG` overrides the flag-derived level.
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Resolves `--color` against whether stdout is a terminal.
fn use_color(choice: ColorChoice, stdout_is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Auto => stdout_is_terminal,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}
