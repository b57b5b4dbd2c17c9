//! `dissoc`: dissociation and span computations on the command line.
//!
//! Parses a finite set of group elements and runs one kernel operation:
//! - `check`: dissociated, or a disjoint witness pair
//! - `span`: every `{-1, 0, +1}` combination
//! - `dimension`: size of the largest dissociated subset
//! - `extract`: a bounded basis with one certificate per element
//! - `verify`: the conformance checks, as a PASS/WARN/FAIL report
//!
//! **Usage:**
//! ```text
//! dissoc [--config <file>] [--group int|rat|xor] [--json] [-v] <command> <elements>...
//! ```
//!
//! `verify` exits non-zero if any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dissociation::PreconditionCheck;
use dissociation_clients::{run, Command, Config, GroupKind, Outcome, Overrides};
use tracing_subscriber::EnvFilter;

/// Dissociated sets and signed spans over finite commutative groups.
#[derive(Parser)]
#[command(
    name = "dissoc",
    version,
    about = "Check dissociation, enumerate spans, and extract bases"
)]
struct Args {
    /// TOML config file (default: ./dissoc.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Carrier the elements are parsed into.
    #[arg(long, value_enum, global = true)]
    group: Option<GroupKind>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Widest set the collision search accepts.
    #[arg(long, global = true)]
    max_check_width: Option<usize>,

    /// Widest set the span enumerator accepts.
    #[arg(long, global = true)]
    max_span_width: Option<usize>,

    /// Trust the extraction bound instead of verifying it exhaustively.
    #[arg(long, global = true)]
    trusted: bool,

    /// Debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide dissociation and print a witness pair if there is one.
    Check {
        /// Set elements.
        #[arg(allow_hyphen_values = true)]
        elements: Vec<String>,
    },
    /// Print the span.
    Span {
        /// Set elements.
        #[arg(allow_hyphen_values = true)]
        elements: Vec<String>,
    },
    /// Print the size of the largest dissociated subset.
    Dimension {
        /// Set elements.
        #[arg(allow_hyphen_values = true)]
        elements: Vec<String>,
    },
    /// Extract a basis whose span covers the set.
    Extract {
        /// Bound on the size of every dissociated subset.
        #[arg(long)]
        bound: usize,
        /// Set elements.
        #[arg(allow_hyphen_values = true)]
        elements: Vec<String>,
    },
    /// Run the conformance checks on the set.
    Verify {
        /// Claimed bound for extraction (default: the dissociation number).
        #[arg(long)]
        bound: Option<usize>,
        /// Set elements.
        #[arg(allow_hyphen_values = true)]
        elements: Vec<String>,
    },
}

impl Commands {
    fn split(self) -> (Command, Vec<String>) {
        match self {
            Self::Check { elements } => (Command::Check, elements),
            Self::Span { elements } => (Command::Span, elements),
            Self::Dimension { elements } => (Command::Dimension, elements),
            Self::Extract { bound, elements } => (Command::Extract { bound }, elements),
            Self::Verify { bound, elements } => (Command::Verify { bound }, elements),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config)?;
    config.apply(&Overrides {
        group: args.group,
        json: args.json,
        max_check_width: args.max_check_width,
        max_span_width: args.max_span_width,
        precondition: args.trusted.then_some(PreconditionCheck::Trusted),
    });
    tracing::debug!(?config, "configuration loaded");

    let (command, elements) = args.command.split();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run(&config, command, &elements, &mut out)?;
    out.flush()?;

    if let Outcome::Failed(failed) = outcome {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }
    Ok(())
}
