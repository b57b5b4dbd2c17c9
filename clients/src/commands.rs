//! Command execution for `dissoc`, generic over the carrier.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use dissociation::conformance::{self, Severity};
use dissociation::group::{Additive, CommutativeGroup, Rational, Xor};
use dissociation::{Coefficient, Collection, Dissociation, Kernel, SignedCombination};
use serde::Serialize;

use crate::config::{Config, GroupKind};

/// One `dissoc` subcommand, with its non-element arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Decide dissociation; print a witness when there is one.
    Check,
    /// Enumerate the span.
    Span,
    /// Size of the largest dissociated subset.
    Dimension,
    /// Extract a basis under `bound`.
    Extract {
        /// Claimed bound on dissociated subsets.
        bound: usize,
    },
    /// Run the conformance checks.
    Verify {
        /// Claimed bound; the dissociation number when absent.
        bound: Option<usize>,
    },
}

/// Whether the command completed with every check passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing failed.
    Success,
    /// `verify` reported this many failures.
    Failed(usize),
}

/// Parse `elements` with the configured carrier and run `command`.
///
/// # Errors
///
/// Returns an error if an element does not parse, a kernel routine refuses
/// the input, or writing to `out` fails.
pub fn run(
    config: &Config,
    command: Command,
    elements: &[String],
    out: &mut impl Write,
) -> Result<Outcome> {
    let kernel = config.kernel();
    match config.group {
        GroupKind::Int => execute::<Additive<i64>>(&kernel, command, elements, config.json, out),
        GroupKind::Rat => execute::<Rational>(&kernel, command, elements, config.json, out),
        GroupKind::Xor => execute::<Xor>(&kernel, command, elements, config.json, out),
    }
}

fn parse<G>(elements: &[String]) -> Result<Collection<G>>
where
    G: CommutativeGroup + FromStr,
    G::Err: std::error::Error + Send + Sync + 'static,
{
    elements
        .iter()
        .map(|e| {
            e.parse::<G>()
                .with_context(|| format!("invalid element '{e}'"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Collection::from)
}

fn execute<G>(
    kernel: &Kernel,
    command: Command,
    elements: &[String],
    json: bool,
    out: &mut impl Write,
) -> Result<Outcome>
where
    G: CommutativeGroup + FromStr + Display + Serialize,
    G::Err: std::error::Error + Send + Sync + 'static,
{
    let s = parse::<G>(elements)?;
    tracing::debug!(?command, size = s.len(), "running command");

    match command {
        Command::Check => {
            let verdict = kernel.check(&s)?;
            if json {
                emit_json(out, &verdict)?;
            } else {
                match &verdict {
                    Dissociation::Dissociated => writeln!(out, "dissociated")?,
                    Dissociation::NotDissociated(w) => {
                        writeln!(out, "not dissociated")?;
                        writeln!(out, "  left:  {}", set(w.left()))?;
                        writeln!(out, "  right: {}", set(w.right()))?;
                        writeln!(out, "  value: {}", w.value())?;
                    }
                }
            }
        }
        Command::Span => {
            let sp = kernel.span(&s)?;
            if json {
                emit_json(out, &sp)?;
            } else {
                writeln!(out, "{} values", sp.len())?;
                writeln!(out, "{}", set(&sp))?;
            }
        }
        Command::Dimension => {
            let d = kernel.dissociation_number(&s)?;
            if json {
                emit_json(out, &serde_json::json!({ "dimension": d }))?;
            } else {
                writeln!(out, "{d}")?;
            }
        }
        Command::Extract { bound } => {
            let basis = kernel.extract_basis(&s, bound)?;
            if json {
                emit_json(out, &basis)?;
            } else {
                writeln!(out, "basis: {}", set(basis.elements()))?;
                for (a, certificate) in basis.certificates() {
                    writeln!(out, "  {a} = {}", combination(certificate))?;
                }
            }
        }
        Command::Verify { bound } => {
            let report = conformance::validate(kernel, &s, bound);
            if json {
                emit_json(out, &report)?;
            } else {
                print_report(out, &report)?;
            }
            let failed = report.failure_count();
            if failed > 0 {
                return Ok(Outcome::Failed(failed));
            }
        }
    }
    Ok(Outcome::Success)
}

fn emit_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn print_report(out: &mut impl Write, report: &conformance::ConformanceReport) -> Result<()> {
    writeln!(out, "Dissociation Conformance Report")?;
    writeln!(out, "===============================")?;
    writeln!(out)?;

    for result in &report.results {
        let status = match result.severity {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        };
        writeln!(out, "[{}] {}: {}", status, result.validator, result.message)?;
        for detail in &result.details {
            writeln!(out, "       {detail}")?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        report.count(Severity::Failure)
    )?;
    Ok(())
}

/// `{a, b, c}`
fn set<G: Display>(s: &Collection<G>) -> String {
    let items: Vec<String> = s.iter().map(ToString::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

/// `+a -b`, or `e` for the empty combination.
fn combination<G: CommutativeGroup + Display>(c: &SignedCombination<G>) -> String {
    let terms: Vec<String> = c
        .terms()
        .filter(|(_, coefficient)| *coefficient != Coefficient::Zero)
        .map(|(g, coefficient)| format!("{coefficient}·{g}"))
        .collect();
    if terms.is_empty() {
        "e".to_string()
    } else {
        terms.join(" ")
    }
}
