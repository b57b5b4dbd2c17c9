//! Conformance validation of the kernel on a concrete input.
//!
//! Runs the kernel's algebraic guarantees against one finite set and
//! aggregates the outcome into a [`ConformanceReport`]. Checks that would
//! exceed the configured [`Limits`](crate::Limits) are reported as warnings
//! (skipped), never as failures.
//!
//! # Checks
//!
//! | Validator | Property |
//! |-----------|----------|
//! | `span/contains-base` | `S ⊆ Span(S)` |
//! | `span/quotients` | `Span(S) = {∏t · (∏u)⁻¹}` |
//! | `span/non-closure` | `Span(S) ⊆ Span(Span(S))` |
//! | `dissociation/empty` | `∅` is dissociated |
//! | `dissociation/singletons` | `{a}` dissociated iff `a ≠ e` |
//! | `dissociation/witness` | witness is distinct, disjoint, equal-valued, inside `S` |
//! | `dissociation/monotone` | dissociated `S` stays dissociated minus any element |
//! | `dissociation/inversion` | `S` and `S⁻¹` agree |
//! | `extract/coverage` | basis is bounded, inside `S`, and covers `S` |
//!
//! # Example
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{conformance, Collection, Kernel};
//!
//! let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
//! let report = conformance::validate(&Kernel::default(), &s, Some(2));
//! assert!(report.all_passed());
//! ```

use crate::collection::Collection;
use crate::error::Error;
use crate::group::CommutativeGroup;
use crate::limits::Kernel;

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check was skipped or is otherwise non-blocking.
    Warning,
    /// The check failed.
    Failure,
}

/// A single conformance check result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestResult {
    /// Short identifier of the validator that produced this result.
    pub validator: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl TestResult {
    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Pass, Vec::new())
    }

    /// Creates a failure result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Failure, Vec::new())
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(validator, message, Severity::Failure, details)
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Warning, Vec::new())
    }

    fn new(
        validator: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Aggregated results from all validators.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConformanceReport {
    /// All individual results, in validator order.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Returns the count of results with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns true if no check failed.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Fold a kernel outcome into a result: limit errors become warnings.
fn record<T>(
    report: &mut ConformanceReport,
    validator: &str,
    outcome: crate::Result<T>,
    judge: impl FnOnce(T) -> TestResult,
) {
    let result = match outcome {
        Ok(value) => judge(value),
        Err(e @ Error::TooLarge { .. }) => TestResult::warn(validator, format!("skipped: {e}")),
        Err(e) => TestResult::fail(validator, e.to_string()),
    };
    report.push(result);
}

/// Run every check on `s`.
///
/// `bound` is the caller's claimed bound for basis extraction; when absent
/// the dissociation number of `s` is computed and used.
pub fn validate<G: CommutativeGroup>(
    kernel: &Kernel,
    s: &Collection<G>,
    bound: Option<usize>,
) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    record(&mut report, "span/contains-base", kernel.span(s), |sp| {
        let missing: Vec<String> = s
            .iter()
            .filter(|a| !sp.contains(a))
            .map(|a| format!("{a:?}"))
            .collect();
        if missing.is_empty() {
            TestResult::pass(
                "span/contains-base",
                format!("{} elements inside a span of {}", s.len(), sp.len()),
            )
        } else {
            TestResult::fail_with_details(
                "span/contains-base",
                "elements missing from their own span",
                missing,
            )
        }
    });

    let quotients = kernel
        .span(s)
        .and_then(|sp| Ok((sp, kernel.quotient_set(s)?)));
    record(&mut report, "span/quotients", quotients, |(sp, q)| {
        if sp == q {
            TestResult::pass("span/quotients", "span equals the sub-collection quotient set")
        } else {
            TestResult::fail(
                "span/quotients",
                format!("span has {} values, quotient set {}", sp.len(), q.len()),
            )
        }
    });

    let nested = kernel.span(s).and_then(|sp| Ok((kernel.span(&sp)?, sp)));
    record(&mut report, "span/non-closure", nested, |(outer, inner)| {
        if inner.is_subset(&outer) {
            TestResult::pass(
                "span/non-closure",
                format!(
                    "|Span(S)| = {}, |Span(Span(S))| = {}",
                    inner.len(),
                    outer.len()
                ),
            )
        } else {
            TestResult::fail(
                "span/non-closure",
                "Span(S) is not contained in Span(Span(S))",
            )
        }
    });

    let empty = kernel.is_dissociated(&Collection::<G>::new());
    record(&mut report, "dissociation/empty", empty, |ok| {
        if ok {
            TestResult::pass("dissociation/empty", "empty set is dissociated")
        } else {
            TestResult::fail("dissociation/empty", "empty set reported non-dissociated")
        }
    });

    let singletons = s.iter().try_fold(Vec::new(), |mut bad, a| {
        let ok = kernel.is_dissociated(&Collection::singleton(a.clone()))?;
        if ok == a.is_identity() {
            bad.push(format!("{a:?}"));
        }
        Ok(bad)
    });
    record(&mut report, "dissociation/singletons", singletons, |bad| {
        if bad.is_empty() {
            TestResult::pass(
                "dissociation/singletons",
                "{a} is dissociated exactly when a is not the identity",
            )
        } else {
            TestResult::fail_with_details(
                "dissociation/singletons",
                "singleton verdicts disagree with the identity test",
                bad,
            )
        }
    });

    let verdict = kernel.check(s);
    record(&mut report, "dissociation/witness", verdict.clone(), |d| {
        match d.witness() {
            None => TestResult::pass(
                "dissociation/witness",
                "set is dissociated; no witness required",
            ),
            Some(w) if w.verify(s) => TestResult::pass(
                "dissociation/witness",
                format!(
                    "sides of size {} and {} share the value {:?}",
                    w.left().len(),
                    w.right().len(),
                    w.value()
                ),
            ),
            Some(w) => TestResult::fail_with_details(
                "dissociation/witness",
                "witness does not refute dissociation",
                vec![
                    format!("left: {:?}", w.left()),
                    format!("right: {:?}", w.right()),
                ],
            ),
        }
    });

    let monotone = verdict.clone().and_then(|d| {
        let mut bad = Vec::new();
        if d.is_dissociated() {
            for a in s {
                if !kernel.is_dissociated(&s.erase(a))? {
                    bad.push(format!("removing {a:?}"));
                }
            }
        }
        Ok(bad)
    });
    record(&mut report, "dissociation/monotone", monotone, |bad| {
        if bad.is_empty() {
            TestResult::pass(
                "dissociation/monotone",
                "every one-smaller subset agrees with downward closure",
            )
        } else {
            TestResult::fail_with_details(
                "dissociation/monotone",
                "a subset of a dissociated set is not dissociated",
                bad,
            )
        }
    });

    let inversion =
        verdict.and_then(|d| Ok((d.is_dissociated(), kernel.is_dissociated(&s.inverted())?)));
    record(&mut report, "dissociation/inversion", inversion, |(plain, inv)| {
        if plain == inv {
            TestResult::pass("dissociation/inversion", "S and S⁻¹ agree")
        } else {
            TestResult::fail(
                "dissociation/inversion",
                format!("S dissociated: {plain}, S⁻¹ dissociated: {inv}"),
            )
        }
    });

    let extraction = bound
        .map_or_else(|| kernel.dissociation_number(s), Ok)
        .and_then(|d| Ok((d, kernel.extract_basis(s, d)?)));
    record(&mut report, "extract/coverage", extraction, |(d, basis)| {
        if basis.verify(s, d) {
            TestResult::pass(
                "extract/coverage",
                format!(
                    "{} of {} elements cover the set (bound {d})",
                    basis.len(),
                    s.len()
                ),
            )
        } else {
            TestResult::fail(
                "extract/coverage",
                "basis certificates do not re-derive the set",
            )
        }
    });

    tracing::debug!(
        target: "dissociation::conformance",
        passed = report.count(Severity::Pass),
        warnings = report.count(Severity::Warning),
        failed = report.failure_count(),
        "conformance run finished"
    );
    report
}
