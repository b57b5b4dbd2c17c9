//! Resource limits and the [`Kernel`] that carries them.
//!
//! Every routine in the crate is exponential in the size of its input. The
//! kernel refuses inputs above the configured ceilings with
//! [`Error::TooLarge`] before any enumeration starts.
//!
//! | Limit | Default | Guards |
//! |-------|---------|--------|
//! | `max_check_width` | 24 | `2^n` collision search |
//! | `max_span_width` | 16 | `3^n` signed enumeration |
//! | `max_candidates` | 2²⁰ | `C(n, k)` subset scans |
//!
//! Independently of configuration, masks are `u64`, so nothing wider than
//! [`MASK_WIDTH`] is ever enumerated. The candidate scan indexes all of `S`,
//! so the exhaustive precondition check refuses `|S| > MASK_WIDTH` for any
//! bound below `|S|`; [`PreconditionCheck::Trusted`] only ever enumerates
//! subsets of the growing basis and has no such ceiling.
//!
//! # Example
//!
//! ```
//! use dissociation::{Kernel, Limits, PreconditionCheck};
//!
//! let kernel = Kernel::new(Limits {
//!     max_span_width: 8,
//!     precondition: PreconditionCheck::Trusted,
//!     ..Limits::default()
//! });
//! assert_eq!(kernel.limits().max_check_width, 24);
//! ```

use crate::collection::MASK_WIDTH;
use crate::error::{Error, Operation, Result};

/// How [`Kernel::extract_basis`](crate::Kernel::extract_basis) treats the
/// caller's bound on dissociated subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PreconditionCheck {
    /// Scan every `(d+1)`-subset; any dissociated one is a violation.
    #[default]
    Exhaustive,
    /// Trust the bound. An oversized maximal subset is still rejected.
    Trusted,
}

/// Enumeration ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Limits {
    /// Widest set the collision search accepts.
    pub max_check_width: usize,
    /// Widest set the span enumerator accepts.
    pub max_span_width: usize,
    /// Most fixed-size candidate subsets a single scan may visit.
    pub max_candidates: u64,
    /// Bound verification mode for basis extraction.
    pub precondition: PreconditionCheck,
}

impl Limits {
    /// Default collision-search ceiling.
    pub const DEFAULT_CHECK_WIDTH: usize = 24;
    /// Default span ceiling.
    pub const DEFAULT_SPAN_WIDTH: usize = 16;
    /// Default candidate-scan ceiling.
    pub const DEFAULT_CANDIDATES: u64 = 1 << 20;

    /// Effective ceiling for `operation`, clamped to [`MASK_WIDTH`].
    pub fn width_for(&self, operation: Operation) -> usize {
        let configured = match operation {
            Operation::Check | Operation::CandidateSearch => self.max_check_width,
            Operation::Span => self.max_span_width,
            // Pairs of subsets: 4^n work, so half the check width.
            Operation::QuotientSet => self.max_check_width / 2,
        };
        configured.min(MASK_WIDTH)
    }

    /// Reject `len` elements if it exceeds the ceiling for `operation`.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] when `len` is above the ceiling.
    pub fn ensure_width(&self, operation: Operation, len: usize) -> Result<()> {
        let limit = self.width_for(operation);
        if len > limit {
            return Err(Error::TooLarge {
                operation,
                size: len as u64,
                limit: limit as u64,
            });
        }
        Ok(())
    }

    /// Reject a scan over `count` candidate subsets above `max_candidates`.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] when `count` is above the ceiling.
    pub fn ensure_candidates(&self, count: u64) -> Result<()> {
        if count > self.max_candidates {
            return Err(Error::TooLarge {
                operation: Operation::CandidateSearch,
                size: count,
                limit: self.max_candidates,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_check_width: Self::DEFAULT_CHECK_WIDTH,
            max_span_width: Self::DEFAULT_SPAN_WIDTH,
            max_candidates: Self::DEFAULT_CANDIDATES,
            precondition: PreconditionCheck::Exhaustive,
        }
    }
}

/// Entry point for every kernel operation under a fixed set of [`Limits`].
///
/// The methods are spread over the modules that implement them:
/// dissociation checks in [`checker`](crate::checker), span enumeration in
/// [`span`](crate::span), and basis extraction in [`extract`](crate::extract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kernel {
    limits: Limits,
}

impl Kernel {
    /// A kernel enforcing `limits`.
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Configured limits.
    #[inline]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }
}

/// `C(n, k)`, saturating at `u64::MAX`.
pub(crate) fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let l = Limits::default();
        assert_eq!(l.max_check_width, 24);
        assert_eq!(l.max_span_width, 16);
        assert_eq!(l.max_candidates, 1 << 20);
        assert_eq!(l.precondition, PreconditionCheck::Exhaustive);
    }

    #[test]
    fn widths_are_clamped_to_mask_width() {
        let l = Limits {
            max_check_width: 1000,
            ..Limits::default()
        };
        assert_eq!(l.width_for(Operation::Check), MASK_WIDTH);
        assert_eq!(l.width_for(Operation::QuotientSet), MASK_WIDTH);
    }

    #[test]
    fn ensure_width_rejects_above_limit() {
        let l = Limits::default();
        assert!(l.ensure_width(Operation::Span, 16).is_ok());
        assert_eq!(
            l.ensure_width(Operation::Span, 17),
            Err(Error::TooLarge {
                operation: Operation::Span,
                size: 17,
                limit: 16
            })
        );
        assert!(l.ensure_width(Operation::QuotientSet, 13).is_err());
    }

    #[test]
    fn ensure_candidates_rejects_above_limit() {
        let l = Limits {
            max_candidates: 10,
            ..Limits::default()
        };
        assert!(l.ensure_candidates(10).is_ok());
        assert!(l.ensure_candidates(11).is_err());
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(10, 10), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(63, 31), 916_312_070_471_295_267);
    }
}
