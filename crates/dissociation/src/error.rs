//! Error type shared by every fallible kernel operation.

use thiserror::Error;

/// Result alias for kernel operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Which kernel routine rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Operation {
    /// Sub-collection collision search.
    Check,
    /// Signed-combination enumeration.
    Span,
    /// Pairwise sub-collection quotients.
    QuotientSet,
    /// Exhaustive search over fixed-size candidate subsets.
    CandidateSearch,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Check => "dissociation check",
            Self::Span => "span enumeration",
            Self::QuotientSet => "quotient-set enumeration",
            Self::CandidateSearch => "candidate subset search",
        })
    }
}

/// Kernel error.
///
/// Broken internal invariants (a witness that does not involve the element
/// being exchanged, a maximal subset that turns out extendable) are not
/// represented here: they indicate a defect, not bad input, and abort via
/// assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller's bound `d` on dissociated subsets of `S` is false.
    #[error("precondition violated: a dissociated subset of size {size} exceeds the bound {bound}")]
    PreconditionViolation {
        /// Bound supplied by the caller.
        bound: usize,
        /// Size of the dissociated subset that disproves it.
        size: usize,
    },

    /// An exponential routine was asked to process more than the configured limit.
    #[error("{operation} on {size} elements exceeds the configured limit of {limit}")]
    TooLarge {
        /// Routine that refused the input.
        operation: Operation,
        /// Size presented (elements, or candidate subsets for [`Operation::CandidateSearch`]).
        size: u64,
        /// Configured ceiling.
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_numbers() {
        let e = Error::PreconditionViolation { bound: 2, size: 3 };
        assert_eq!(
            e.to_string(),
            "precondition violated: a dissociated subset of size 3 exceeds the bound 2"
        );

        let e = Error::TooLarge {
            operation: Operation::Span,
            size: 40,
            limit: 16,
        };
        assert_eq!(
            e.to_string(),
            "span enumeration on 40 elements exceeds the configured limit of 16"
        );
    }
}
