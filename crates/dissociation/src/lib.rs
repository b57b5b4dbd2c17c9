//! Dissociation - signed subset sums over finite commutative groups
//!
//! A finite set `S` inside a commutative group is **dissociated** when no
//! two distinct sub-collections of `S` have the same product. Its **span**
//! is every product `∏ a^{ε_a}` with `ε_a ∈ {-1, 0, +1}`. This crate decides
//! dissociation with a constructive witness, enumerates spans, and extracts
//! from a set with bounded dissociation a small subset whose span covers it.
//!
//! # Model
//!
//! ```text
//! S dissociated   ⇔  ∀ T ≠ U ⊆ S :  ∏T ≠ ∏U
//! Span(S)         =  { ∏ a^{ε_a} : ε ∈ {-1,0,+1}^S }
//!                 =  { ∏T · (∏U)⁻¹ : T, U ⊆ S }
//! ```
//!
//! # Operations
//!
//! | Operation | Result | Cost |
//! |-----------|--------|------|
//! | [`check`] | [`Dissociation`] with a disjoint [`Witness`] | `2^n` |
//! | [`span`] | [`Collection`] of every signed product | `3^n` |
//! | [`represent`] | [`SignedCombination`] reaching a target | `3^n` |
//! | [`quotient_in_span`] | coefficients of `∏T · (∏U)⁻¹` | linear |
//! | [`maximal_dissociated_subset`] | greedy maximal subset | `n · 2^n` |
//! | [`extract_basis`] | [`Basis`] with per-element certificates | `C(n, d+1) · 2^d` |
//!
//! Every operation is also available on a [`Kernel`], which carries the
//! [`Limits`] that refuse oversized inputs with [`Error::TooLarge`]. The free
//! functions use `Kernel::default()`.
//!
//! # Carriers
//!
//! Any type implementing [`group::CommutativeGroup`] can be used. The crate
//! ships the integers under addition, `ℤ/N`, nonzero rationals (ℚ*) under
//! multiplication, `(ℤ/2)^64` under XOR, and products of carriers.
//!
//! # Example: Witness
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{check, Collection};
//!
//! let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
//! let verdict = check(&s).unwrap();
//! let w = verdict.witness().unwrap();
//! assert_eq!(w.left().product(), w.right().product());
//! assert!(w.left().is_disjoint(w.right()));
//! ```
//!
//! # Example: Basis Extraction
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{extract_basis, span, Collection};
//!
//! let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
//! let basis = extract_basis(&s, 2).unwrap();
//! assert!(basis.len() <= 2);
//! assert!(s.is_subset(&span(basis.elements()).unwrap()));
//! ```

// Group carriers and the group trait
pub mod group;

// Finite sets and bitmask sub-collections
mod collection;

// Error types
mod error;

// Enumeration ceilings and the kernel handle
mod limits;

// Signed combinations and span enumeration
pub mod span;

// Dissociation checking with witnesses
pub mod checker;

// Maximal dissociated subsets and basis extraction
pub mod extract;

// Conformance validation
pub mod conformance;

pub use collection::{Collection, Combinations, MaskIter, SubsetMask, MASK_WIDTH};
pub use error::{Error, Operation, Result};
pub use limits::{Kernel, Limits, PreconditionCheck};

pub use span::{quotient_in_span, quotient_set, represent, span, Coefficient, SignedCombination};

pub use checker::{
    check, dissociation_witness, is_dissociated, reduce_to_disjoint, Dissociation, Side, Witness,
};

pub use extract::{dissociation_number, extract_basis, maximal_dissociated_subset, Basis};

pub use conformance::{validate, ConformanceReport, Severity, TestResult};
