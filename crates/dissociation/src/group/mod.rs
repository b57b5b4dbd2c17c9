//! Commutative group abstraction and the concrete carriers shipped with the crate.
//!
//! Every algorithm in this crate is written once against [`CommutativeGroup`].
//! Additive and multiplicative notation are both just implementations of the
//! same three operations:
//!
//! | Carrier | Notation | combine | identity | inverse |
//! |---------|----------|---------|----------|---------|
//! | [`Additive<i64>`] | additive | wrapping `+` | `0` | wrapping `-x` |
//! | [`ZMod<N>`] | additive | `+ mod N` | `0` | `N - x` |
//! | [`Xor`] | additive over 𝔽₂ | `^` | `0` | `x` |
//! | [`Rational`] | multiplicative | `×` | `1` | `1/x` |
//! | `(A, B)` | componentwise | both | both | both |
//!
//! # Example
//!
//! ```
//! use dissociation::group::{Additive, CommutativeGroup, Rational};
//!
//! let a = Additive(5i64);
//! assert_eq!(a.combine(&a.inverse()), Additive::identity());
//!
//! let half = Rational::new(1, 2).unwrap();
//! assert_eq!(half.inverse(), Rational::from_integer(2).unwrap());
//! ```

use core::fmt::Debug;
use core::hash::Hash;

mod additive;
mod rational;
mod xor;

pub use additive::{Additive, ZMod};
pub use rational::{ParseRationalError, Rational};
pub use xor::Xor;

use crate::span::Coefficient;

/// A commutative group with decidable equality.
///
/// Implementations must satisfy the usual axioms (associativity,
/// commutativity, identity, inverses). Nothing in the crate checks them;
/// a carrier that violates them makes every result meaningless.
///
/// `Hash` is required so that sub-collection values can be indexed during
/// collision detection. No ordering is assumed.
pub trait CommutativeGroup: Clone + Eq + Hash + Debug {
    /// The neutral element.
    fn identity() -> Self;

    /// The group operation.
    fn combine(&self, other: &Self) -> Self;

    /// The inverse element.
    fn inverse(&self) -> Self;

    /// Returns true if this is the neutral element.
    #[inline]
    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// `self · other⁻¹`.
    #[inline]
    fn quotient(&self, other: &Self) -> Self {
        self.combine(&other.inverse())
    }

    /// Raise to a coefficient in `{-1, 0, +1}`.
    #[inline]
    fn scale(&self, coefficient: Coefficient) -> Self {
        match coefficient {
            Coefficient::Negative => self.inverse(),
            Coefficient::Zero => Self::identity(),
            Coefficient::Positive => self.clone(),
        }
    }
}

/// Combined value of a sequence of elements (the empty product is the identity).
pub fn product<'a, G, I>(elements: I) -> G
where
    G: CommutativeGroup + 'a,
    I: IntoIterator<Item = &'a G>,
{
    elements
        .into_iter()
        .fold(G::identity(), |acc, x| acc.combine(x))
}

impl<A: CommutativeGroup, B: CommutativeGroup> CommutativeGroup for (A, B) {
    #[inline]
    fn identity() -> Self {
        (A::identity(), B::identity())
    }

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        (self.0.combine(&other.0), self.1.combine(&other.1))
    }

    #[inline]
    fn inverse(&self) -> Self {
        (self.0.inverse(), self.1.inverse())
    }
}
