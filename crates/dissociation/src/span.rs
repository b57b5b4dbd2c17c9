//! Signed combinations and the span operator.
//!
//! `Span(S)` is the set of values `∏ a^{c(a)}` over all coefficient
//! assignments `c : S → {-1, 0, +1}`. Equivalently it is the set of quotients
//! `∏t · (∏u)⁻¹` over pairs of sub-collections `t, u ⊆ S`:
//!
//! ```text
//! c(a) = +1  ⇔  a ∈ t \ u
//! c(a) = -1  ⇔  a ∈ u \ t
//! c(a) =  0  ⇔  a ∈ t ∩ u  or  a ∉ t ∪ u
//! ```
//!
//! [`quotient_in_span`] is that translation made explicit. Basis extraction
//! relies on it instead of ever materialising a span.
//!
//! Unlike a linear span, this operator is not idempotent: `Span(Span(S))`
//! contains `Span(S)` but is in general strictly larger, because `±1`
//! coefficients do not compose into `±1` coefficients.
//!
//! # Example
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{span, Collection};
//!
//! let s: Collection<_> = [1i64, 2].into_iter().map(Additive).collect();
//! let values = span(&s).unwrap();
//! // {-3, -2, -1, 0, 1, 2, 3}
//! assert_eq!(values.len(), 7);
//! assert!(values.contains(&Additive(3)));
//! ```

use std::collections::HashSet;

use crate::collection::{Collection, SubsetMask};
use crate::error::{Operation, Result};
use crate::group::CommutativeGroup;
use crate::limits::Kernel;

/// A scalar in `{-1, 0, +1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "i8", try_from = "i8"))]
pub enum Coefficient {
    /// `-1`: contributes the inverse.
    Negative,
    /// `0`: contributes nothing.
    Zero,
    /// `+1`: contributes the element itself.
    Positive,
}

impl Coefficient {
    /// All three coefficients.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Zero, Self::Positive];

    /// Integer value.
    #[inline]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }

    /// The opposite coefficient.
    #[inline]
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}

impl From<Coefficient> for i8 {
    fn from(c: Coefficient) -> Self {
        c.as_i8()
    }
}

impl TryFrom<i8> for Coefficient {
    type Error = String;

    fn try_from(v: i8) -> core::result::Result<Self, Self::Error> {
        match v {
            -1 => Ok(Self::Negative),
            0 => Ok(Self::Zero),
            1 => Ok(Self::Positive),
            other => Err(format!("coefficient {other} is outside {{-1, 0, 1}}")),
        }
    }
}

impl core::fmt::Display for Coefficient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:+}", self.as_i8())
    }
}

/// A coefficient assignment over a base collection.
///
/// Each base element appears once with its coefficient. The assignment is
/// total on its base: elements with coefficient zero are kept, so
/// [`base`](Self::base) recovers the collection the assignment ranges over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedCombination<G> {
    terms: Vec<(G, Coefficient)>,
}

impl<G: CommutativeGroup> SignedCombination<G> {
    /// Assignment from explicit terms; later duplicates of an element are dropped.
    pub fn new(terms: impl IntoIterator<Item = (G, Coefficient)>) -> Self {
        let mut out: Vec<(G, Coefficient)> = Vec::new();
        for (g, c) in terms {
            if !out.iter().any(|(h, _)| *h == g) {
                out.push((g, c));
            }
        }
        Self { terms: out }
    }

    /// All-zero assignment over `base`.
    pub fn zero(base: &Collection<G>) -> Self {
        Self {
            terms: base.iter().map(|g| (g.clone(), Coefficient::Zero)).collect(),
        }
    }

    /// `+1` on `element`, zero on the rest of `base`.
    ///
    /// This is the certificate behind `S ⊆ Span(S)`.
    pub fn unit(base: &Collection<G>, element: &G) -> Self {
        let mut c = Self::zero(base);
        c.set(element.clone(), Coefficient::Positive);
        c
    }

    /// Assignment on `base` encoded as positive and negative masks.
    pub fn from_masks(base: &Collection<G>, positive: SubsetMask, negative: SubsetMask) -> Self {
        debug_assert!(positive.is_disjoint(negative));
        Self {
            terms: base
                .iter()
                .enumerate()
                .map(|(i, g)| {
                    let c = if positive.contains(i) {
                        Coefficient::Positive
                    } else if negative.contains(i) {
                        Coefficient::Negative
                    } else {
                        Coefficient::Zero
                    };
                    (g.clone(), c)
                })
                .collect(),
        }
    }

    fn set(&mut self, element: G, coefficient: Coefficient) {
        match self.terms.iter_mut().find(|(g, _)| *g == element) {
            Some(term) => term.1 = coefficient,
            None => self.terms.push((element, coefficient)),
        }
    }

    /// `∏ a^{c(a)}`.
    pub fn evaluate(&self) -> G {
        self.terms
            .iter()
            .fold(G::identity(), |acc, (g, c)| acc.combine(&g.scale(*c)))
    }

    /// Coefficient of `element`; zero if it is not in the base.
    pub fn coefficient(&self, element: &G) -> Coefficient {
        self.terms
            .iter()
            .find(|(g, _)| g == element)
            .map_or(Coefficient::Zero, |(_, c)| *c)
    }

    /// Every element the assignment ranges over.
    pub fn base(&self) -> Collection<G> {
        self.terms.iter().map(|(g, _)| g.clone()).collect()
    }

    /// Elements with a nonzero coefficient.
    pub fn support(&self) -> Collection<G> {
        self.terms
            .iter()
            .filter(|(_, c)| *c != Coefficient::Zero)
            .map(|(g, _)| g.clone())
            .collect()
    }

    /// Iterate over `(element, coefficient)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (&G, Coefficient)> + '_ {
        self.terms.iter().map(|(g, c)| (g, *c))
    }

    /// The same assignment extended by zeros to cover `base`.
    ///
    /// Terms outside `base` are kept, so the value never changes.
    #[must_use]
    pub fn extend_to(&self, base: &Collection<G>) -> Self {
        let mut out = self.clone();
        for g in base {
            if !out.terms.iter().any(|(h, _)| h == g) {
                out.terms.push((g.clone(), Coefficient::Zero));
            }
        }
        out
    }

    /// The assignment with every coefficient negated; evaluates to the inverse.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(g, c)| (g.clone(), c.negate()))
                .collect(),
        }
    }
}

/// The closure fact: `∏t · (∏u)⁻¹ ∈ Span(t ∪ u)`, with its assignment.
///
/// `t` and `u` may overlap; shared elements get coefficient zero because
/// they cancel. No enumeration happens, so this is linear in `|t| + |u|`.
///
/// # Example
///
/// ```
/// use dissociation::group::{CommutativeGroup, Rational};
/// use dissociation::{quotient_in_span, Collection};
///
/// let q = |n| Rational::from_integer(n).unwrap();
/// let t: Collection<_> = [q(2), q(3)].into_iter().collect();
/// let u: Collection<_> = [q(3), q(5)].into_iter().collect();
/// let c = quotient_in_span(&t, &u);
/// assert_eq!(c.evaluate(), t.product().quotient(&u.product()));
/// assert_eq!(c.evaluate(), Rational::new(2, 5).unwrap());
/// ```
pub fn quotient_in_span<G: CommutativeGroup>(
    t: &Collection<G>,
    u: &Collection<G>,
) -> SignedCombination<G> {
    SignedCombination::new(t.union(u).into_iter().map(|g| {
        let c = match (t.contains(&g), u.contains(&g)) {
            (true, false) => Coefficient::Positive,
            (false, true) => Coefficient::Negative,
            _ => Coefficient::Zero,
        };
        (g, c)
    }))
}

/// One reachable value with a representative assignment.
struct Reached<G> {
    value: G,
    positive: SubsetMask,
    negative: SubsetMask,
}

/// Grow the set of reachable values one base element at a time.
///
/// After processing `a_0 … a_i` the table holds every value of an assignment
/// on that prefix, each once, with the first assignment that produced it.
/// `stop` short-circuits once a wanted value appears.
fn reach<G, F>(base: &Collection<G>, mut stop: F) -> Vec<Reached<G>>
where
    G: CommutativeGroup,
    F: FnMut(&G) -> bool,
{
    let mut table = vec![Reached {
        value: G::identity(),
        positive: SubsetMask::EMPTY,
        negative: SubsetMask::EMPTY,
    }];
    let mut seen: HashSet<G> = HashSet::new();
    seen.insert(G::identity());
    if stop(&G::identity()) {
        return table;
    }

    for (i, a) in base.iter().enumerate() {
        let inv = a.inverse();
        let prefix = table.len();
        for j in 0..prefix {
            let (value, positive, negative) = {
                let r = &table[j];
                (r.value.clone(), r.positive, r.negative)
            };
            for (step, pos, neg) in [
                (a, positive.insert(i), negative),
                (&inv, positive, negative.insert(i)),
            ] {
                let v = value.combine(step);
                if seen.insert(v.clone()) {
                    let hit = stop(&v);
                    table.push(Reached {
                        value: v,
                        positive: pos,
                        negative: neg,
                    });
                    if hit {
                        return table;
                    }
                }
            }
        }
    }
    table
}

impl Kernel {
    /// `Span(S)`: every value of a `{-1, 0, +1}` assignment on `S`.
    ///
    /// Always contains the identity (the all-zero assignment) and `S` itself.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`](crate::Error::TooLarge) when `|S|` exceeds
    /// `max_span_width`.
    pub fn span<G: CommutativeGroup>(&self, s: &Collection<G>) -> Result<Collection<G>> {
        self.limits().ensure_width(Operation::Span, s.len())?;
        let table = reach(s, |_| false);
        tracing::trace!(
            target: "dissociation::span",
            base = s.len(),
            values = table.len(),
            "span enumerated"
        );
        Ok(table.into_iter().map(|r| r.value).collect())
    }

    /// Find an assignment on `S` whose value is `target`, if any.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`](crate::Error::TooLarge) when `|S|` exceeds
    /// `max_span_width`.
    pub fn represent<G: CommutativeGroup>(
        &self,
        target: &G,
        s: &Collection<G>,
    ) -> Result<Option<SignedCombination<G>>> {
        self.limits().ensure_width(Operation::Span, s.len())?;
        let table = reach(s, |v| v == target);
        Ok(table
            .iter()
            .rev()
            .find(|r| r.value == *target)
            .map(|r| SignedCombination::from_masks(s, r.positive, r.negative)))
    }

    /// `{∏t · (∏u)⁻¹ : t, u ⊆ S}`, the quotient characterisation of the span.
    ///
    /// Computed independently of [`span`](Self::span) by pairing distinct
    /// sub-collection values, so the two can be compared.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`](crate::Error::TooLarge) when `|S|` exceeds half
    /// of `max_check_width`.
    pub fn quotient_set<G: CommutativeGroup>(&self, s: &Collection<G>) -> Result<Collection<G>> {
        self.limits().ensure_width(Operation::QuotientSet, s.len())?;
        let products: Collection<G> = SubsetMask::all(s.len())
            .map(|m| s.select(m).product())
            .collect();
        let mut quotients = Vec::new();
        for t in &products {
            for u in &products {
                quotients.push(t.quotient(u));
            }
        }
        Ok(quotients.into_iter().collect())
    }
}

/// [`Kernel::span`] under default limits.
///
/// # Errors
///
/// See [`Kernel::span`].
pub fn span<G: CommutativeGroup>(s: &Collection<G>) -> Result<Collection<G>> {
    Kernel::default().span(s)
}

/// [`Kernel::represent`] under default limits.
///
/// # Errors
///
/// See [`Kernel::represent`].
pub fn represent<G: CommutativeGroup>(
    target: &G,
    s: &Collection<G>,
) -> Result<Option<SignedCombination<G>>> {
    Kernel::default().represent(target, s)
}

/// [`Kernel::quotient_set`] under default limits.
///
/// # Errors
///
/// See [`Kernel::quotient_set`].
pub fn quotient_set<G: CommutativeGroup>(s: &Collection<G>) -> Result<Collection<G>> {
    Kernel::default().quotient_set(s)
}
