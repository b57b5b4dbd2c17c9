//! Basis extraction: a bounded dissociated subset whose span covers `S`.
//!
//! Given `S` and a bound `d` on every dissociated subset of `S`, the
//! extractor returns `S' ⊆ S` with `|S'| ≤ d` and `S ⊆ Span(S')`:
//!
//! 1. grow `S'` greedily, keeping an element whenever `S' ∪ {a}` stays
//!    dissociated. Dissociation is downward closed, so an element rejected
//!    early stays rejected for every later, larger `S'`: the result is
//!    inclusion-maximal (not necessarily of maximum size);
//! 2. each `a ∈ S'` is covered by its unit assignment;
//! 3. each `a ∉ S'` makes `S' ∪ {a}` non-dissociated. The checker returns a
//!    disjoint witness `(t, u)`; `S'` is dissociated, so `a` lies on exactly
//!    one side, say `t`. Then `a · ∏(t∖{a}) = ∏u` with both `t∖{a}` and `u`
//!    inside `S'`, hence `a = ∏u · (∏(t∖{a}))⁻¹ ∈ Span(S')`.
//!
//! Every covering step is returned as a [`SignedCombination`] certificate.
//!
//! # Complexity
//!
//! Greedy growth and the exchange loop each run one check per element on a
//! set of at most `d + 1` elements: `O(|S| · 2^{d+1})`. The exhaustive
//! precondition scan adds `C(|S|, d+1) · 2^{d+1}`.
//!
//! # Example
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{extract_basis, Collection};
//!
//! let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
//! let basis = extract_basis(&s, 2).unwrap();
//! assert_eq!(basis.len(), 2);
//! assert!(basis.verify(&s, 2));
//! ```

use crate::checker::{find_collision, Dissociation};
use crate::collection::{Collection, SubsetMask, MASK_WIDTH};
use crate::error::{Error, Operation, Result};
use crate::group::CommutativeGroup;
use crate::limits::{binomial, Kernel, PreconditionCheck};
use crate::span::{quotient_in_span, SignedCombination};

/// A covering subset together with one certificate per covered element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "G: serde::Serialize + Clone",
        deserialize = "G: serde::Deserialize<'de> + Clone + Eq + core::hash::Hash"
    ))
)]
pub struct Basis<G> {
    elements: Collection<G>,
    certificates: Vec<(G, SignedCombination<G>)>,
}

impl<G: CommutativeGroup> Basis<G> {
    /// The extracted subset `S'`.
    #[inline]
    pub fn elements(&self) -> &Collection<G> {
        &self.elements
    }

    /// `|S'|`.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if `S'` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Certificate that `element ∈ Span(S')`, for each element of the source set.
    pub fn certificate(&self, element: &G) -> Option<&SignedCombination<G>> {
        self.certificates
            .iter()
            .find(|(g, _)| g == element)
            .map(|(_, c)| c)
    }

    /// All `(element, certificate)` pairs, in source order.
    pub fn certificates(&self) -> impl Iterator<Item = (&G, &SignedCombination<G>)> + '_ {
        self.certificates.iter().map(|(g, c)| (g, c))
    }

    /// Consume into `S'`.
    pub fn into_elements(self) -> Collection<G> {
        self.elements
    }

    /// Re-derive every guarantee against `source` and `bound`.
    ///
    /// `S' ⊆ source`, `|S'| ≤ bound`, and every element of `source` has a
    /// certificate over `S'` that evaluates back to it.
    pub fn verify(&self, source: &Collection<G>, bound: usize) -> bool {
        self.elements.is_subset(source)
            && self.elements.len() <= bound
            && source.iter().all(|a| {
                self.certificate(a).is_some_and(|c| {
                    c.support().is_subset(&self.elements) && c.evaluate() == *a
                })
            })
    }
}

impl Kernel {
    /// An inclusion-maximal dissociated subset of `S`, grown greedily in
    /// base order.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] when a candidate extension exceeds
    /// `max_check_width`.
    pub fn maximal_dissociated_subset<G: CommutativeGroup>(
        &self,
        s: &Collection<G>,
    ) -> Result<Collection<G>> {
        let mut chosen = Collection::new();
        for a in s {
            let candidate = chosen.insert(a.clone());
            if self.is_dissociated(&candidate)? {
                chosen = candidate;
            }
        }
        Ok(chosen)
    }

    /// A dissociated subset of `S` with exactly `k` elements, if one exists.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] when `|S|` exceeds [`MASK_WIDTH`], when `k`
    /// exceeds `max_check_width`, or when `C(|S|, k)` exceeds
    /// `max_candidates`. The mask-width refusal applies whatever `k` is.
    pub fn find_dissociated_of_size<G: CommutativeGroup>(
        &self,
        s: &Collection<G>,
        k: usize,
    ) -> Result<Option<Collection<G>>> {
        if k > s.len() {
            return Ok(None);
        }
        if s.len() > MASK_WIDTH {
            return Err(Error::TooLarge {
                operation: Operation::CandidateSearch,
                size: s.len() as u64,
                limit: MASK_WIDTH as u64,
            });
        }
        self.limits().ensure_width(Operation::CandidateSearch, k)?;
        self.limits().ensure_candidates(binomial(s.len(), k))?;
        Ok(SubsetMask::combinations(s.len(), k)
            .map(|m| s.select(m))
            .find(|candidate| find_collision(candidate).is_none()))
    }

    /// The largest size of a dissociated subset of `S`.
    ///
    /// This is the smallest bound for which
    /// [`extract_basis`](Self::extract_basis) succeeds. The greedy maximal
    /// subset gives a lower bound; larger sizes are scanned until one has no
    /// dissociated representative, which by downward closure ends the search.
    ///
    /// # Errors
    ///
    /// See [`find_dissociated_of_size`](Self::find_dissociated_of_size).
    pub fn dissociation_number<G: CommutativeGroup>(&self, s: &Collection<G>) -> Result<usize> {
        let mut best = self.maximal_dissociated_subset(s)?.len();
        while self.find_dissociated_of_size(s, best + 1)?.is_some() {
            best += 1;
        }
        Ok(best)
    }

    /// Confirm that no dissociated subset of `S` has more than `bound` elements.
    ///
    /// By downward closure it suffices to scan subsets of size `bound + 1`.
    /// A bound of at least `|S|` holds trivially and scans nothing.
    ///
    /// # Errors
    ///
    /// [`Error::PreconditionViolation`] when a dissociated `(bound + 1)`-subset
    /// exists; [`Error::TooLarge`] as for
    /// [`find_dissociated_of_size`](Self::find_dissociated_of_size).
    pub fn check_bound<G: CommutativeGroup>(&self, s: &Collection<G>, bound: usize) -> Result<()> {
        if bound >= s.len() {
            return Ok(());
        }
        let size = bound + 1;
        match self.find_dissociated_of_size(s, size)? {
            Some(_) => Err(Error::PreconditionViolation { bound, size }),
            None => Ok(()),
        }
    }

    /// Extract `S' ⊆ S` with `|S'| ≤ bound` and `S ⊆ Span(S')`.
    ///
    /// `bound` must dominate the size of every dissociated subset of `S`.
    /// Under [`PreconditionCheck::Exhaustive`] that is verified up front;
    /// under [`PreconditionCheck::Trusted`] only the extracted subset's size
    /// is compared against it.
    ///
    /// The exhaustive check scans `(bound + 1)`-subsets through a
    /// [`SubsetMask`], so for `bound < |S|` it refuses any `S` wider than
    /// [`MASK_WIDTH`] even when the bound is small. Large inputs with a known
    /// bound go through [`PreconditionCheck::Trusted`], whose cost depends on
    /// `bound` rather than `|S|`.
    ///
    /// # Errors
    ///
    /// [`Error::PreconditionViolation`] when the bound is false;
    /// [`Error::TooLarge`] when a routine exceeds its configured limit.
    ///
    /// # Panics
    ///
    /// If the checker reports `S' ∪ {a}` dissociated for a maximal `S'`, or
    /// returns a witness not involving `a`. Both are internal defects.
    pub fn extract_basis<G: CommutativeGroup>(
        &self,
        s: &Collection<G>,
        bound: usize,
    ) -> Result<Basis<G>> {
        tracing::debug!(
            target: "dissociation::extract",
            size = s.len(),
            bound,
            precondition = ?self.limits().precondition,
            "extracting basis"
        );
        if self.limits().precondition == PreconditionCheck::Exhaustive {
            self.check_bound(s, bound)?;
        }

        let basis = self.maximal_dissociated_subset(s)?;
        if basis.len() > bound {
            return Err(Error::PreconditionViolation {
                bound,
                size: basis.len(),
            });
        }
        tracing::debug!(
            target: "dissociation::extract",
            basis = basis.len(),
            "maximal dissociated subset selected"
        );

        let mut certificates = Vec::with_capacity(s.len());
        for a in s {
            let certificate = if basis.contains(a) {
                SignedCombination::unit(&basis, a)
            } else {
                self.exchange(&basis, a)?
            };
            certificates.push((a.clone(), certificate));
        }

        Ok(Basis {
            elements: basis,
            certificates,
        })
    }

    /// Express `a ∉ basis` as a signed combination over a maximal `basis`.
    fn exchange<G: CommutativeGroup>(
        &self,
        basis: &Collection<G>,
        a: &G,
    ) -> Result<SignedCombination<G>> {
        let extended = basis.insert(a.clone());
        let witness = match self.check(&extended)? {
            Dissociation::NotDissociated(w) => w,
            Dissociation::Dissociated => {
                panic!("invariant violation: {a:?} extends a maximal dissociated subset")
            }
        };
        let Some(side) = witness.side_of(a) else {
            panic!("invariant violation: witness {witness:?} does not involve {a:?}");
        };
        let (with_a, without_a) = witness.split(side);

        // a · ∏(with_a ∖ {a}) = ∏without_a
        let rest = with_a.erase(a);
        let combination = quotient_in_span(without_a, &rest).extend_to(basis);
        debug_assert_eq!(combination.evaluate(), *a);
        tracing::trace!(
            target: "dissociation::extract",
            element = ?a,
            side = ?side,
            support = combination.support().len(),
            "exchanged"
        );
        Ok(combination)
    }
}

/// [`Kernel::extract_basis`] under default limits (exhaustive precondition check).
///
/// # Errors
///
/// See [`Kernel::extract_basis`].
pub fn extract_basis<G: CommutativeGroup>(s: &Collection<G>, bound: usize) -> Result<Basis<G>> {
    Kernel::default().extract_basis(s, bound)
}

/// [`Kernel::maximal_dissociated_subset`] under default limits.
///
/// # Errors
///
/// See [`Kernel::maximal_dissociated_subset`].
pub fn maximal_dissociated_subset<G: CommutativeGroup>(s: &Collection<G>) -> Result<Collection<G>> {
    Kernel::default().maximal_dissociated_subset(s)
}

/// [`Kernel::dissociation_number`] under default limits.
///
/// # Errors
///
/// See [`Kernel::dissociation_number`].
pub fn dissociation_number<G: CommutativeGroup>(s: &Collection<G>) -> Result<usize> {
    Kernel::default().dissociation_number(s)
}
