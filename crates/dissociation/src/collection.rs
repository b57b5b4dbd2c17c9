//! Finite duplicate-free collections of group elements and subset masks.
//!
//! A [`Collection`] stores its elements in first-insertion order, but that
//! order is an implementation detail: equality is set equality. The order
//! matters only for [`SubsetMask`], which addresses sub-collections by bit
//! position relative to a fixed base collection.
//!
//! # Example
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::Collection;
//!
//! let s: Collection<_> = [1, 2, 3, 2].into_iter().map(Additive).collect();
//! assert_eq!(s.len(), 3);
//!
//! let t: Collection<_> = [3, 1, 2].into_iter().map(Additive).collect();
//! assert_eq!(s, t); // order-irrelevant
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use crate::group::{self, CommutativeGroup};

/// Widest collection a [`SubsetMask`] can address.
///
/// One bit below `u64::BITS` so that `1 << len` never overflows.
pub const MASK_WIDTH: usize = 63;

/// A finite set of distinct elements.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "Vec<G>",
        into = "Vec<G>",
        bound(
            serialize = "G: serde::Serialize + Clone",
            deserialize = "G: serde::Deserialize<'de> + Clone + Eq + Hash"
        )
    )
)]
pub struct Collection<G> {
    elements: Vec<G>,
}

impl<G> Collection<G> {
    /// The empty collection.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Cardinality.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements, each exactly once.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, G> {
        self.elements.iter()
    }

    /// Elements in base order (the order [`SubsetMask`] bits refer to).
    #[inline]
    pub fn as_slice(&self) -> &[G] {
        &self.elements
    }

    /// Consume into the underlying element vector.
    #[inline]
    pub fn into_vec(self) -> Vec<G> {
        self.elements
    }
}

impl<G: Clone + Eq + Hash> Collection<G> {
    /// A one-element collection.
    #[must_use]
    pub fn singleton(value: G) -> Self {
        Self {
            elements: vec![value],
        }
    }

    /// Test membership.
    pub fn contains(&self, value: &G) -> bool {
        self.elements.iter().any(|x| x == value)
    }

    /// Position of `value` in base order.
    pub fn index_of(&self, value: &G) -> Option<usize> {
        self.elements.iter().position(|x| x == value)
    }

    /// A new collection with `value` added (no-op if already present).
    #[must_use]
    pub fn insert(&self, value: G) -> Self {
        let mut out = self.clone();
        if !out.contains(&value) {
            out.elements.push(value);
        }
        out
    }

    /// A new collection with `value` removed (no-op if absent).
    #[must_use]
    pub fn erase(&self, value: &G) -> Self {
        Self {
            elements: self.elements.iter().filter(|x| *x != value).cloned().collect(),
        }
    }

    /// Union (`self`'s elements first, then `other`'s new ones).
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Elements of `self` not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            elements: self
                .elements
                .iter()
                .filter(|x| !other.contains(x))
                .cloned()
                .collect(),
        }
    }

    /// Elements in both.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            elements: self
                .elements
                .iter()
                .filter(|x| other.contains(x))
                .cloned()
                .collect(),
        }
    }

    /// Check if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.elements.iter().all(|x| other.contains(x))
    }

    /// Check if `self` and `other` share no element.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.elements.iter().any(|x| other.contains(x))
    }

    /// The sub-collection selected by `mask` (bits beyond `len` are ignored).
    #[must_use]
    pub fn select(&self, mask: SubsetMask) -> Self {
        Self {
            elements: mask
                .iter()
                .take_while(|&i| i < self.elements.len())
                .map(|i| self.elements[i].clone())
                .collect(),
        }
    }

    /// The mask addressing `sub` inside `self`, or `None` if `sub ⊄ self`
    /// or `self` is wider than [`MASK_WIDTH`].
    pub fn mask_of(&self, sub: &Self) -> Option<SubsetMask> {
        if self.len() > MASK_WIDTH {
            return None;
        }
        sub.iter()
            .try_fold(SubsetMask::EMPTY, |m, x| self.index_of(x).map(|i| m.insert(i)))
    }
}

impl<G: CommutativeGroup> Collection<G> {
    /// Combined value `∏ S` (identity for the empty collection).
    pub fn product(&self) -> G {
        group::product(self.elements.iter())
    }

    /// Element-wise inverse `S⁻¹`.
    ///
    /// Inversion is a bijection, so the result has the same cardinality.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            elements: self.elements.iter().map(CommutativeGroup::inverse).collect(),
        }
    }
}

impl<G> Default for Collection<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: PartialEq> PartialEq for Collection<G> {
    fn eq(&self, other: &Self) -> bool {
        // Elements are distinct, so equal length plus inclusion is equality.
        self.len() == other.len() && self.elements.iter().all(|x| other.elements.contains(x))
    }
}

impl<G: Eq> Eq for Collection<G> {}

impl<G: Clone + Eq + Hash> FromIterator<G> for Collection<G> {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut elements = Vec::new();
        for x in iter {
            if seen.insert(x.clone()) {
                elements.push(x);
            }
        }
        Self { elements }
    }
}

impl<G: Clone + Eq + Hash> From<Vec<G>> for Collection<G> {
    fn from(elements: Vec<G>) -> Self {
        elements.into_iter().collect()
    }
}

impl<G> From<Collection<G>> for Vec<G> {
    fn from(c: Collection<G>) -> Self {
        c.elements
    }
}

impl<'a, G> IntoIterator for &'a Collection<G> {
    type Item = &'a G;
    type IntoIter = core::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<G> IntoIterator for Collection<G> {
    type Item = G;
    type IntoIter = std::vec::IntoIter<G>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

// ============================================================================
// SubsetMask: 63-bit index set over a base collection
// ============================================================================

/// A sub-collection of a base collection, one bit per base position.
///
/// # Examples
///
/// ```
/// use dissociation::SubsetMask;
///
/// let m = SubsetMask::EMPTY.insert(0).insert(2);
/// assert!(m.contains(2));
/// assert_eq!(m.len(), 2);
/// assert!(m.is_disjoint(SubsetMask::singleton(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SubsetMask(u64);

impl SubsetMask {
    /// Empty sub-collection.
    pub const EMPTY: Self = Self(0);

    /// Mask from raw bits.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Every position below `len` (`len ≤ MASK_WIDTH`).
    #[inline]
    pub const fn full(len: usize) -> Self {
        debug_assert!(len <= MASK_WIDTH);
        Self((1u64 << len) - 1)
    }

    /// Mask with only position `i`.
    #[inline]
    pub const fn singleton(i: usize) -> Self {
        Self(1u64 << i)
    }

    /// Add position `i`.
    #[inline]
    pub const fn insert(self, i: usize) -> Self {
        Self(self.0 | (1u64 << i))
    }

    /// Remove position `i`.
    #[inline]
    pub const fn remove(self, i: usize) -> Self {
        Self(self.0 & !(1u64 << i))
    }

    /// Test position `i`.
    #[inline]
    pub const fn contains(self, i: usize) -> bool {
        (self.0 >> i) & 1 == 1
    }

    /// Population count.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union (OR).
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection (AND).
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Difference (self AND NOT other).
    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Check if the two masks share no position.
    #[inline]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Check if `self` is a subset of `other`.
    #[inline]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterate over set positions in ascending order.
    pub fn iter(self) -> MaskIter {
        MaskIter(self.0)
    }

    /// All `2^len` masks over `len` positions, in counting order.
    pub fn all(len: usize) -> impl Iterator<Item = Self> {
        debug_assert!(len <= MASK_WIDTH);
        (0..=Self::full(len).0).map(Self)
    }

    /// All masks over `len` positions with exactly `k` bits set.
    ///
    /// Yields nothing when `k > len`.
    pub fn combinations(len: usize, k: usize) -> Combinations {
        debug_assert!(len <= MASK_WIDTH);
        let next = if k > len { None } else { Some(Self::full(k).0) };
        Combinations {
            next,
            limit: 1u64 << len,
        }
    }
}

/// Ascending position iterator for a [`SubsetMask`].
#[derive(Debug, Clone)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(i)
    }
}

/// Fixed-popcount mask iterator (Gosper's hack).
#[derive(Debug, Clone)]
pub struct Combinations {
    next: Option<u64>,
    limit: u64,
}

impl Iterator for Combinations {
    type Item = SubsetMask;

    fn next(&mut self) -> Option<SubsetMask> {
        let current = self.next?;
        if current >= self.limit {
            self.next = None;
            return None;
        }
        self.next = if current == 0 {
            // k = 0: the empty mask is the only combination.
            None
        } else {
            let c = current & current.wrapping_neg();
            let r = current + c;
            Some((((r ^ current) >> 2) / c) | r)
        };
        Some(SubsetMask(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{Additive, Rational};

    fn ints(xs: &[i64]) -> Collection<Additive<i64>> {
        xs.iter().copied().map(Additive).collect()
    }

    #[test]
    fn collect_deduplicates() {
        let s = ints(&[4, 4, 5, 4]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.as_slice(), &[Additive(4), Additive(5)]);
    }

    #[test]
    fn equality_ignores_order() {
        assert_eq!(ints(&[1, 2, 3]), ints(&[3, 2, 1]));
        assert_ne!(ints(&[1, 2]), ints(&[1, 2, 3]));
    }

    #[test]
    fn results_holding_collections_compare() {
        fn comparable<T: Eq>(_: &T) {}

        let s = ints(&[1, 2, 3]);
        let verdict = crate::check(&s).unwrap();
        comparable(&verdict);
        assert_eq!(verdict.clone(), verdict);
        let witness = verdict.witness().unwrap().clone();
        assert_eq!(witness, witness.clone());

        let basis = crate::extract_basis(&s, 2).unwrap();
        comparable(&basis);
        assert_eq!(basis.clone(), basis);
        assert_ne!(basis, crate::extract_basis(&ints(&[1, 2]), 2).unwrap());
    }

    #[test]
    fn set_algebra() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[3, 4]);
        assert_eq!(a.union(&b), ints(&[1, 2, 3, 4]));
        assert_eq!(a.difference(&b), ints(&[1, 2]));
        assert_eq!(a.intersection(&b), ints(&[3]));
        assert!(ints(&[2, 3]).is_subset(&a));
        assert!(!b.is_subset(&a));
        assert!(ints(&[1]).is_disjoint(&b));
    }

    #[test]
    fn insert_and_erase_are_pure() {
        let a = ints(&[1, 2]);
        let b = a.insert(Additive(3));
        let c = b.erase(&Additive(1));
        assert_eq!(a, ints(&[1, 2]));
        assert_eq!(b, ints(&[1, 2, 3]));
        assert_eq!(c, ints(&[2, 3]));
        assert_eq!(a.insert(Additive(2)).len(), 2);
        assert_eq!(a.erase(&Additive(9)), a);
    }

    #[test]
    fn product_and_inversion() {
        assert_eq!(ints(&[]).product(), Additive(0));
        assert_eq!(ints(&[1, 2, 3]).product(), Additive(6));
        assert_eq!(ints(&[1, -2]).inverted(), ints(&[-1, 2]));

        let q: Collection<_> = [2, 3]
            .into_iter()
            .filter_map(Rational::from_integer)
            .collect();
        assert_eq!(q.product(), Rational::from_integer(6).unwrap());
    }

    #[test]
    fn select_and_mask_of_agree() {
        let s = ints(&[10, 20, 30, 40]);
        let m = SubsetMask::EMPTY.insert(1).insert(3);
        let sub = s.select(m);
        assert_eq!(sub, ints(&[20, 40]));
        assert_eq!(s.mask_of(&sub), Some(m));
        assert_eq!(s.mask_of(&ints(&[50])), None);
    }

    #[test]
    fn mask_iteration_is_ascending() {
        let m = SubsetMask::from_bits(0b1010_0110);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![1, 2, 5, 7]);
        assert_eq!(SubsetMask::all(3).count(), 8);
    }

    #[test]
    fn combinations_count_binomials() {
        assert_eq!(SubsetMask::combinations(5, 2).count(), 10);
        assert_eq!(SubsetMask::combinations(5, 0).count(), 1);
        assert_eq!(SubsetMask::combinations(5, 5).count(), 1);
        assert_eq!(SubsetMask::combinations(3, 4).count(), 0);
        assert!(SubsetMask::combinations(6, 3).all(|m| m.len() == 3 && m.bits() < 64));
    }
}
