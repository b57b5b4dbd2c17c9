//! Dissociation checker.
//!
//! A finite `S` is *dissociated* when `T ↦ ∏T` is injective on the power set
//! of `S`. The checker grows the table of sub-collection values one element
//! at a time and stops at the first repeated value. Two colliding
//! sub-collections may overlap; their common part cancels (the carrier is a
//! group), so removing it from both sides leaves a disjoint witness with the
//! same equality.
//!
//! # Edge Cases
//!
//! | Input | Result |
//! |-------|--------|
//! | `∅` | dissociated |
//! | `{e}` | not dissociated: `∏∅ = ∏{e}` |
//! | `{a}`, `a ≠ e` | dissociated |
//!
//! # Example
//!
//! ```
//! use dissociation::group::Additive;
//! use dissociation::{check, Collection, Dissociation};
//!
//! let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
//! match check(&s).unwrap() {
//!     Dissociation::NotDissociated(w) => {
//!         assert_eq!(w.left().product(), w.right().product());
//!         assert!(w.left().is_disjoint(w.right()));
//!     }
//!     Dissociation::Dissociated => unreachable!("1 + 2 = 3"),
//! }
//! ```

use std::collections::HashMap;

use crate::collection::{Collection, SubsetMask};
use crate::error::{Operation, Result};
use crate::group::CommutativeGroup;
use crate::limits::Kernel;

/// Two distinct, disjoint sub-collections with equal combined value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "G: serde::Serialize + Clone",
        deserialize = "G: serde::Deserialize<'de> + Clone + Eq + core::hash::Hash"
    ))
)]
pub struct Witness<G> {
    left: Collection<G>,
    right: Collection<G>,
}

/// Which side of a [`Witness`] holds an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// In [`Witness::left`].
    Left,
    /// In [`Witness::right`].
    Right,
}

impl<G: CommutativeGroup> Witness<G> {
    /// Left sub-collection.
    #[inline]
    pub fn left(&self) -> &Collection<G> {
        &self.left
    }

    /// Right sub-collection.
    #[inline]
    pub fn right(&self) -> &Collection<G> {
        &self.right
    }

    /// The shared combined value `∏left = ∏right`.
    pub fn value(&self) -> G {
        self.left.product()
    }

    /// The side containing `element`, if any. Disjointness makes it unique.
    pub fn side_of(&self, element: &G) -> Option<Side> {
        if self.left.contains(element) {
            Some(Side::Left)
        } else if self.right.contains(element) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// `(side containing element, other side)`.
    pub fn split(&self, side: Side) -> (&Collection<G>, &Collection<G>) {
        match side {
            Side::Left => (&self.left, &self.right),
            Side::Right => (&self.right, &self.left),
        }
    }

    /// Both sides swapped.
    #[must_use]
    pub fn swap(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    /// Check every witness property against the set it claims to refute.
    ///
    /// Distinct, disjoint, both inside `within`, equal combined values.
    pub fn verify(&self, within: &Collection<G>) -> bool {
        self.left != self.right
            && self.left.is_disjoint(&self.right)
            && self.left.is_subset(within)
            && self.right.is_subset(within)
            && self.left.product() == self.right.product()
    }

    /// The same witness for `S⁻¹`: inversion preserves equal products.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            left: self.left.inverted(),
            right: self.right.inverted(),
        }
    }
}

/// Reduce an equal-valued pair of sub-collections to a disjoint witness.
///
/// Removes `t ∩ u` from both sides. Returns `None` when `t == u`, since no
/// distinct pair remains. Equal values are not checked here; callers that
/// hand in unequal values get an unequal pair back.
///
/// # Example
///
/// ```
/// use dissociation::group::Additive;
/// use dissociation::{reduce_to_disjoint, Collection};
///
/// let c = |xs: &[i64]| xs.iter().copied().map(Additive).collect::<Collection<_>>();
/// // 1 + 2 + 5 = 5 + 3  over {1, 2, 3, 5}
/// let w = reduce_to_disjoint(&c(&[1, 2, 5]), &c(&[5, 3])).unwrap();
/// assert_eq!(*w.left(), c(&[1, 2]));
/// assert_eq!(*w.right(), c(&[3]));
/// ```
pub fn reduce_to_disjoint<G: CommutativeGroup>(
    t: &Collection<G>,
    u: &Collection<G>,
) -> Option<Witness<G>> {
    if t == u {
        return None;
    }
    let common = t.intersection(u);
    Some(Witness {
        left: t.difference(&common),
        right: u.difference(&common),
    })
}

/// Outcome of [`Kernel::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "status",
        content = "witness",
        rename_all = "kebab-case",
        bound(
            serialize = "G: serde::Serialize + Clone",
            deserialize = "G: serde::Deserialize<'de> + Clone + Eq + core::hash::Hash"
        )
    )
)]
pub enum Dissociation<G> {
    /// Every pair of distinct sub-collections has distinct values.
    Dissociated,
    /// A disjoint pair with equal values.
    NotDissociated(Witness<G>),
}

impl<G> Dissociation<G> {
    /// Check if the set was dissociated.
    #[inline]
    pub fn is_dissociated(&self) -> bool {
        matches!(self, Self::Dissociated)
    }

    /// The witness, if any.
    #[inline]
    pub fn witness(&self) -> Option<&Witness<G>> {
        match self {
            Self::Dissociated => None,
            Self::NotDissociated(w) => Some(w),
        }
    }

    /// Consume into the witness, if any.
    #[inline]
    pub fn into_witness(self) -> Option<Witness<G>> {
        match self {
            Self::Dissociated => None,
            Self::NotDissociated(w) => Some(w),
        }
    }
}

/// First colliding pair of sub-collection masks over `base`, if any.
///
/// The second mask always contains the element being added when the
/// collision surfaced; the first was recorded earlier.
pub(crate) fn find_collision<G: CommutativeGroup>(
    base: &Collection<G>,
) -> Option<(SubsetMask, SubsetMask)> {
    let mut values: Vec<(G, SubsetMask)> = Vec::with_capacity(1 << base.len().min(16));
    let mut seen: HashMap<G, SubsetMask> = HashMap::with_capacity(values.capacity());
    values.push((G::identity(), SubsetMask::EMPTY));
    seen.insert(G::identity(), SubsetMask::EMPTY);

    for (i, a) in base.iter().enumerate() {
        let prefix = values.len();
        for j in 0..prefix {
            let v = values[j].0.combine(a);
            let m = values[j].1.insert(i);
            if let Some(&prev) = seen.get(&v) {
                return Some((prev, m));
            }
            seen.insert(v.clone(), m);
            values.push((v, m));
        }
    }
    None
}

impl Kernel {
    /// Decide dissociation, producing a witness on failure.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`](crate::Error::TooLarge) when `|S|` exceeds
    /// `max_check_width`.
    pub fn check<G: CommutativeGroup>(&self, s: &Collection<G>) -> Result<Dissociation<G>> {
        self.limits().ensure_width(Operation::Check, s.len())?;
        let Some((a, b)) = find_collision(s) else {
            return Ok(Dissociation::Dissociated);
        };
        let common = a.intersection(b);
        let witness = Witness {
            left: s.select(a.difference(common)),
            right: s.select(b.difference(common)),
        };
        debug_assert!(witness.verify(s), "collision did not reduce to a witness");
        tracing::trace!(
            target: "dissociation::check",
            size = s.len(),
            left = witness.left.len(),
            right = witness.right.len(),
            "collision found"
        );
        Ok(Dissociation::NotDissociated(witness))
    }

    /// Boolean form of [`check`](Self::check).
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn is_dissociated<G: CommutativeGroup>(&self, s: &Collection<G>) -> Result<bool> {
        self.check(s).map(|d| d.is_dissociated())
    }

    /// Witness-only form of [`check`](Self::check).
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn dissociation_witness<G: CommutativeGroup>(
        &self,
        s: &Collection<G>,
    ) -> Result<Option<Witness<G>>> {
        self.check(s).map(Dissociation::into_witness)
    }
}

/// [`Kernel::check`] under default limits.
///
/// # Errors
///
/// See [`Kernel::check`].
pub fn check<G: CommutativeGroup>(s: &Collection<G>) -> Result<Dissociation<G>> {
    Kernel::default().check(s)
}

/// [`Kernel::is_dissociated`] under default limits.
///
/// # Errors
///
/// See [`Kernel::check`].
pub fn is_dissociated<G: CommutativeGroup>(s: &Collection<G>) -> Result<bool> {
    Kernel::default().is_dissociated(s)
}

/// [`Kernel::dissociation_witness`] under default limits.
///
/// # Errors
///
/// See [`Kernel::check`].
pub fn dissociation_witness<G: CommutativeGroup>(s: &Collection<G>) -> Result<Option<Witness<G>>> {
    Kernel::default().dissociation_witness(s)
}
