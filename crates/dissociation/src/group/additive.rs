//! Additive carriers: fixed-width integers and residues modulo `N`.

use core::fmt;
use core::str::FromStr;

use super::CommutativeGroup;

/// An integer under wrapping addition, i.e. ℤ/2ᵏℤ for a `k`-bit integer.
///
/// Wrapping keeps the carrier a genuine group: overflow never escapes the
/// type, and every element still has an inverse.
///
/// # Example
///
/// ```
/// use dissociation::group::{Additive, CommutativeGroup};
///
/// let x = Additive(250u8).combine(&Additive(10));
/// assert_eq!(x, Additive(4)); // 260 mod 256
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Additive<T>(pub T);

macro_rules! additive_impl {
    ($($t:ty),* $(,)?) => {
        $(
            impl CommutativeGroup for Additive<$t> {
                #[inline]
                fn identity() -> Self {
                    Additive(0)
                }

                #[inline]
                fn combine(&self, other: &Self) -> Self {
                    Additive(self.0.wrapping_add(other.0))
                }

                #[inline]
                fn inverse(&self) -> Self {
                    Additive(self.0.wrapping_neg())
                }
            }
        )*
    };
}

additive_impl!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: fmt::Display> fmt::Display for Additive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: FromStr> FromStr for Additive<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Additive)
    }
}

/// A residue class in ℤ/Nℤ under addition.
///
/// The stored value is always reduced into `0..N`. `N` must be non-zero.
///
/// # Example
///
/// ```
/// use dissociation::group::{CommutativeGroup, ZMod};
///
/// let a = ZMod::<7>::new(5);
/// assert_eq!(a.combine(&ZMod::new(4)), ZMod::new(2));
/// assert_eq!(a.inverse(), ZMod::new(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZMod<const N: u64>(u64);

impl<const N: u64> ZMod<N> {
    /// Reduce `value` modulo `N`.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % N)
    }

    /// The canonical representative in `0..N`.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The modulus.
    #[inline]
    #[must_use]
    pub const fn modulus() -> u64 {
        N
    }
}

impl<const N: u64> CommutativeGroup for ZMod<N> {
    #[inline]
    fn identity() -> Self {
        Self(0)
    }

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        // u128 so that moduli close to u64::MAX cannot overflow.
        Self(((u128::from(self.0) + u128::from(other.0)) % u128::from(N)) as u64)
    }

    #[inline]
    fn inverse(&self) -> Self {
        Self((N - self.0) % N)
    }
}

impl<const N: u64> fmt::Display for ZMod<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.0, N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_addition_stays_in_group() {
        let max = Additive(i64::MAX);
        assert_eq!(max.combine(&Additive(1)), Additive(i64::MIN));
        assert_eq!(Additive(i64::MIN).inverse(), Additive(i64::MIN));
    }

    #[test]
    fn unsigned_inverse_is_wrapping_neg() {
        let a = Additive(3u8);
        assert_eq!(a.combine(&a.inverse()), Additive(0));
        assert_eq!(a.inverse(), Additive(253));
    }

    #[test]
    fn additive_parses_and_displays() {
        let a: Additive<i64> = " -17 ".parse().unwrap();
        assert_eq!(a, Additive(-17));
        assert_eq!(a.to_string(), "-17");
        assert!("x".parse::<Additive<i64>>().is_err());
    }

    #[test]
    fn zmod_reduces_on_construction() {
        assert_eq!(ZMod::<5>::new(12).value(), 2);
        assert_eq!(ZMod::<5>::modulus(), 5);
    }

    #[test]
    fn zmod_inverse_of_zero_is_zero() {
        assert!(ZMod::<9>::new(0).inverse().is_identity());
    }

    #[test]
    fn zmod_large_modulus_does_not_overflow() {
        const M: u64 = u64::MAX - 1;
        let a = ZMod::<M>::new(M - 1);
        assert_eq!(a.combine(&a), ZMod::new(M - 2));
    }
}
