//! The multiplicative group ℚ* of nonzero rationals.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

use super::CommutativeGroup;

/// A nonzero rational number under multiplication.
///
/// # Invariant
///
/// `numer != 0`, `denom > 0`, and `gcd(|numer|, denom) == 1`. Every
/// constructor normalises, so structural equality is numeric equality.
///
/// Both parts are arbitrary-precision, so `combine` and `inverse` are exact
/// for every input. With the `serde` feature the value is written as its
/// `Display` text (`"n"` or `"n/d"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

/// Failure to parse a [`Rational`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRationalError {
    /// Numerator or denominator is not an integer.
    #[error("invalid integer in rational literal '{0}'")]
    InvalidInteger(String),
    /// The literal denotes zero, which is not in ℚ*.
    #[error("zero is not an element of the multiplicative group")]
    Zero,
    /// The denominator is zero.
    #[error("zero denominator in rational literal '{0}'")]
    ZeroDenominator(String),
}

impl Rational {
    /// Build `numer / denom`; `None` when either part is zero.
    #[must_use]
    pub fn from_parts(numer: BigInt, denom: BigInt) -> Option<Self> {
        if numer.is_zero() || denom.is_zero() {
            return None;
        }
        let g = numer.gcd(&denom);
        let (numer, denom) = (numer / &g, denom / &g);
        Some(if denom.is_negative() {
            Self {
                numer: -numer,
                denom: -denom,
            }
        } else {
            Self { numer, denom }
        })
    }

    /// [`from_parts`](Self::from_parts) for machine integers.
    #[must_use]
    pub fn new(numer: i128, denom: i128) -> Option<Self> {
        Self::from_parts(numer.into(), denom.into())
    }

    /// Build the integer `n`; `None` for zero.
    #[must_use]
    pub fn from_integer(n: i128) -> Option<Self> {
        Self::new(n, 1)
    }

    /// Reduced numerator (carries the sign).
    #[inline]
    #[must_use]
    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// Reduced denominator (always positive).
    #[inline]
    #[must_use]
    pub fn denom(&self) -> &BigInt {
        &self.denom
    }
}

impl CommutativeGroup for Rational {
    #[inline]
    fn identity() -> Self {
        Self {
            numer: BigInt::one(),
            denom: BigInt::one(),
        }
    }

    fn combine(&self, other: &Self) -> Self {
        // Both operands are reduced, so cancelling across keeps the result reduced.
        let g1 = self.numer.gcd(&other.denom);
        let g2 = other.numer.gcd(&self.denom);
        Self {
            numer: (&self.numer / &g1) * (&other.numer / &g2),
            denom: (&self.denom / &g2) * (&other.denom / &g1),
        }
    }

    fn inverse(&self) -> Self {
        if self.numer.is_negative() {
            Self {
                numer: -&self.denom,
                denom: -&self.numer,
            }
        } else {
            Self {
                numer: self.denom.clone(),
                denom: self.numer.clone(),
            }
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| ParseRationalError::InvalidInteger(s.to_owned()))
        };
        let (numer, denom) = match s.split_once('/') {
            Some((n, d)) => (parse(n)?, parse(d)?),
            None => (parse(s)?, BigInt::one()),
        };
        if denom.is_zero() {
            return Err(ParseRationalError::ZeroDenominator(s.to_owned()));
        }
        Self::from_parts(numer, denom).ok_or(ParseRationalError::Zero)
    }
}

impl From<Rational> for String {
    fn from(r: Rational) -> Self {
        r.to_string()
    }
}

impl TryFrom<String> for Rational {
    type Error = ParseRationalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
