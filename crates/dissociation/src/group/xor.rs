//! 𝔽₂⁶⁴: 64-bit vectors under xor.
//!
//! Every element is its own inverse, so signed combinations collapse to
//! ordinary subset sums and dissociation coincides with linear independence
//! over 𝔽₂.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use super::CommutativeGroup;

/// A vector in 𝔽₂⁶⁴.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Xor(pub u64);

impl CommutativeGroup for Xor {
    #[inline]
    fn identity() -> Self {
        Xor(0)
    }

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        Xor(self.0 ^ other.0)
    }

    #[inline]
    fn inverse(&self) -> Self {
        *self
    }
}

impl fmt::Display for Xor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// Accepts `0b…`, `0x…` or plain decimal.
impl FromStr for Xor {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bits = if let Some(bin) = s.strip_prefix("0b") {
            u64::from_str_radix(bin, 2)?
        } else if let Some(hex) = s.strip_prefix("0x") {
            u64::from_str_radix(hex, 16)?
        } else {
            s.parse()?
        };
        Ok(Xor(bits))
    }
}
