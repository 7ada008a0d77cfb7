//! Floating-point exception flags.
//!
//! The conditions an adder or multiplier operation can raise. The caller maps
//! them onto the unit's `FSR` bits:
//!
//! | Flag      | Adder | Multiplier | Shared |
//! |-----------|-------|------------|--------|
//! | SOURCE    |       |            | SE     |
//! | OVERFLOW  | AO    | MO         |        |
//! | UNDERFLOW | AU    | MU         |        |
//! | INEXACT   | AI    | MI         | SI     |

use std::ops::{BitOr, BitOrAssign};

/// Exception conditions raised by one floating-point operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// NaN operand or a domain error (`frcp`/`frsqr`).
    pub const SOURCE: Self = Self(1 << 0);
    /// Finite operands produced an infinite result.
    pub const OVERFLOW: Self = Self(1 << 1);
    /// Non-zero result below the smallest normal.
    pub const UNDERFLOW: Self = Self(1 << 2);
    /// Single-precision result was rounded.
    pub const INEXACT: Self = Self(1 << 3);

    /// Returns the raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the specified flag is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the flags trap when `FSR.FTE` is set.
    pub const fn traps(self) -> bool {
        self.0 & (Self::SOURCE.0 | Self::OVERFLOW.0 | Self::UNDERFLOW.0) != 0
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
