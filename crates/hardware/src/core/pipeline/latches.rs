//! Pipeline stage entries.
//!
//! This module defines what a floating-point pipeline slot holds:
//! 1. **Precision:** The single/double tag that travels with every value.
//! 2. **Values:** Raw IEEE 754 bits of either width.
//! 3. **Entries:** A value plus its destination register and drain depth.

use serde::Serialize;

/// Result precision tag carried alongside each in-flight value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Precision {
    /// 32-bit single precision.
    #[default]
    Single,
    /// 64-bit double precision.
    Double,
}

impl Precision {
    /// Precision selected by an FP escape `R` or `S` bit.
    #[inline]
    pub const fn from_bit(double: bool) -> Self {
        if double { Self::Double } else { Self::Single }
    }

    /// Whether this is double precision.
    #[inline]
    pub const fn is_double(self) -> bool {
        matches!(self, Self::Double)
    }
}

/// An in-flight value as raw IEEE 754 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FpValue {
    /// Single-precision bits.
    Single(u32),
    /// Double-precision bits.
    Double(u64),
}

impl FpValue {
    /// The precision tag of this value.
    #[inline]
    pub const fn precision(self) -> Precision {
        match self {
            Self::Single(_) => Precision::Single,
            Self::Double(_) => Precision::Double,
        }
    }

    /// Raw bits, zero-extended to 64 for singles.
    #[inline]
    pub const fn bits(self) -> u64 {
        match self {
            Self::Single(b) => b as u64,
            Self::Double(b) => b,
        }
    }

    /// Builds a value of the given precision from the low bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u64, precision: Precision) -> Self {
        match precision {
            Precision::Single => Self::Single(bits as u32),
            Precision::Double => Self::Double(bits),
        }
    }

    /// Numeric value widened to `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Single(b) => f64::from(f32::from_bits(b)),
            Self::Double(b) => f64::from_bits(b),
        }
    }
}

impl Default for FpValue {
    fn default() -> Self {
        Self::Single(0)
    }
}

/// One occupied pipeline slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageEntry {
    /// The value in flight.
    pub value: FpValue,
    /// Floating-point register to write when the value retires, if any.
    pub dest: Option<u8>,
    /// Number of advances after which the value retires.
    pub depth: u8,
}

impl StageEntry {
    /// Creates an entry that writes `dest` after `depth` advances.
    pub const fn new(value: FpValue, dest: Option<u8>, depth: u8) -> Self {
        Self { value, dest, depth }
    }

    /// Precision of the carried value.
    #[inline]
    pub const fn precision(&self) -> Precision {
        self.value.precision()
    }
}
