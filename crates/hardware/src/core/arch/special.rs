//! Floating-point unit special registers.
//!
//! `KR`, `KI` and `T` feed the dual-operation data paths; `MERGE`
//! accumulates pixel data for the graphics instructions. Each holds a
//! 64-bit pattern that is interpreted as single or double precision by the
//! instruction that reads it.

use serde::Serialize;

/// The `KR`, `KI`, `T` and `MERGE` registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpecialRegs {
    /// Constant register used as the multiplier's first operand (`KR`).
    pub kr: u64,
    /// Second constant register (`KI`).
    pub ki: u64,
    /// Transfer register between the multiplier and adder (`T`).
    pub t: u64,
    /// Pixel merge register.
    pub merge: u64,
}
