//! Dual-operation data-path control.
//!
//! `pfam` and `pfsm` drive the multiplier and adder in one instruction. The
//! low four bits of the opcode (the DPC field) pick, from a fixed table, where
//! each unit's two operands come from and whether `T` or `KR`/`KI` are loaded
//! on the way.

/// Where a dual-operation operand comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The `src1` register.
    Src1,
    /// The `src2` register.
    Src2,
    /// The `KR` constant register.
    Kr,
    /// The `KI` constant register.
    Ki,
    /// The `T` register.
    T,
    /// The value leaving the adder this step.
    AdderResult,
    /// The value leaving the multiplier this step.
    MultiplierResult,
}

/// One row of the data-path control table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataPath {
    /// Multiplier first operand.
    pub m_op1: Operand,
    /// Multiplier second operand.
    pub m_op2: Operand,
    /// Adder first operand.
    pub a_op1: Operand,
    /// Adder second operand.
    pub a_op2: Operand,
    /// Load `T` from the multiplier's retiring value.
    pub load_t: bool,
    /// Load the constant register (`KR` or `KI`, whichever `m_op1` names) from `src1`.
    pub load_k: bool,
}

const fn dp(
    m_op1: Operand,
    m_op2: Operand,
    a_op1: Operand,
    a_op2: Operand,
    load_t: bool,
    load_k: bool,
) -> DataPath {
    DataPath {
        m_op1,
        m_op2,
        a_op1,
        a_op2,
        load_t,
        load_k,
    }
}

use Operand::{AdderResult as APIPE, Ki, Kr, MultiplierResult as MPIPE, Src1, Src2, T};

/// The sixteen data paths, indexed by DPC.
pub static DATA_PATHS: [DataPath; 16] = [
    dp(Kr, Src2, Src1, MPIPE, false, false),  // r2p1
    dp(Kr, Src2, T, MPIPE, false, true),      // r2pt
    dp(Kr, Src2, Src1, APIPE, true, false),   // r2ap1
    dp(Kr, Src2, T, APIPE, true, true),       // r2apt
    dp(Ki, Src2, Src1, MPIPE, false, false),  // i2p1
    dp(Ki, Src2, T, MPIPE, false, true),      // i2pt
    dp(Ki, Src2, Src1, APIPE, true, false),   // i2ap1
    dp(Ki, Src2, T, APIPE, true, true),       // i2apt
    dp(Kr, APIPE, Src1, Src2, true, false),   // rat1p2
    dp(Src1, Src2, APIPE, MPIPE, false, false), // m12apm
    dp(Kr, APIPE, Src1, Src2, false, false),  // ra1p2
    dp(Src1, Src2, T, APIPE, true, false),    // m12ttpa
    dp(Ki, APIPE, Src1, Src2, true, false),   // iat1p2
    dp(Src1, Src2, T, MPIPE, false, false),   // m12tpm
    dp(Ki, APIPE, Src1, Src2, false, false),  // ia1p2
    dp(Src1, Src2, T, APIPE, false, false),   // m12tpa
];

/// Returns the data path selected by the DPC field (bits 3:0).
#[inline]
pub fn data_path(insn: u32) -> DataPath {
    DATA_PATHS[(insn & 0xF) as usize]
}
