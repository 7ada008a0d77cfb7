//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer core's ALU. Results carry the side
//! effects the instruction may have on `PSR.CC`, `EPSR.OF` and `PSR.SC`, which
//! the caller commits.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Addu, Adds, Subu, Subs
//! - [`logic`]:      And, Andnot, Or, Xor
//! - [`shifts`]:     Shl, Shr, Shra, Shrd

/// Integer add and subtract.
pub mod arithmetic;

/// Bitwise logical operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

/// Integer ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Unsigned add.
    Addu,
    /// Signed add.
    Adds,
    /// Unsigned subtract.
    Subu,
    /// Signed subtract.
    Subs,
    /// Bitwise and.
    And,
    /// `!s1 & s2`.
    Andnot,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Shift left.
    Shl,
    /// Logical shift right.
    Shr,
    /// Arithmetic shift right.
    Shra,
    /// Double shift right by `PSR.SC`.
    Shrd,
}

/// Result of an ALU operation and the status it produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Value for the destination register.
    pub value: u32,
    /// New `PSR.CC`, if the operation defines one.
    pub cc: Option<bool>,
    /// New `EPSR.OF`, if the operation defines one.
    pub overflow: Option<bool>,
    /// New `PSR.SC`, if the operation loads it.
    pub shift_count: Option<u32>,
}

impl AluOutput {
    /// A result with no status side effects.
    pub const fn value(value: u32) -> Self {
        Self {
            value,
            cc: None,
            overflow: None,
            shift_count: None,
        }
    }

    /// A result that sets both CC and OF.
    pub const fn with_flags(value: u32, cc: bool, overflow: bool) -> Self {
        Self {
            value,
            cc: Some(cc),
            overflow: Some(overflow),
            shift_count: None,
        }
    }
}

/// Integer ALU.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform.
    /// * `s1` - First operand (the `src1` register or immediate).
    /// * `s2` - Second operand (the `src2` register).
    /// * `sc` - Current `PSR.SC` for `shrd`.
    ///
    /// # Examples
    ///
    /// ```
    /// use i860_core::core::units::alu::{Alu, AluOp};
    ///
    /// let out = Alu::execute(AluOp::Addu, 0xFFFF_FFFF, 1, 0);
    /// assert_eq!(out.value, 0);
    /// assert_eq!(out.cc, Some(true)); // carry out
    ///
    /// let out = Alu::execute(AluOp::Subu, 5, 7, 0);
    /// assert_eq!(out.value, (-2i32) as u32);
    /// assert_eq!(out.cc, Some(false)); // borrow
    /// ```
    pub fn execute(op: AluOp, s1: u32, s2: u32, sc: u32) -> AluOutput {
        match op {
            AluOp::Addu | AluOp::Adds | AluOp::Subu | AluOp::Subs => {
                arithmetic::execute(op, s1, s2)
            }
            AluOp::And | AluOp::Andnot | AluOp::Or | AluOp::Xor => logic::execute(op, s1, s2),
            AluOp::Shl | AluOp::Shr | AluOp::Shra | AluOp::Shrd => {
                shifts::execute(op, s1, s2, sc)
            }
        }
    }
}
