//! ALU logical operations.
//!
//! Implements `and`, `andnot`, `or` and `xor`. The condition code is set when
//! the result is zero. The high-immediate forms are handled by the caller,
//! which shifts the immediate before it gets here.

use super::{AluOp, AluOutput};

/// Executes a logical operation.
///
/// # Arguments
///
/// * `op` - `And`, `Andnot`, `Or` or `Xor`.
/// * `s1` - First operand (register or zero-extended immediate).
/// * `s2` - Second operand (register).
///
/// # Returns
///
/// The result with CC = (result == 0). `andnot` computes `!s1 & s2`.
pub fn execute(op: AluOp, s1: u32, s2: u32) -> AluOutput {
    let value = match op {
        AluOp::And => s1 & s2,
        AluOp::Andnot => !s1 & s2,
        AluOp::Or => s1 | s2,
        AluOp::Xor => s1 ^ s2,
        _ => 0,
    };
    AluOutput {
        value,
        cc: Some(value == 0),
        overflow: None,
        shift_count: None,
    }
}
