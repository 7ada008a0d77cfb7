//! ALU arithmetic operations.
//!
//! Implements the four add/subtract forms. Each produces a 32-bit result, the
//! condition code, and the overflow flag destined for `EPSR.OF`.

use super::{AluOp, AluOutput};

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - `Addu`, `Adds`, `Subu` or `Subs`.
/// * `s1` - First operand (register or sign-extended immediate).
/// * `s2` - Second operand (register).
///
/// # Returns
///
/// The result with CC and OF. `subu`/`subs` compute `s1 - s2`.
pub fn execute(op: AluOp, s1: u32, s2: u32) -> AluOutput {
    match op {
        AluOp::Addu => {
            let (value, carry) = s1.overflowing_add(s2);
            AluOutput::with_flags(value, carry, carry)
        }
        AluOp::Adds => {
            let (value, overflow) = (s1 as i32).overflowing_add(s2 as i32);
            let cc = i64::from(s2 as i32) < -i64::from(s1 as i32);
            AluOutput::with_flags(value as u32, cc, overflow)
        }
        AluOp::Subu => {
            let value = s1.wrapping_sub(s2);
            let cc = s2 <= s1;
            AluOutput::with_flags(value, cc, !cc)
        }
        AluOp::Subs => {
            let (value, overflow) = (s1 as i32).overflowing_sub(s2 as i32);
            let cc = (s2 as i32) > (s1 as i32);
            AluOutput::with_flags(value as u32, cc, overflow)
        }
        _ => AluOutput::value(0),
    }
}
