//! ALU shift operations.
//!
//! Implements `shl`, `shr`, `shra` and the funnel shift `shrd`. Shift counts
//! are taken from the low five bits of `s1`; `shr` also reports the count so
//! the caller can load `PSR.SC` for a following `shrd`.

use super::{AluOp, AluOutput};

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1F;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - `Shl`, `Shr`, `Shra` or `Shrd`.
/// * `s1` - Shift count (register or immediate), or the high word for `shrd`.
/// * `s2` - Value to shift, or the low word for `shrd`.
/// * `sc` - Current `PSR.SC`, used only by `shrd`.
pub fn execute(op: AluOp, s1: u32, s2: u32, sc: u32) -> AluOutput {
    let count = s1 & SHAMT_MASK;
    match op {
        AluOp::Shl => AluOutput::value(s2 << count),
        AluOp::Shr => AluOutput {
            shift_count: Some(count),
            ..AluOutput::value(s2 >> count)
        },
        AluOp::Shra => AluOutput::value(((s2 as i32) >> count) as u32),
        AluOp::Shrd => {
            let wide = (u64::from(s1) << 32) | u64::from(s2);
            AluOutput::value((wide >> (sc & SHAMT_MASK)) as u32)
        }
        _ => AluOutput::value(0),
    }
}
