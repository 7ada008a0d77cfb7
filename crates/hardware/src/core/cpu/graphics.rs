//! Graphics Instruction Handlers.
//!
//! The graphics unit has a single stage, so its results are written to `dest`
//! in the same step. Pipelined forms also push an untargeted entry into the
//! graphics pipeline so `FSR.IRP` tracks the last result's precision.

use super::Cpu;
use crate::core::pipeline::{FpValue, Precision, Unit};
use crate::core::units::graphics::{self, GraphicsOp};
use crate::isa::instruction::InstructionBits;
use crate::soc::traits::Bus;

impl<B: Bus> Cpu<B> {
    /// `fiadd`, `fisub`, `faddp`, `faddz`, `fzchks`, `fzchkl`, `form`.
    pub(crate) fn exec_graphics(&mut self, op: GraphicsOp, insn: u32) {
        let double = !op.is_integer() || insn.res_double();
        let read = |cpu: &Self, idx: usize| {
            if double {
                cpu.regs.read_f64(idx)
            } else {
                u64::from(cpu.regs.read_f32(idx))
            }
        };
        let s1 = read(self, insn.src1());
        let s2 = read(self, insn.src2());
        let merge = self.special.merge;

        let result = match op {
            GraphicsOp::IntegerAdd => graphics::integer_add(s1, s2, double),
            GraphicsOp::IntegerSub => graphics::integer_sub(s1, s2, double),
            GraphicsOp::PixelAdd => {
                let pixel_bits = self.ctrl.psr.pixel_bits();
                if pixel_bits.is_none() {
                    tracing::warn!(ps = self.ctrl.psr.ps(), "faddp with reserved pixel size");
                }
                let (r, m) = graphics::faddp(s1, s2, merge, pixel_bits);
                self.special.merge = m;
                r
            }
            GraphicsOp::ZAdd => {
                let (r, m) = graphics::faddz(s1, s2, merge);
                self.special.merge = m;
                r
            }
            GraphicsOp::Or => {
                let (r, m) = graphics::form(s1, merge);
                self.special.merge = m;
                r
            }
            GraphicsOp::ZCheck(width) => {
                let (r, pm) = graphics::zcheck(s1, s2, self.ctrl.psr.pm(), width);
                self.ctrl.psr.set_pm(pm);
                r
            }
        };

        let value = FpValue::from_bits(result, Precision::from_bit(double));
        self.write_fp(insn.dest(), value);
        if insn.is_pipelined() {
            self.pipelines.push(Unit::Graphics, value, None);
        }
    }
}
