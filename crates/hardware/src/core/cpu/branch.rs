//! Branch Instruction Handlers.
//!
//! This module resolves control transfers. It performs the following:
//! 1. **Target Computation:** `pc + 4 + offset` for direct branches, `src1` for indirect ones.
//!    `bte`, `btne` and `bla` scale the split 16-bit offset instead of the 26-bit one.
//! 2. **Delay Slots:** Delayed branches record their target in `Cpu::delayed`; the slot
//!    executes on the next step and the target is fetched on the step after.
//! 3. **Immediate Branches:** `bc`, `bnc`, `bte` and `btne` redirect the next fetch directly.
//! 4. **Loop Control:** `bla` updates its induction register and the loop condition code.
//!
//! Handlers never trap. A taken `bc.t`/`bnc.t` behaves like `br`; a not-taken one
//! skips its delay slot.

use super::{Cpu, DelayedBranch};
use crate::common::constants::{INSTRUCTION_SIZE, LINK_REGISTER};
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::instruction::InstructionBits;
use crate::soc::traits::Bus;

/// Control transfer performed by a branch instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BranchOp {
    /// `br`, or `call` when `link` is set.
    Direct { link: bool },
    /// `bri`.
    Indirect,
    /// `calli`.
    IndirectCall,
    /// `bc` (`on_cc`) or `bnc`; the `.t` forms are `delayed`.
    OnCc { on_cc: bool, delayed: bool },
    /// `bte` (`on_equal`) or `btne`.
    Compare { on_equal: bool },
    /// `bla`.
    LoopAdd,
}

impl<B: Bus> Cpu<B> {
    /// Executes a branch, call or `bla`.
    ///
    /// # Arguments
    ///
    /// * `op`   - The transfer to perform.
    /// * `insn` - The raw instruction word.
    /// * `pc`   - Address of the instruction.
    pub(crate) fn exec_branch(&mut self, op: BranchOp, insn: u32, pc: u32) {
        let fall_through = pc.wrapping_add(INSTRUCTION_SIZE);
        let skip_slot = fall_through.wrapping_add(INSTRUCTION_SIZE);
        let target = fall_through.wrapping_add(insn.lbroff());
        // bte, btne and bla carry register fields, leaving a 16-bit split offset.
        let short_target = fall_through.wrapping_add(insn.split_offset() << 2);
        let cc = self.ctrl.psr.cc();

        match op {
            BranchOp::Direct { link } => {
                if link {
                    self.regs.write(LINK_REGISTER, skip_slot);
                }
                self.delay(target);
            }
            BranchOp::Indirect => {
                let target = self.regs.read(insn.src1()) & !3;
                let trap_return = self.ctrl.psr.trap_bits() != 0;
                self.delayed = Some(DelayedBranch {
                    target,
                    trap_return,
                });
            }
            BranchOp::IndirectCall => {
                let target = self.regs.read(insn.src1()) & !3;
                self.regs.write(LINK_REGISTER, skip_slot);
                self.delay(target);
            }
            BranchOp::OnCc { on_cc, delayed } => match (cc == on_cc, delayed) {
                (true, true) => self.delay(target),
                (true, false) => self.next_pc = target,
                (false, true) => self.next_pc = skip_slot,
                (false, false) => {}
            },
            BranchOp::Compare { on_equal } => {
                let s1 = if insn.is_imm_form() {
                    insn.src1() as u32
                } else {
                    self.regs.read(insn.src1())
                };
                let s2 = self.regs.read(insn.src2());
                if (s1 == s2) == on_equal {
                    self.next_pc = short_target;
                }
            }
            BranchOp::LoopAdd => self.exec_bla(insn, short_target, skip_slot),
        }
    }

    fn delay(&mut self, target: u32) {
        self.delayed = Some(DelayedBranch {
            target,
            trap_return: false,
        });
    }

    /// `bla`: branch on the old `LCC`, add `src1` into `src2`, and compute the new `LCC`
    /// from the signed comparison `src2 < -src1`.
    fn exec_bla(&mut self, insn: u32, target: u32, skip_slot: u32) {
        let s1 = self.regs.read(insn.src1());
        let s2 = self.regs.read(insn.src2());
        let sum = Alu::execute(AluOp::Adds, s1, s2, 0);
        let next_lcc = !sum.cc.unwrap_or(false);
        self.regs.write(insn.src2(), sum.value);

        let taken = self.ctrl.psr.lcc();
        self.ctrl.psr.set_lcc(next_lcc);
        self.delay(if taken { target } else { skip_slot });
    }
}
