//! Main Execution Loop.
//!
//! This module implements the per-instruction step of the CPU. Each step performs, in order:
//! 1. **Pin and Interrupt Handling:** Honours reset and bus hold, then polls the bus
//!    interrupt hook every `poll_interval` steps.
//! 2. **Fetch and Decode:** Translates and fetches the word at `pc`, decodes it, and
//!    rejects control transfers placed in a delay slot.
//! 3. **Execute:** Dispatches to the instruction handler, which mutates registers and
//!    pushes into the pipelines.
//! 4. **Pipeline Advance:** Advances all four pipelines, committing retiring entries to
//!    their destination registers and refreshing the `FSR` precision bits.
//! 5. **Trap Resolution:** Latches the external interrupt, then vectors any pending trap.

use super::branch::BranchOp;
use super::integer::Src1;
use super::{Cpu, DelayedBranch};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{Trap, TrapClass};
use crate::core::pipeline::{FpValue, Unit};
use crate::core::units::alu::AluOp;
use crate::core::units::fpu::FpOp;
use crate::core::units::graphics::{GraphicsOp, ZWidth};
use crate::isa::{Decoded, Opcode, decode};
use crate::soc::traits::{Bus, IrqLine};

/// Result of one call to [`Cpu::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction executed and the pipelines advanced.
    Executed,
    /// A trap was vectored; the class is the one reported in `PSR` first.
    TrapTaken(TrapClass),
    /// The reset or bus-hold pin is asserted; nothing happened.
    Held,
}

const fn cc_branch(on_cc: bool, delayed: bool) -> BranchOp {
    BranchOp::OnCc { on_cc, delayed }
}

impl<B: Bus> Cpu<B> {
    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// What the step did. Traps are state transitions, never errors.
    pub fn step(&mut self) -> StepOutcome {
        if self.pins.reset {
            return StepOutcome::Held;
        }
        if self.pins.bus_hold {
            self.stats.bus_hold_stalls += 1;
            return StepOutcome::Held;
        }
        self.poll_interrupts();
        self.stats.cycles += 1;

        let insn_addr = self.pc;
        let slot = self.delayed.take();
        self.next_pc = insn_addr.wrapping_add(INSTRUCTION_SIZE);

        match self.execute_at(insn_addr, slot.is_some()) {
            Ok(decoded) => {
                self.advance_pipelines();
                self.stats.record_instruction(decoded.op, decoded.flags);
                self.pc = match slot {
                    Some(branch) => self.complete_branch(branch),
                    None => self.next_pc,
                };
            }
            Err(trap) => {
                self.traps.raise(&trap, insn_addr, slot.is_some());
                self.delayed = None;
                self.pc = self.next_pc;
            }
        }

        if self.ctrl.epsr.int() && self.ctrl.psr.im() && self.delayed.is_none() {
            self.traps.latch_external();
        }

        match self.traps.take(self.pc) {
            Some(delivery) => {
                let class = delivery.primary_class();
                self.deliver_trap(&delivery);
                StepOutcome::TrapTaken(class)
            }
            None => StepOutcome::Executed,
        }
    }

    /// Steps up to `n` times, stopping early only while a pin holds the core.
    ///
    /// # Returns
    ///
    /// The number of steps that were not held (executed or trapped).
    pub fn run(&mut self, n: u64) -> u64 {
        let mut progressed = 0;
        for _ in 0..n {
            if self.step() == StepOutcome::Held {
                break;
            }
            progressed += 1;
        }
        progressed
    }

    fn poll_interrupts(&mut self) {
        if self.poll_interval == 0 {
            return;
        }
        self.poll_counter += 1;
        if self.poll_counter < self.poll_interval {
            return;
        }
        match self.bus.poll_interrupts(self.poll_counter) {
            IrqLine::Asserted => self.gen_interrupt(),
            IrqLine::Deasserted => self.clr_interrupt(),
            IrqLine::Unchanged => {}
        }
        self.poll_counter = 0;
    }

    /// Fetches, decodes and executes the instruction at `insn_addr`.
    fn execute_at(&mut self, insn_addr: u32, in_delay_slot: bool) -> Result<Decoded, Trap> {
        let insn = self.fetch(insn_addr)?;
        let decoded = decode(insn)?;
        if in_delay_slot && decoded.is_control_flow() {
            tracing::warn!(
                pc = insn_addr,
                insn,
                op = decoded.op.mnemonic(),
                "control transfer in a delay slot"
            );
            return Err(Trap::UndefinedOpcode { insn });
        }
        if self.trace {
            tracing::trace!(
                pc = insn_addr,
                insn,
                op = decoded.op.mnemonic(),
                slot = in_delay_slot,
                "execute"
            );
        }
        self.dispatch(&decoded, insn_addr)?;
        Ok(decoded)
    }

    /// Routes a decoded instruction to its handler.
    fn dispatch(&mut self, d: &Decoded, pc: u32) -> Result<(), Trap> {
        let insn = d.insn;
        match d.op {
            Opcode::LdB | Opcode::Ld => self.exec_load(insn),
            Opcode::StB | Opcode::St => self.exec_store(insn),
            Opcode::Fld => self.exec_fld(insn),
            Opcode::Fst => self.exec_fst(insn),
            Opcode::Pfld => self.exec_pfld(insn),
            Opcode::PstD => self.exec_pst_d(insn),
            Opcode::Flush => {
                self.exec_flush(insn);
                Ok(())
            }
            Opcode::Ixfr => {
                self.exec_ixfr(insn);
                Ok(())
            }

            Opcode::LdC => self.exec_ld_c(insn, pc),
            Opcode::StC => self.exec_st_c(insn),
            Opcode::Trap => Err(Trap::SoftwareTrap),
            Opcode::Intovr => self.exec_intovr(),
            Opcode::Lock | Opcode::Unlock => {
                Self::exec_lock(d.op, pc);
                Ok(())
            }

            Opcode::Br => self.branch(BranchOp::Direct { link: false }, insn, pc),
            Opcode::Call => self.branch(BranchOp::Direct { link: true }, insn, pc),
            Opcode::Bri => self.branch(BranchOp::Indirect, insn, pc),
            Opcode::Calli => self.branch(BranchOp::IndirectCall, insn, pc),
            Opcode::Bc => self.branch(cc_branch(true, false), insn, pc),
            Opcode::BcT => self.branch(cc_branch(true, true), insn, pc),
            Opcode::Bnc => self.branch(cc_branch(false, false), insn, pc),
            Opcode::BncT => self.branch(cc_branch(false, true), insn, pc),
            Opcode::Bte => self.branch(BranchOp::Compare { on_equal: true }, insn, pc),
            Opcode::Btne => self.branch(BranchOp::Compare { on_equal: false }, insn, pc),
            Opcode::Bla => self.branch(BranchOp::LoopAdd, insn, pc),

            Opcode::Addu => self.integer(AluOp::Addu, Src1::Signed, insn),
            Opcode::Adds => self.integer(AluOp::Adds, Src1::Signed, insn),
            Opcode::Subu => self.integer(AluOp::Subu, Src1::Signed, insn),
            Opcode::Subs => self.integer(AluOp::Subs, Src1::Signed, insn),
            Opcode::Shl => self.integer(AluOp::Shl, Src1::Unsigned, insn),
            Opcode::Shr => self.integer(AluOp::Shr, Src1::Unsigned, insn),
            Opcode::Shra => self.integer(AluOp::Shra, Src1::Unsigned, insn),
            Opcode::Shrd => self.integer(AluOp::Shrd, Src1::Register, insn),
            Opcode::And => self.integer(AluOp::And, Src1::Unsigned, insn),
            Opcode::Andh => self.integer(AluOp::And, Src1::High, insn),
            Opcode::Andnot => self.integer(AluOp::Andnot, Src1::Unsigned, insn),
            Opcode::Andnoth => self.integer(AluOp::Andnot, Src1::High, insn),
            Opcode::Or => self.integer(AluOp::Or, Src1::Unsigned, insn),
            Opcode::Orh => self.integer(AluOp::Or, Src1::High, insn),
            Opcode::Xor => self.integer(AluOp::Xor, Src1::Unsigned, insn),
            Opcode::Xorh => self.integer(AluOp::Xor, Src1::High, insn),

            Opcode::Pfam | Opcode::Pfsm => self.exec_dual(d.op, insn),
            Opcode::Fadd => self.exec_fp_arith(FpOp::Add, Unit::Adder, insn),
            Opcode::Fsub => self.exec_fp_arith(FpOp::Sub, Unit::Adder, insn),
            Opcode::Fmul => self.exec_fp_arith(FpOp::Mul, Unit::Multiplier, insn),
            Opcode::Famov => self.exec_fp_arith(FpOp::Mov, Unit::Adder, insn),
            Opcode::Pfmul3 => self.exec_pfmul3(insn),
            Opcode::Fmlow => {
                self.exec_fmlow(insn);
                Ok(())
            }
            Opcode::Frcp | Opcode::Frsqr => self.exec_reciprocal(d.op, insn),
            Opcode::Fix | Opcode::Ftrunc => self.exec_to_integer(d.op, insn),
            Opcode::Pfgt | Opcode::Pfeq => self.exec_compare(d.op, insn),
            Opcode::Fxfr => {
                self.exec_fxfr(insn);
                Ok(())
            }

            Opcode::Fiadd => self.graphics(GraphicsOp::IntegerAdd, insn),
            Opcode::Fisub => self.graphics(GraphicsOp::IntegerSub, insn),
            Opcode::Faddp => self.graphics(GraphicsOp::PixelAdd, insn),
            Opcode::Faddz => self.graphics(GraphicsOp::ZAdd, insn),
            Opcode::Form => self.graphics(GraphicsOp::Or, insn),
            Opcode::Fzchks => self.graphics(GraphicsOp::ZCheck(ZWidth::Short), insn),
            Opcode::Fzchkl => self.graphics(GraphicsOp::ZCheck(ZWidth::Long), insn),
        }
    }

    fn branch(&mut self, op: BranchOp, insn: u32, pc: u32) -> Result<(), Trap> {
        self.exec_branch(op, insn, pc);
        Ok(())
    }

    fn integer(&mut self, op: AluOp, src1: Src1, insn: u32) -> Result<(), Trap> {
        self.exec_integer(op, src1, insn);
        Ok(())
    }

    fn graphics(&mut self, op: GraphicsOp, insn: u32) -> Result<(), Trap> {
        self.exec_graphics(op, insn);
        Ok(())
    }

    /// Advances every pipeline once and writes retiring results back.
    fn advance_pipelines(&mut self) {
        let regs = &mut self.regs;
        let stats = &mut self.stats;
        let retired = self.pipelines.advance_all(|unit, entry| {
            stats.record_retirement(unit);
            let Some(dest) = entry.dest else {
                return;
            };
            let dest = usize::from(dest);
            match entry.value {
                FpValue::Single(bits) => regs.write_f32(dest, bits),
                FpValue::Double(bits) => regs.write_f64(dest, bits),
            }
            tracing::trace!(?unit, dest, bits = entry.value.bits(), "pipeline retire");
        });
        if retired > 0 {
            tracing::trace!(retired, "pipelines advanced");
        }

        let fsr = &mut self.ctrl.fsr;
        fsr.set_arp(self.pipelines.last_stage_is_double(Unit::Adder));
        fsr.set_mrp(self.pipelines.last_stage_is_double(Unit::Multiplier));
        fsr.set_lrp(self.pipelines.last_stage_is_double(Unit::Load));
        fsr.set_irp(self.pipelines.last_stage_is_double(Unit::Graphics));
    }

    /// Finishes a delayed branch after its slot executed; returns the next `pc`.
    fn complete_branch(&mut self, branch: DelayedBranch) -> u32 {
        if branch.trap_return {
            let psr = &mut self.ctrl.psr;
            let (prev_user, prev_im) = (psr.prev_user(), psr.pim());
            psr.set_user(prev_user);
            psr.set_im(prev_im);
            self.traps.clear_fir_indicator();
        }
        branch.target
    }
}
