//! Control Register and System Instruction Handlers.
//!
//! This module implements `ld.c`, `st.c`, `intovr`, `lock`/`unlock` and `flush`.
//! Reserved control register numbers are undefined opcodes. Reads of `fir`
//! return the trap address once after each trap and the reading instruction's
//! own address otherwise.

use super::Cpu;
use crate::common::Trap;
use crate::core::arch::control::ControlReg;
use crate::isa::Opcode;
use crate::isa::instruction::InstructionBits;
use crate::soc::traits::Bus;

impl<B: Bus> Cpu<B> {
    fn control_reg(insn: u32) -> Result<ControlReg, Trap> {
        ControlReg::from_index(insn.creg()).ok_or(Trap::UndefinedOpcode { insn })
    }

    /// `ld.c creg, idest`.
    pub(crate) fn exec_ld_c(&mut self, insn: u32, pc: u32) -> Result<(), Trap> {
        let reg = Self::control_reg(insn)?;
        let val = if reg == ControlReg::Fir {
            if self.traps.fir_gets_trap_addr() {
                self.traps.clear_fir_indicator();
            } else {
                self.ctrl.fir = pc;
            }
            self.ctrl.fir
        } else {
            self.ctrl.read(reg)
        };
        self.regs.write(insn.dest(), val);
        Ok(())
    }

    /// `st.c isrc1, creg`.
    pub(crate) fn exec_st_c(&mut self, insn: u32) -> Result<(), Trap> {
        let reg = Self::control_reg(insn)?;
        let val = self.regs.read(insn.src1());
        let user = self.is_user();
        let be_before = self.ctrl.epsr.be();
        if !self.ctrl.store(reg, val, user) {
            return Ok(());
        }
        match reg {
            ControlReg::Epsr if self.ctrl.epsr.be() != be_before => {
                tracing::debug!(big_endian = self.ctrl.epsr.be(), "data byte order changed");
            }
            ControlReg::Dirbase => {
                tracing::debug!(
                    dirbase = self.ctrl.dirbase.0,
                    ate = self.ctrl.dirbase.ate(),
                    "dirbase written"
                );
            }
            _ => {}
        }
        Ok(())
    }

    /// `intovr`: traps when the last add or subtract overflowed.
    pub(crate) const fn exec_intovr(&self) -> Result<(), Trap> {
        if self.ctrl.epsr.of() {
            Err(Trap::IntegerOverflow)
        } else {
            Ok(())
        }
    }

    /// `lock` / `unlock`: bus locking is not modelled.
    pub(crate) fn exec_lock(op: Opcode, pc: u32) {
        tracing::warn!(pc, op = op.mnemonic(), "bus lock not modelled; ignored");
    }

    /// `flush #const(isrc2)[++]`: no cache is modelled, only the address update happens.
    pub(crate) fn exec_flush(&mut self, insn: u32) {
        let addr = self
            .regs
            .read(insn.src2())
            .wrapping_add(insn.simm16() & !0xF);
        if insn & 1 != 0 {
            self.regs.write(insn.src2(), addr);
        }
    }
}
