//! Integer Instruction Handlers.
//!
//! This module executes the integer core's instructions. It performs the following:
//! 1. **Operand Selection:** Register or immediate `src1`, with sign extension for
//!    arithmetic, zero extension for logic and the 16-bit shift for the `h` forms.
//! 2. **Status:** Copies the ALU's carry/borrow/zero result into `PSR.CC`, overflow into
//!    `EPSR.OF` and the shift count of `shr` into `PSR.SC`.
//! 3. **Loads and Stores:** `ld.b`/`ld.s`/`ld.l` (sign-extending) and `st.b`/`st.s`/`st.l`.

use super::Cpu;
use crate::common::Trap;
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::instruction::InstructionBits;
use crate::soc::traits::Bus;

/// Access size selected by opcode bit 2 (halfword/word group) and instruction bit 0.
const INT_ACCESS_SIZES: [u32; 4] = [1, 1, 2, 4];

/// Integer access size of a load or store word.
#[inline]
const fn int_access_size(insn: u32) -> u32 {
    INT_ACCESS_SIZES[(((insn >> 27) & 2) | (insn & 1)) as usize]
}

/// Sign-extends the low `size` bytes of `val`.
#[inline]
const fn sign_extend(val: u64, size: u32) -> u32 {
    match size {
        1 => val as u8 as i8 as i32 as u32,
        2 => val as u16 as i16 as i32 as u32,
        _ => val as u32,
    }
}

/// Where an integer instruction takes its `src1` operand from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Src1 {
    /// Register, or the sign-extended immediate (`addu`, `adds`, `subu`, `subs`).
    Signed,
    /// Register, or the zero-extended immediate (logic and shifts).
    Unsigned,
    /// Always a register (`shrd`).
    Register,
    /// Immediate in the high halfword (`andh`, `andnoth`, `orh`, `xorh`).
    High,
}

impl<B: Bus> Cpu<B> {
    /// Executes an integer ALU instruction.
    pub(crate) fn exec_integer(&mut self, op: AluOp, src1: Src1, insn: u32) {
        let imm = insn.is_imm_form();
        let s1 = match src1 {
            Src1::Signed if imm => insn.simm16(),
            Src1::Unsigned if imm => insn.imm16(),
            Src1::High => insn.imm16() << 16,
            Src1::Signed | Src1::Unsigned | Src1::Register => self.regs.read(insn.src1()),
        };
        let s2 = self.regs.read(insn.src2());
        let out = Alu::execute(op, s1, s2, self.ctrl.psr.sc());

        if let Some(cc) = out.cc {
            self.ctrl.psr.set_cc(cc);
        }
        if let Some(of) = out.overflow {
            self.ctrl.epsr.set_of(of);
        }
        if let Some(count) = out.shift_count {
            self.ctrl.psr.set_sc(count);
        }
        self.regs.write(insn.dest(), out.value);
    }

    /// Effective address of an integer load.
    fn load_address(&self, insn: u32, size: u32) -> u32 {
        let base = self.regs.read(insn.src2());
        let offset = if insn.is_imm_form() {
            insn.simm16() & !(size - 1)
        } else {
            self.regs.read(insn.src1())
        };
        base.wrapping_add(offset)
    }

    /// `ld.b`, `ld.s`, `ld.l`.
    pub(crate) fn exec_load(&mut self, insn: u32) -> Result<(), Trap> {
        let size = int_access_size(insn);
        let addr = self.load_address(insn, size);
        let raw = self.read_data(addr, size)?;
        self.regs.write(insn.dest(), sign_extend(raw, size));
        Ok(())
    }

    /// `st.b`, `st.s`, `st.l`. The offset is split across the `dest` field and bits 10:0.
    pub(crate) fn exec_store(&mut self, insn: u32) -> Result<(), Trap> {
        let size = int_access_size(insn);
        let offset = insn.split_offset() & !(size - 1);
        let addr = self.regs.read(insn.src2()).wrapping_add(offset);
        let val = self.regs.read(insn.src1());
        self.write_data(addr, size, u64::from(val))
    }
}
