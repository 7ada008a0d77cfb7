//! Floating-Point Instruction Handlers.
//!
//! This module executes the floating-point unit's instructions. It performs the following:
//! 1. **Memory:** `fld`, `fst`, `pfld` and `pst.d`, with optional auto-increment of `src2`.
//! 2. **Arithmetic:** Scalar forms write `dest` at once; pipelined forms push into the
//!    adder or multiplier and reach `dest` when they retire.
//! 3. **Dual Operations:** `pfam`/`pfsm` feed both pipelines in one atomic push.
//! 4. **Status:** Records each result's exception flags in `FSR` and raises the
//!    floating-point trap when `FSR.FTE` is set. A trapping result is never delivered.

use super::Cpu;
use crate::common::Trap;
use crate::core::pipeline::{FpValue, Precision, StageEntry, Unit};
use crate::core::units::dual::{Operand, data_path};
use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::core::units::fpu::{CompareOp, FpOp, Fpu};
use crate::isa::Opcode;
use crate::isa::instruction::InstructionBits;
use crate::soc::traits::Bus;

/// `fld`/`fst`/`pfld` access size, indexed by instruction bits 2:1.
const FP_ACCESS_SIZES: [u32; 4] = [8, 4, 16, 4];

/// `pfmul3.dd` occupies all three multiplier stages despite its double result.
const PFMUL3_STAGES: u8 = 3;

/// Floating-point access size of a load or store word.
#[inline]
const fn fp_access_size(insn: u32) -> u32 {
    FP_ACCESS_SIZES[((insn >> 1) & 3) as usize]
}

impl<B: Bus> Cpu<B> {
    /// Reads a floating-point register as a single or a double.
    pub(crate) fn fp_operand(&self, idx: usize, double: bool) -> FpValue {
        if double {
            FpValue::Double(self.regs.read_f64(idx))
        } else {
            FpValue::Single(self.regs.read_f32(idx))
        }
    }

    /// Writes a floating-point register in the value's own precision.
    pub(crate) fn write_fp(&mut self, idx: usize, value: FpValue) {
        match value {
            FpValue::Single(bits) => self.regs.write_f32(idx, bits),
            FpValue::Double(bits) => self.regs.write_f64(idx, bits),
        }
    }

    /// Records the flags of an adder or multiplier result in `FSR`.
    ///
    /// The unit's overflow, underflow and inexact bits describe the latest
    /// result; `SI` and `SE` are sticky.
    ///
    /// # Returns
    ///
    /// Whether the flags must raise a floating-point trap.
    fn record_fp_flags(&mut self, unit: Unit, flags: FpFlags) -> bool {
        let fsr = &mut self.ctrl.fsr;
        let (ov, uf, ix) = (
            flags.contains(FpFlags::OVERFLOW),
            flags.contains(FpFlags::UNDERFLOW),
            flags.contains(FpFlags::INEXACT),
        );
        if unit == Unit::Multiplier {
            fsr.set_mo(ov);
            fsr.set_mu(uf);
            fsr.set_mi(ix);
        } else {
            fsr.set_ao(ov);
            fsr.set_au(uf);
            fsr.set_ai(ix);
        }
        if ix {
            fsr.set_si(true);
        }
        if flags.contains(FpFlags::SOURCE) {
            fsr.set_se(true);
        }
        fsr.fte() && flags.traps()
    }

    fn check_fp(&mut self, unit: Unit, flags: FpFlags) -> Result<(), Trap> {
        if self.record_fp_flags(unit, flags) {
            Err(Trap::FloatingPoint)
        } else {
            Ok(())
        }
    }

    /// Writes `dest` now, or pushes into `unit` when the `P` bit is set.
    fn deliver_fp(&mut self, unit: Unit, insn: u32, value: FpValue) {
        if insn.is_pipelined() {
            self.pipelines.push(unit, value, Some(insn.dest() as u8));
        } else {
            self.write_fp(insn.dest(), value);
        }
    }

    /// Effective address of a floating-point load or store.
    fn fp_address(&self, insn: u32, size: u32) -> u32 {
        let base = self.regs.read(insn.src2());
        let offset = if insn.is_imm_form() {
            insn.simm16() & !(size - 1)
        } else {
            self.regs.read(insn.src1())
        };
        base.wrapping_add(offset)
    }

    /// Bit 0 requests `src2 <- effective address` once the access has succeeded.
    fn auto_increment(&mut self, insn: u32, addr: u32) {
        if insn & 1 != 0 {
            self.regs.write(insn.src2(), addr);
        }
    }

    /// `fld.{l,d,q}`.
    pub(crate) fn exec_fld(&mut self, insn: u32) -> Result<(), Trap> {
        let size = fp_access_size(insn);
        let addr = self.fp_address(insn, size);
        let dest = insn.dest();
        match size {
            16 => {
                let q = self.read_quad(addr)?;
                self.regs.write_quad(dest, q);
            }
            8 => {
                let d = self.read_data(addr, 8)?;
                self.regs.write_f64(dest, d);
            }
            _ => {
                let w = self.read_data(addr, 4)?;
                self.regs.write_f32(dest, w as u32);
            }
        }
        self.auto_increment(insn, addr);
        Ok(())
    }

    /// `fst.{l,d,q}`. The register stored is named by the `dest` field.
    pub(crate) fn exec_fst(&mut self, insn: u32) -> Result<(), Trap> {
        let size = fp_access_size(insn);
        let addr = self.fp_address(insn, size);
        let src = insn.dest();
        match size {
            16 => self.write_quad(addr, self.regs.read_quad(src))?,
            8 => self.write_data(addr, 8, self.regs.read_f64(src))?,
            _ => self.write_data(addr, 4, u64::from(self.regs.read_f32(src)))?,
        }
        self.auto_increment(insn, addr);
        Ok(())
    }

    /// `pfld.{l,d}`: the loaded value enters the load pipeline.
    pub(crate) fn exec_pfld(&mut self, insn: u32) -> Result<(), Trap> {
        let size = fp_access_size(insn);
        if size == 16 {
            return Err(Trap::UndefinedOpcode { insn });
        }
        let addr = self.fp_address(insn, size);
        let raw = self.read_data(addr, size)?;
        let precision = Precision::from_bit(size == 8);
        self.pipelines.push(
            Unit::Load,
            FpValue::from_bits(raw, precision),
            Some(insn.dest() as u8),
        );
        self.auto_increment(insn, addr);
        Ok(())
    }

    /// `pst.d`: stores the pixels of `dest` whose `PSR.PM` bit is set, then shifts
    /// `PM` right by the number of pixels in a doubleword.
    pub(crate) fn exec_pst_d(&mut self, insn: u32) -> Result<(), Trap> {
        let addr = self.fp_address(insn, 8);
        let Some(pixel_bits) = self.ctrl.psr.pixel_bits() else {
            tracing::warn!(ps = self.ctrl.psr.ps(), "pst.d with reserved pixel size; ignored");
            return Ok(());
        };
        let pixels = 64 / pixel_bits;
        let pixel_bytes = pixel_bits / 8;
        let pixel_mask = (1u32 << pixel_bytes) - 1;
        let pm = self.ctrl.psr.pm();
        let byte_mask = (0..pixels)
            .filter(|i| pm & (1 << i) != 0)
            .fold(0u32, |mask, i| mask | (pixel_mask << (i * pixel_bytes)));

        self.write_masked(addr, self.regs.read_f64(insn.dest()), byte_mask as u8)?;
        self.ctrl.psr.set_pm(pm >> pixels);
        self.auto_increment(insn, addr);
        Ok(())
    }

    /// `ixfr isrc1, fdest`.
    pub(crate) fn exec_ixfr(&mut self, insn: u32) {
        let val = self.regs.read(insn.src1());
        self.regs.write_f32(insn.dest(), val);
    }

    /// `fxfr fsrc1, idest`.
    pub(crate) fn exec_fxfr(&mut self, insn: u32) {
        let val = self.regs.read_f32(insn.src1());
        self.regs.write(insn.dest(), val);
    }

    /// `fadd`, `fsub`, `fmul`, `famov` and their pipelined forms.
    pub(crate) fn exec_fp_arith(
        &mut self,
        fp_op: FpOp,
        unit: Unit,
        insn: u32,
    ) -> Result<(), Trap> {
        let double = insn.src_double();
        let a = self.fp_operand(insn.src1(), double);
        let b = self.fp_operand(insn.src2(), double);
        let r = Fpu::execute(
            fp_op,
            a,
            b,
            Precision::from_bit(insn.res_double()),
            self.ctrl.fsr.fz(),
        );
        self.check_fp(unit, r.flags)?;
        self.deliver_fp(unit, insn, r.value);
        Ok(())
    }

    /// `pfmul3.dd`.
    pub(crate) fn exec_pfmul3(&mut self, insn: u32) -> Result<(), Trap> {
        let a = self.fp_operand(insn.src1(), true);
        let b = self.fp_operand(insn.src2(), true);
        let r = Fpu::execute(FpOp::Mul, a, b, Precision::Double, self.ctrl.fsr.fz());
        self.check_fp(Unit::Multiplier, r.flags)?;
        self.pipelines.push_entry(
            Unit::Multiplier,
            StageEntry::new(r.value, Some(insn.dest() as u8), PFMUL3_STAGES),
        );
        Ok(())
    }

    /// `fmlow.dd`.
    pub(crate) fn exec_fmlow(&mut self, insn: u32) {
        let a = self.regs.read_f64(insn.src1());
        let b = self.regs.read_f64(insn.src2());
        self.regs.write_f64(insn.dest(), Fpu::multiply_low(a, b));
    }

    /// `frcp` and `frsqr` of `src2`.
    pub(crate) fn exec_reciprocal(&mut self, op: Opcode, insn: u32) -> Result<(), Trap> {
        let src = self.fp_operand(insn.src2(), insn.src_double());
        let result = Precision::from_bit(insn.res_double());
        let fz = self.ctrl.fsr.fz();
        let r = if op == Opcode::Frsqr {
            Fpu::reciprocal_sqrt(src, result, fz)
        } else {
            Fpu::reciprocal(src, result, fz)
        };
        self.check_fp(Unit::Multiplier, r.flags)?;
        self.write_fp(insn.dest(), r.value);
        Ok(())
    }

    /// `fix` (rounding per `FSR.RM`) and `ftrunc`. The integer lands in the low
    /// word of the double destination with the high word cleared.
    pub(crate) fn exec_to_integer(&mut self, op: Opcode, insn: u32) -> Result<(), Trap> {
        let src = self.fp_operand(insn.src1(), insn.src_double());
        let mode = if op == Opcode::Ftrunc {
            RoundingMode::Chop
        } else {
            RoundingMode::from_bits(self.ctrl.fsr.rm())
        };
        let (int, flags) = Fpu::to_integer(src, mode);
        self.check_fp(Unit::Adder, flags)?;
        self.deliver_fp(Unit::Adder, insn, FpValue::Double(u64::from(int)));
        Ok(())
    }

    /// `pfgt`/`pfle` (the `R` bit selects `pfle`) and `pfeq`: set `PSR.CC`.
    pub(crate) fn exec_compare(&mut self, op: Opcode, insn: u32) -> Result<(), Trap> {
        let cmp = match op {
            Opcode::Pfeq => CompareOp::Equal,
            _ if insn.res_double() => CompareOp::LessOrEqual,
            _ => CompareOp::Greater,
        };
        let double = insn.src_double();
        let a = self.fp_operand(insn.src1(), double);
        let b = self.fp_operand(insn.src2(), double);
        let (holds, flags) = Fpu::compare(cmp, a, b);
        self.check_fp(Unit::Adder, flags)?;
        self.ctrl.psr.set_cc(holds);
        if insn.is_pipelined() {
            self.pipelines.push(Unit::Adder, FpValue::from_bits(0, a.precision()), None);
        }
        Ok(())
    }

    /// `pfam` / `pfsm` dual operations.
    ///
    /// Operands come from the data path selected by DPC. `KR`/`KI` are loaded
    /// from `src1` before the operands are read; `T` is loaded from the value
    /// leaving the multiplier after they are read. The adder entry carries
    /// `dest`; the multiplier entry only feeds later dual operations.
    pub(crate) fn exec_dual(&mut self, op: Opcode, insn: u32) -> Result<(), Trap> {
        let path = data_path(insn);
        let src_double = insn.src_double();
        let result = Precision::from_bit(insn.res_double());
        let s1 = self.fp_operand(insn.src1(), src_double);
        let s2 = self.fp_operand(insn.src2(), src_double);
        let adder_out = self.pipelines.retiring_value(Unit::Adder);
        let mult_out = self.pipelines.retiring_value(Unit::Multiplier);

        if path.load_k {
            match path.m_op1 {
                Operand::Kr => self.special.kr = s1.bits(),
                Operand::Ki => self.special.ki = s1.bits(),
                _ => {}
            }
        }

        let special = self.special;
        let src_precision = Precision::from_bit(src_double);
        let resolve = move |operand: Operand| match operand {
            Operand::Src1 => s1,
            Operand::Src2 => s2,
            Operand::Kr => FpValue::from_bits(special.kr, src_precision),
            Operand::Ki => FpValue::from_bits(special.ki, src_precision),
            Operand::T => FpValue::from_bits(special.t, result),
            Operand::AdderResult => adder_out,
            Operand::MultiplierResult => mult_out,
        };

        let fz = self.ctrl.fsr.fz();
        let m = Fpu::execute(
            FpOp::Mul,
            resolve(path.m_op1),
            resolve(path.m_op2),
            result,
            fz,
        );
        let a_op = if op == Opcode::Pfsm { FpOp::Sub } else { FpOp::Add };
        let a = Fpu::execute(a_op, resolve(path.a_op1), resolve(path.a_op2), result, fz);

        let m_trap = self.record_fp_flags(Unit::Multiplier, m.flags);
        let a_trap = self.record_fp_flags(Unit::Adder, a.flags);
        if m_trap || a_trap {
            return Err(Trap::FloatingPoint);
        }

        if path.load_t {
            self.special.t = mult_out.bits();
        }
        self.pipelines.push_dual(
            StageEntry::new(a.value, Some(insn.dest() as u8), Unit::Adder.depth(result)),
            StageEntry::new(m.value, None, Unit::Multiplier.depth(result)),
        );
        Ok(())
    }
}
