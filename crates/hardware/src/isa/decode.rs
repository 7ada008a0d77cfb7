//! i860 Instruction Decoder.
//!
//! This module maps a 32-bit instruction word to an [`Opcode`] and its
//! per-opcode flags through three statically built tables:
//! 1. **Primary:** 64 entries indexed by bits 31:26.
//! 2. **Core Escape:** 8 entries indexed by bits 2:0, reached through opcode `0x13`.
//! 3. **FP Escape:** 128 entries indexed by bits 6:0, reached through opcode `0x12`.
//!
//! Lookup is a direct index at every level, so decoding is O(1) and a pure
//! function of the instruction word. Empty slots decode to an undefined-opcode
//! trap.

use std::ops::BitOr;

use crate::common::error::Trap;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{
    CORE_ESCAPE_TABLE_SIZE, FP_ESCAPE_TABLE_SIZE, OP_CORE_ESCAPE, OP_FP_ESCAPE, Opcode,
    PRIMARY_TABLE_SIZE,
};

/// Per-opcode property flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OpFlags(u8);

impl OpFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The instruction after this one executes before control transfers.
    pub const DELAY_SLOT: Self = Self(1 << 0);
    /// May change the program counter; forbidden in a delay slot.
    pub const CONTROL_FLOW: Self = Self(1 << 1);
    /// Executes in the floating-point unit.
    pub const FLOATING_POINT: Self = Self(1 << 2);
    /// Executes in the graphics unit.
    pub const GRAPHICS: Self = Self(1 << 3);
    /// Performs a data memory reference.
    pub const MEMORY: Self = Self(1 << 4);
    /// Writes a control register.
    pub const WRITES_CONTROL: Self = Self(1 << 5);

    /// Returns the raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for OpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// One decode-table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeEntry {
    /// The operation, or `None` for an undefined encoding.
    pub op: Option<Opcode>,
    /// Properties of the operation.
    pub flags: OpFlags,
}

impl DecodeEntry {
    const UNDEFINED: Self = Self {
        op: None,
        flags: OpFlags::NONE,
    };

    const fn new(op: Opcode, flags: OpFlags) -> Self {
        Self { op: Some(op), flags }
    }
}

/// A successfully decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The raw instruction word.
    pub insn: u32,
    /// The operation selected by the tables.
    pub op: Opcode,
    /// Properties of the operation.
    pub flags: OpFlags,
}

impl Decoded {
    /// Whether the instruction has an architectural delay slot.
    #[inline]
    pub const fn has_delay_slot(&self) -> bool {
        self.flags.contains(OpFlags::DELAY_SLOT)
    }

    /// Whether the instruction may transfer control.
    #[inline]
    pub const fn is_control_flow(&self) -> bool {
        self.flags.contains(OpFlags::CONTROL_FLOW)
    }
}

const MEM: OpFlags = OpFlags::MEMORY;
const FP: OpFlags = OpFlags::FLOATING_POINT;
const FP_MEM: OpFlags = OpFlags::FLOATING_POINT.union(OpFlags::MEMORY);
const GFX: OpFlags = OpFlags::GRAPHICS;
const BRANCH: OpFlags = OpFlags::CONTROL_FLOW;
const DELAYED: OpFlags = OpFlags::CONTROL_FLOW.union(OpFlags::DELAY_SLOT);
const NONE: OpFlags = OpFlags::NONE;

const fn build_primary() -> [DecodeEntry; PRIMARY_TABLE_SIZE] {
    let mut t = [DecodeEntry::UNDEFINED; PRIMARY_TABLE_SIZE];
    t[0x00] = DecodeEntry::new(Opcode::LdB, MEM);
    t[0x01] = DecodeEntry::new(Opcode::LdB, MEM);
    t[0x02] = DecodeEntry::new(Opcode::Ixfr, FP);
    t[0x03] = DecodeEntry::new(Opcode::StB, MEM);
    t[0x04] = DecodeEntry::new(Opcode::Ld, MEM);
    t[0x05] = DecodeEntry::new(Opcode::Ld, MEM);
    t[0x07] = DecodeEntry::new(Opcode::St, MEM);
    t[0x08] = DecodeEntry::new(Opcode::Fld, FP_MEM);
    t[0x09] = DecodeEntry::new(Opcode::Fld, FP_MEM);
    t[0x0A] = DecodeEntry::new(Opcode::Fst, FP_MEM);
    t[0x0B] = DecodeEntry::new(Opcode::Fst, FP_MEM);
    t[0x0C] = DecodeEntry::new(Opcode::LdC, NONE);
    t[0x0D] = DecodeEntry::new(Opcode::Flush, NONE);
    t[0x0E] = DecodeEntry::new(Opcode::StC, OpFlags::WRITES_CONTROL);
    t[0x0F] = DecodeEntry::new(Opcode::PstD, FP_MEM);
    t[0x10] = DecodeEntry::new(Opcode::Bri, DELAYED);
    t[0x11] = DecodeEntry::new(Opcode::Trap, NONE);
    t[0x14] = DecodeEntry::new(Opcode::Btne, BRANCH);
    t[0x15] = DecodeEntry::new(Opcode::Btne, BRANCH);
    t[0x16] = DecodeEntry::new(Opcode::Bte, BRANCH);
    t[0x17] = DecodeEntry::new(Opcode::Bte, BRANCH);
    t[0x18] = DecodeEntry::new(Opcode::Pfld, FP_MEM);
    t[0x19] = DecodeEntry::new(Opcode::Pfld, FP_MEM);
    t[0x1A] = DecodeEntry::new(Opcode::Br, DELAYED);
    t[0x1B] = DecodeEntry::new(Opcode::Call, DELAYED);
    t[0x1C] = DecodeEntry::new(Opcode::Bc, BRANCH);
    t[0x1D] = DecodeEntry::new(Opcode::BcT, DELAYED);
    t[0x1E] = DecodeEntry::new(Opcode::Bnc, BRANCH);
    t[0x1F] = DecodeEntry::new(Opcode::BncT, DELAYED);
    t[0x20] = DecodeEntry::new(Opcode::Addu, NONE);
    t[0x21] = DecodeEntry::new(Opcode::Addu, NONE);
    t[0x22] = DecodeEntry::new(Opcode::Subu, NONE);
    t[0x23] = DecodeEntry::new(Opcode::Subu, NONE);
    t[0x24] = DecodeEntry::new(Opcode::Adds, NONE);
    t[0x25] = DecodeEntry::new(Opcode::Adds, NONE);
    t[0x26] = DecodeEntry::new(Opcode::Subs, NONE);
    t[0x27] = DecodeEntry::new(Opcode::Subs, NONE);
    t[0x28] = DecodeEntry::new(Opcode::Shl, NONE);
    t[0x29] = DecodeEntry::new(Opcode::Shl, NONE);
    t[0x2A] = DecodeEntry::new(Opcode::Shr, NONE);
    t[0x2B] = DecodeEntry::new(Opcode::Shr, NONE);
    t[0x2C] = DecodeEntry::new(Opcode::Shrd, NONE);
    t[0x2D] = DecodeEntry::new(Opcode::Bla, DELAYED);
    t[0x2E] = DecodeEntry::new(Opcode::Shra, NONE);
    t[0x2F] = DecodeEntry::new(Opcode::Shra, NONE);
    t[0x30] = DecodeEntry::new(Opcode::And, NONE);
    t[0x31] = DecodeEntry::new(Opcode::And, NONE);
    t[0x33] = DecodeEntry::new(Opcode::Andh, NONE);
    t[0x34] = DecodeEntry::new(Opcode::Andnot, NONE);
    t[0x35] = DecodeEntry::new(Opcode::Andnot, NONE);
    t[0x37] = DecodeEntry::new(Opcode::Andnoth, NONE);
    t[0x38] = DecodeEntry::new(Opcode::Or, NONE);
    t[0x39] = DecodeEntry::new(Opcode::Or, NONE);
    t[0x3B] = DecodeEntry::new(Opcode::Orh, NONE);
    t[0x3C] = DecodeEntry::new(Opcode::Xor, NONE);
    t[0x3D] = DecodeEntry::new(Opcode::Xor, NONE);
    t[0x3F] = DecodeEntry::new(Opcode::Xorh, NONE);
    t
}

const fn build_core_escape() -> [DecodeEntry; CORE_ESCAPE_TABLE_SIZE] {
    let mut t = [DecodeEntry::UNDEFINED; CORE_ESCAPE_TABLE_SIZE];
    t[1] = DecodeEntry::new(Opcode::Lock, NONE);
    t[2] = DecodeEntry::new(Opcode::Calli, DELAYED);
    t[4] = DecodeEntry::new(Opcode::Intovr, NONE);
    t[7] = DecodeEntry::new(Opcode::Unlock, NONE);
    t
}

const fn build_fp_escape() -> [DecodeEntry; FP_ESCAPE_TABLE_SIZE] {
    let mut t = [DecodeEntry::UNDEFINED; FP_ESCAPE_TABLE_SIZE];
    let mut i = 0x00;
    while i < 0x10 {
        t[i] = DecodeEntry::new(Opcode::Pfam, FP);
        t[i + 0x10] = DecodeEntry::new(Opcode::Pfsm, FP);
        i += 1;
    }
    t[0x20] = DecodeEntry::new(Opcode::Fmul, FP);
    t[0x21] = DecodeEntry::new(Opcode::Fmlow, FP);
    t[0x22] = DecodeEntry::new(Opcode::Frcp, FP);
    t[0x23] = DecodeEntry::new(Opcode::Frsqr, FP);
    t[0x24] = DecodeEntry::new(Opcode::Pfmul3, FP);
    t[0x30] = DecodeEntry::new(Opcode::Fadd, FP);
    t[0x31] = DecodeEntry::new(Opcode::Fsub, FP);
    t[0x32] = DecodeEntry::new(Opcode::Fix, FP);
    t[0x33] = DecodeEntry::new(Opcode::Famov, FP);
    t[0x34] = DecodeEntry::new(Opcode::Pfgt, FP);
    t[0x35] = DecodeEntry::new(Opcode::Pfeq, FP);
    t[0x3A] = DecodeEntry::new(Opcode::Ftrunc, FP);
    t[0x40] = DecodeEntry::new(Opcode::Fxfr, FP);
    t[0x49] = DecodeEntry::new(Opcode::Fiadd, GFX);
    t[0x4D] = DecodeEntry::new(Opcode::Fisub, GFX);
    t[0x50] = DecodeEntry::new(Opcode::Faddp, GFX);
    t[0x51] = DecodeEntry::new(Opcode::Faddz, GFX);
    t[0x57] = DecodeEntry::new(Opcode::Fzchkl, GFX);
    t[0x5A] = DecodeEntry::new(Opcode::Form, GFX);
    t[0x5F] = DecodeEntry::new(Opcode::Fzchks, GFX);
    t
}

/// Primary decode table, indexed by bits 31:26.
pub static PRIMARY: [DecodeEntry; PRIMARY_TABLE_SIZE] = build_primary();

/// Core escape table, indexed by bits 2:0.
pub static CORE_ESCAPE: [DecodeEntry; CORE_ESCAPE_TABLE_SIZE] = build_core_escape();

/// Floating-point escape table, indexed by bits 6:0.
pub static FP_ESCAPE: [DecodeEntry; FP_ESCAPE_TABLE_SIZE] = build_fp_escape();

/// Looks up the table entry for an instruction word.
///
/// # Arguments
///
/// * `insn` - The raw 32-bit instruction word.
///
/// # Returns
///
/// The entry from the primary table, or from the escape table the primary
/// opcode selects.
#[inline]
pub fn lookup(insn: u32) -> DecodeEntry {
    match insn.opcode() {
        OP_FP_ESCAPE => FP_ESCAPE[insn.fp_op() as usize],
        OP_CORE_ESCAPE => CORE_ESCAPE[insn.core_op() as usize],
        op => PRIMARY[op as usize],
    }
}

/// Decodes an instruction word.
///
/// # Arguments
///
/// * `insn` - The raw 32-bit instruction word.
///
/// # Returns
///
/// The decoded instruction, or `Trap::UndefinedOpcode` for an empty table slot.
#[inline]
pub fn decode(insn: u32) -> Result<Decoded, Trap> {
    let entry = lookup(insn);
    entry
        .op
        .map(|op| Decoded {
            insn,
            op,
            flags: entry.flags,
        })
        .ok_or(Trap::UndefinedOpcode { insn })
}
