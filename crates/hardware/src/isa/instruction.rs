//! Instruction encoding and field extraction.
//!
//! Provides bit extraction for the i860 instruction formats. Every instruction is
//! one 32-bit word; register fields sit at fixed positions across all formats:
//!
//! ```text
//!  31    26 25   21 20   16 15   11 10                      0
//! | opcode | src2  | dest  | src1  |          ...            |   register form
//! | opcode | src2  | dest  |       immediate (16)            |   immediate form
//! | opcode |          lbroff (26)                            |   br / call / bc
//! ```

/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;

/// Bit that selects the immediate form of integer, load and `bte`/`btne` opcodes.
pub const IMM_FORM_BIT: u32 = 1 << 26;

/// FP escape: pipelined (bit 10).
pub const FP_P_BIT: u32 = 1 << 10;

/// FP escape: dual-instruction mode (bit 9).
pub const FP_D_BIT: u32 = 1 << 9;

/// FP escape: source precision is double (bit 8).
pub const FP_S_BIT: u32 = 1 << 8;

/// FP escape: result precision is double (bit 7).
pub const FP_R_BIT: u32 = 1 << 7;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Primary opcode (bits 31:26).
    fn opcode(&self) -> u32;

    /// First source register (bits 15:11).
    fn src1(&self) -> usize;

    /// Second source register (bits 25:21).
    fn src2(&self) -> usize;

    /// Destination register (bits 20:16).
    fn dest(&self) -> usize;

    /// Raw 16-bit immediate (bits 15:0).
    fn imm16(&self) -> u32;

    /// Sign-extended 16-bit immediate.
    fn simm16(&self) -> u32;

    /// Whether bit 26 selects the immediate form.
    fn is_imm_form(&self) -> bool;

    /// Sign-extended store/branch offset split across bits 20:16 and 10:0.
    fn split_offset(&self) -> u32;

    /// Sign-extended 26-bit word offset of `br`/`call`/`bc`, scaled to bytes.
    fn lbroff(&self) -> u32;

    /// Control register number of `ld.c`/`st.c` (bits 23:21).
    fn creg(&self) -> u32;

    /// FP escape operation (bits 6:0).
    fn fp_op(&self) -> u32;

    /// Core escape operation (bits 2:0).
    fn core_op(&self) -> u32;

    /// FP `P` bit: push into a pipeline instead of writing `dest` directly.
    fn is_pipelined(&self) -> bool;

    /// FP `S` bit: source operands are double precision.
    fn src_double(&self) -> bool;

    /// FP `R` bit: result is double precision.
    fn res_double(&self) -> bool;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self >> 26
    }

    #[inline(always)]
    fn src1(&self) -> usize {
        ((self >> 11) & REG_MASK) as usize
    }

    #[inline(always)]
    fn src2(&self) -> usize {
        ((self >> 21) & REG_MASK) as usize
    }

    #[inline(always)]
    fn dest(&self) -> usize {
        ((self >> 16) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & 0xFFFF
    }

    #[inline(always)]
    fn simm16(&self) -> u32 {
        i32::from(*self as u16 as i16) as u32
    }

    #[inline(always)]
    fn is_imm_form(&self) -> bool {
        self & IMM_FORM_BIT != 0
    }

    #[inline(always)]
    fn split_offset(&self) -> u32 {
        let raw = ((self >> 5) & 0xF800) | (self & 0x07FF);
        i32::from(raw as u16 as i16) as u32
    }

    #[inline(always)]
    fn lbroff(&self) -> u32 {
        // Shift the 26-bit field to the top, then arithmetic-shift back down
        // leaving it scaled by four.
        (((self << 6) as i32) >> 4) as u32
    }

    #[inline(always)]
    fn creg(&self) -> u32 {
        (self >> 21) & 0x7
    }

    #[inline(always)]
    fn fp_op(&self) -> u32 {
        self & 0x7F
    }

    #[inline(always)]
    fn core_op(&self) -> u32 {
        self & 0x7
    }

    #[inline(always)]
    fn is_pipelined(&self) -> bool {
        self & FP_P_BIT != 0
    }

    #[inline(always)]
    fn src_double(&self) -> bool {
        self & FP_S_BIT != 0
    }

    #[inline(always)]
    fn res_double(&self) -> bool {
        self & FP_R_BIT != 0
    }
}
