//! i860 opcodes.
//!
//! Defines the primary opcodes (bits 31:26), the two escape opcodes, and the
//! `Opcode` sum type every decode-table entry resolves to.

/// Primary opcode that selects the floating-point escape table.
pub const OP_FP_ESCAPE: u32 = 0x12;

/// Primary opcode that selects the core escape table.
pub const OP_CORE_ESCAPE: u32 = 0x13;

/// Number of entries in the primary table.
pub const PRIMARY_TABLE_SIZE: usize = 64;

/// Number of entries in the core escape table.
pub const CORE_ESCAPE_TABLE_SIZE: usize = 8;

/// Number of entries in the floating-point escape table.
pub const FP_ESCAPE_TABLE_SIZE: usize = 128;

/// Every operation the core executes.
///
/// Register and immediate forms of the same operation share a variant; the
/// handler distinguishes them with bit 26 of the instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Memory
    /// `ld.b` load byte.
    LdB,
    /// `ld.s` / `ld.l` load halfword or word.
    Ld,
    /// `st.b` store byte.
    StB,
    /// `st.s` / `st.l` store halfword or word.
    St,
    /// `fld.{l,d,q}` floating-point load.
    Fld,
    /// `fst.{l,d,q}` floating-point store.
    Fst,
    /// `pfld.{l,d}` pipelined floating-point load.
    Pfld,
    /// `pst.d` pixel store.
    PstD,
    /// `flush` cache line flush.
    Flush,
    /// `ixfr` integer to floating-point register transfer.
    Ixfr,

    // Control registers and traps
    /// `ld.c` load from control register.
    LdC,
    /// `st.c` store to control register.
    StC,
    /// `trap` software trap.
    Trap,
    /// `intovr` trap on integer overflow.
    Intovr,
    /// `lock` begin interlocked sequence.
    Lock,
    /// `unlock` end interlocked sequence.
    Unlock,

    // Control flow
    /// `br` unconditional branch (delayed).
    Br,
    /// `call` subroutine call (delayed).
    Call,
    /// `bri` indirect branch (delayed).
    Bri,
    /// `calli` indirect call (delayed).
    Calli,
    /// `bc` branch on CC.
    Bc,
    /// `bc.t` branch on CC, taken (delayed).
    BcT,
    /// `bnc` branch on not CC.
    Bnc,
    /// `bnc.t` branch on not CC, taken (delayed).
    BncT,
    /// `bte` branch if equal.
    Bte,
    /// `btne` branch if not equal.
    Btne,
    /// `bla` branch on LCC and add (delayed).
    Bla,

    // Integer arithmetic and logic
    /// `addu` add unsigned.
    Addu,
    /// `adds` add signed.
    Adds,
    /// `subu` subtract unsigned.
    Subu,
    /// `subs` subtract signed.
    Subs,
    /// `shl` shift left.
    Shl,
    /// `shr` logical shift right.
    Shr,
    /// `shra` arithmetic shift right.
    Shra,
    /// `shrd` double shift right by `PSR.SC`.
    Shrd,
    /// `and` / `and` immediate.
    And,
    /// `andh` and with high immediate.
    Andh,
    /// `andnot`.
    Andnot,
    /// `andnoth`.
    Andnoth,
    /// `or`.
    Or,
    /// `orh`.
    Orh,
    /// `xor`.
    Xor,
    /// `xorh`.
    Xorh,

    // Floating point
    /// `pfam` pipelined add-and-multiply dual operation.
    Pfam,
    /// `pfsm` pipelined subtract-and-multiply dual operation.
    Pfsm,
    /// `fmul` / `pfmul`.
    Fmul,
    /// `fmlow` multiply low.
    Fmlow,
    /// `frcp` reciprocal.
    Frcp,
    /// `frsqr` reciprocal square root.
    Frsqr,
    /// `pfmul3.dd` three-stage pipelined multiply.
    Pfmul3,
    /// `fadd` / `pfadd`.
    Fadd,
    /// `fsub` / `pfsub`.
    Fsub,
    /// `fix` / `pfix` convert to integer with rounding.
    Fix,
    /// `famov` / `pfamov` adder move.
    Famov,
    /// `pfgt` / `pfle` compare (R bit selects).
    Pfgt,
    /// `pfeq` compare equal.
    Pfeq,
    /// `ftrunc` / `pftrunc` convert to integer by truncation.
    Ftrunc,
    /// `fxfr` floating-point to integer register transfer.
    Fxfr,

    // Graphics
    /// `fiadd` integer add in the graphics unit.
    Fiadd,
    /// `fisub` integer subtract in the graphics unit.
    Fisub,
    /// `faddp` pixel add.
    Faddp,
    /// `faddz` Z-buffer add.
    Faddz,
    /// `fzchkl` 32-bit Z-buffer check.
    Fzchkl,
    /// `fzchks` 16-bit Z-buffer check.
    Fzchks,
    /// `form` OR with MERGE.
    Form,
}

impl Opcode {
    /// Assembler mnemonic, without precision or pipeline suffixes.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::LdB => "ld.b",
            Self::Ld => "ld",
            Self::StB => "st.b",
            Self::St => "st",
            Self::Fld => "fld",
            Self::Fst => "fst",
            Self::Pfld => "pfld",
            Self::PstD => "pst.d",
            Self::Flush => "flush",
            Self::Ixfr => "ixfr",
            Self::LdC => "ld.c",
            Self::StC => "st.c",
            Self::Trap => "trap",
            Self::Intovr => "intovr",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Br => "br",
            Self::Call => "call",
            Self::Bri => "bri",
            Self::Calli => "calli",
            Self::Bc => "bc",
            Self::BcT => "bc.t",
            Self::Bnc => "bnc",
            Self::BncT => "bnc.t",
            Self::Bte => "bte",
            Self::Btne => "btne",
            Self::Bla => "bla",
            Self::Addu => "addu",
            Self::Adds => "adds",
            Self::Subu => "subu",
            Self::Subs => "subs",
            Self::Shl => "shl",
            Self::Shr => "shr",
            Self::Shra => "shra",
            Self::Shrd => "shrd",
            Self::And => "and",
            Self::Andh => "andh",
            Self::Andnot => "andnot",
            Self::Andnoth => "andnoth",
            Self::Or => "or",
            Self::Orh => "orh",
            Self::Xor => "xor",
            Self::Xorh => "xorh",
            Self::Pfam => "pfam",
            Self::Pfsm => "pfsm",
            Self::Fmul => "fmul",
            Self::Fmlow => "fmlow",
            Self::Frcp => "frcp",
            Self::Frsqr => "frsqr",
            Self::Pfmul3 => "pfmul3.dd",
            Self::Fadd => "fadd",
            Self::Fsub => "fsub",
            Self::Fix => "fix",
            Self::Famov => "famov",
            Self::Pfgt => "pfgt",
            Self::Pfeq => "pfeq",
            Self::Ftrunc => "ftrunc",
            Self::Fxfr => "fxfr",
            Self::Fiadd => "fiadd",
            Self::Fisub => "fisub",
            Self::Faddp => "faddp",
            Self::Faddz => "faddz",
            Self::Fzchkl => "fzchkl",
            Self::Fzchks => "fzchks",
            Self::Form => "form",
        }
    }
}
