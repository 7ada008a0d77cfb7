//! Decoder Properties.
//!
//! Decoding is a pure table lookup: the same word always gives the same
//! answer, a defined word keeps its bits, and an empty slot is an undefined
//! opcode trap carrying the word.

use i860_core::common::Trap;
use i860_core::isa::decode::{OpFlags, lookup};
use i860_core::isa::opcodes::{OP_CORE_ESCAPE, OP_FP_ESCAPE};
use i860_core::isa::{Opcode, decode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_is_deterministic(insn in any::<u32>()) {
        prop_assert_eq!(decode(insn), decode(insn));
    }

    #[test]
    fn decode_agrees_with_lookup(insn in any::<u32>()) {
        match (lookup(insn).op, decode(insn)) {
            (Some(op), Ok(d)) => {
                prop_assert_eq!(d.op, op);
                prop_assert_eq!(d.insn, insn);
                prop_assert_eq!(d.flags, lookup(insn).flags);
            }
            (None, Err(trap)) => prop_assert_eq!(trap, Trap::UndefinedOpcode { insn }),
            (entry, result) => prop_assert!(false, "lookup {:?} vs decode {:?}", entry, result),
        }
    }

    #[test]
    fn delay_slot_implies_control_flow(insn in any::<u32>()) {
        if let Ok(d) = decode(insn) && d.has_delay_slot() {
            prop_assert!(d.is_control_flow());
        }
    }

    #[test]
    fn register_fields_do_not_change_the_opcode(
        op in 0u32..64,
        src2 in 0u32..32,
        dest in 0u32..32,
        src1 in 0u32..32,
    ) {
        // Outside the escapes the low 26 bits carry operands, except bit 0 in
        // the memory group, so only the opcode field is fixed here.
        prop_assume!(op != OP_CORE_ESCAPE && op != OP_FP_ESCAPE);
        let bare = op << 26;
        let with_regs = bare | (src2 << 21) | (dest << 16) | (src1 << 11);
        prop_assert_eq!(
            decode(bare).map(|d| d.op),
            decode(with_regs).map(|d| d.op)
        );
    }
}

#[test]
fn reserved_primary_opcodes_are_undefined() {
    for op in [0x06u32, 0x32, 0x36, 0x3A, 0x3E] {
        let insn = op << 26;
        assert_eq!(decode(insn), Err(Trap::UndefinedOpcode { insn }), "op {op:#04x}");
    }
}

#[test]
fn escape_tables_select_on_low_bits() {
    let core = (OP_CORE_ESCAPE << 26) | 4;
    assert_eq!(decode(core).map(|d| d.op), Ok(Opcode::Intovr));
    let undefined_core = OP_CORE_ESCAPE << 26;
    assert!(decode(undefined_core).is_err());

    let fp = (OP_FP_ESCAPE << 26) | 0x30;
    assert_eq!(decode(fp).map(|d| d.op), Ok(Opcode::Fadd));
    let undefined_fp = (OP_FP_ESCAPE << 26) | 0x7F;
    assert!(decode(undefined_fp).is_err());
}

#[test]
fn flags_classify_instructions() {
    let br = decode(0x1A << 26).unwrap();
    assert!(br.flags.contains(OpFlags::DELAY_SLOT));
    let bc = decode(0x1C << 26).unwrap();
    assert!(bc.is_control_flow() && !bc.has_delay_slot());
    let fld = decode(0x09 << 26).unwrap();
    assert!(fld.flags.contains(OpFlags::MEMORY) && fld.flags.contains(OpFlags::FLOATING_POINT));
    let faddp = decode((OP_FP_ESCAPE << 26) | 0x50).unwrap();
    assert!(faddp.flags.contains(OpFlags::GRAPHICS));
}
