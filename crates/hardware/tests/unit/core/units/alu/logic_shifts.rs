use i860_core::core::units::alu::{Alu, AluOp};
use rstest::rstest;

#[rstest]
#[case::and(AluOp::And, 0xF0F0, 0xFF00, 0xF000)]
#[case::and_zero(AluOp::And, 0x0F, 0xF0, 0)]
#[case::andnot(AluOp::Andnot, 0x00FF, 0x0FFF, 0x0F00)]
#[case::or(AluOp::Or, 0x1000, 0x0001, 0x1001)]
#[case::or_zero(AluOp::Or, 0, 0, 0)]
#[case::xor_self(AluOp::Xor, 0xDEAD_BEEF, 0xDEAD_BEEF, 0)]
#[case::xor(AluOp::Xor, 0xFFFF_0000, 0x00FF_FF00, 0xFF00_FF00)]
fn logic_sets_cc_on_zero(#[case] op: AluOp, #[case] s1: u32, #[case] s2: u32, #[case] value: u32) {
    let out = Alu::execute(op, s1, s2, 0);
    assert_eq!(out.value, value);
    assert_eq!(out.cc, Some(value == 0));
    assert_eq!(out.overflow, None);
}

#[rstest]
#[case::shl(AluOp::Shl, 4, 0x0000_00F1, 0x0000_0F10)]
#[case::shl_count_masked(AluOp::Shl, 33, 1, 2)]
#[case::shr(AluOp::Shr, 4, 0x8000_0000, 0x0800_0000)]
#[case::shra(AluOp::Shra, 4, 0x8000_0000, 0xF800_0000)]
#[case::shra_positive(AluOp::Shra, 31, 0x7FFF_FFFF, 0)]
fn shifts_count_from_src1(
    #[case] op: AluOp,
    #[case] count: u32,
    #[case] s2: u32,
    #[case] value: u32,
) {
    let out = Alu::execute(op, count, s2, 0);
    assert_eq!(out.value, value);
    assert_eq!(out.cc, None);
}

#[test]
fn shr_loads_shift_count() {
    assert_eq!(Alu::execute(AluOp::Shr, 35, 0, 0).shift_count, Some(3));
    assert_eq!(Alu::execute(AluOp::Shl, 3, 0, 0).shift_count, None);
    assert_eq!(Alu::execute(AluOp::Shra, 3, 0, 0).shift_count, None);
}

#[rstest]
#[case::across_words(1, 0, 4, 0x1000_0000)]
#[case::zero_count(0x1234_5678, 0x9ABC_DEF0, 0, 0x9ABC_DEF0)]
#[case::full_word(0x1234_5678, 0x9ABC_DEF0, 16, 0x5678_9ABC)]
fn shrd_uses_psr_sc(#[case] hi: u32, #[case] lo: u32, #[case] sc: u32, #[case] value: u32) {
    assert_eq!(Alu::execute(AluOp::Shrd, hi, lo, sc).value, value);
}
