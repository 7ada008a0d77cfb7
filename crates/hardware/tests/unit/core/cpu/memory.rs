//! Integer Load/Store Tests.
//!
//! Loads sign-extend. Data byte order follows `EPSR.BE` while instruction
//! fetch stays little-endian, so programs keep running after a switch.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;
use i860_core::StepOutcome;
use i860_core::common::TrapClass;
use pretty_assertions::assert_eq;
use rstest::rstest;

const DATA: u32 = 0x2000;

fn with_data(program: &[u32]) -> TestContext {
    let mut ctx = TestContext::new().program(program);
    ctx.set_reg(5, DATA);
    ctx.poke(DATA, &[0x01, 0x02, 0x34, 0x92, 0x78, 0x56, 0x34, 0x12]);
    ctx
}

#[rstest]
#[case::byte_positive(InstructionBuilder::new().ld_b(4, 1, 5).build(), 0x02)]
#[case::byte_negative(InstructionBuilder::new().ld_b(4, 3, 5).build(), 0xFFFF_FF92)]
#[case::short_negative(InstructionBuilder::new().ld_s(4, 2, 5).build(), 0xFFFF_9234)]
#[case::long(InstructionBuilder::new().ld_l(4, 4, 5).build(), 0x1234_5678)]
fn little_endian_loads_sign_extend(#[case] insn: u32, #[case] expected: u32) {
    let mut ctx = with_data(&[insn]);
    ctx.step_n(1);
    assert_eq!(ctx.get_reg(4), expected);
}

#[test]
fn register_indexed_load() {
    let ld = InstructionBuilder::new().ld_l_reg(4, 6, 5).build();
    let mut ctx = with_data(&[ld]);
    ctx.set_reg(6, 4);
    ctx.step_n(1);
    assert_eq!(ctx.get_reg(4), 0x1234_5678);
}

#[test]
fn stores_write_little_endian_bytes() {
    let st_l = InstructionBuilder::new().st_l(4, 8, 5).build();
    let st_b = InstructionBuilder::new().st_b(4, 0x11, 5).build();
    let st_neg = InstructionBuilder::new().st_l(4, -4, 5).build();
    let mut ctx = with_data(&[st_l, st_b, st_neg]);
    ctx.set_reg(4, 0x1122_3344);
    ctx.step_n(3);
    assert_eq!(ctx.peek::<4>(DATA + 8), [0x44, 0x33, 0x22, 0x11]);
    assert_eq!(ctx.peek::<1>(DATA + 0x11), [0x44]);
    assert_eq!(ctx.peek::<4>(DATA - 4), [0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn big_endian_data_accesses() {
    let ld_l = InstructionBuilder::new().ld_l(4, 4, 5).build();
    let ld_s = InstructionBuilder::new().ld_s(6, 2, 5).build();
    let st_l = InstructionBuilder::new().st_l(7, 8, 5).build();
    let mut ctx = with_data(&[ld_l, ld_s, st_l]);
    ctx.cpu.ctrl.epsr.set_be(true);
    ctx.set_reg(7, 0x1122_3344);

    ctx.step_n(3);
    assert_eq!(ctx.get_reg(4), 0x7856_3412);
    assert_eq!(ctx.get_reg(6), 0x3492);
    assert_eq!(ctx.peek::<4>(DATA + 8), [0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn misaligned_store_writes_nothing() {
    let st = InstructionBuilder::new().st_l(4, 0, 5).build();
    let mut ctx = TestContext::new().program(&[st]);
    ctx.set_reg(5, DATA + 2);
    ctx.set_reg(4, 0xFFFF_FFFF);
    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::DataAccess));
    assert_eq!(ctx.peek::<8>(DATA), [0; 8]);
}

#[test]
fn data_breakpoint_on_write() {
    let st = InstructionBuilder::new().st_l(4, 8, 5).build();
    let mut ctx = with_data(&[st]);
    ctx.set_reg(4, 0xAAAA_AAAA);
    ctx.cpu.ctrl.db = DATA + 0xA;
    ctx.cpu.ctrl.psr.set_bw(true);

    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::DataAccess));
    assert!(ctx.cpu.ctrl.psr.dat());
    assert_eq!(ctx.peek::<4>(DATA + 8), [0; 4]);
}

#[test]
fn data_breakpoint_on_read_only_when_enabled() {
    let ld = InstructionBuilder::new().ld_l(4, 4, 5).build();
    let mut ctx = with_data(&[ld, ld]);
    ctx.cpu.ctrl.db = DATA + 4;
    ctx.cpu.ctrl.psr.set_bw(true);
    ctx.step_n(1);
    assert_eq!(ctx.get_reg(4), 0x1234_5678);

    ctx.cpu.ctrl.psr.set_br(true);
    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::DataAccess));
}

#[test]
fn writes_to_r0_are_discarded() {
    let ld = InstructionBuilder::new().ld_l(0, 4, 5).build();
    let mut ctx = with_data(&[ld]);
    ctx.step_n(1);
    assert_eq!(ctx.get_reg(0), 0);
}
