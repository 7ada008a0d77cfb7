//! Graphics Instruction Tests.
//!
//! Graphics results land in `dest` during the same step; `MERGE` and
//! `PSR.PM` carry state between instructions.

use crate::common::builder::instruction::{InstructionBuilder, fp_op};
use crate::common::harness::TestContext;

fn gfx(op: u32, fdest: u32, fsrc1: u32, fsrc2: u32) -> InstructionBuilder {
    InstructionBuilder::new().fp(op, fdest, fsrc1, fsrc2)
}

#[test]
fn fiadd_single_wraps_at_32_bits() {
    let fiadd = gfx(fp_op::FIADD, 4, 2, 3).build();
    let mut ctx = TestContext::new().program(&[fiadd]);
    ctx.cpu.regs.write_f32(2, 0xFFFF_FFFF);
    ctx.cpu.regs.write_f32(3, 2);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f32(4), 1);
}

#[test]
fn fisub_double() {
    let fisub = gfx(fp_op::FISUB, 4, 2, 6).res_double().build();
    let mut ctx = TestContext::new().program(&[fisub]);
    ctx.cpu.regs.write_f64(2, 0x1_0000_0000);
    ctx.cpu.regs.write_f64(6, 1);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(4), 0xFFFF_FFFF);
}

#[test]
fn faddz_then_form_assembles_merge() {
    let faddz = gfx(fp_op::FADDZ, 4, 2, 6).build();
    let form = gfx(fp_op::FORM, 8, 10, 0).build();
    let mut ctx = TestContext::new().program(&[faddz, form]);
    ctx.cpu.regs.write_f64(2, 0x0001_8000_0002_4000);
    ctx.cpu.regs.write_f64(6, 0x0000_8000_0000_4000);
    ctx.cpu.regs.write_f64(10, 0x0000_00FF_0000_00FF);

    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(4), 0x0002_0000_0002_8000);
    assert_eq!(ctx.cpu.special.merge, 0x0002_0000_0002_0000);

    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(8), 0x0002_00FF_0002_00FF);
    assert_eq!(ctx.cpu.special.merge, 0);
}

#[test]
fn faddp_with_reserved_pixel_size_keeps_merge() {
    let faddp = gfx(fp_op::FADDP, 4, 2, 6).build();
    let mut ctx = TestContext::new().program(&[faddp]);
    ctx.cpu.ctrl.psr.set_ps(3);
    ctx.cpu.special.merge = 0xABCD;
    ctx.cpu.regs.write_f64(2, 1);
    ctx.cpu.regs.write_f64(6, 2);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(4), 3);
    assert_eq!(ctx.cpu.special.merge, 0xABCD);
}

#[test]
fn fzchks_updates_pixel_mask() {
    let fzchks = gfx(fp_op::FZCHKS, 4, 2, 6).build();
    let mut ctx = TestContext::new().program(&[fzchks]);
    ctx.cpu.regs.write_f64(2, 0x0004_0009_0001_0005);
    ctx.cpu.regs.write_f64(6, 0x0008_0009_0002_0003);
    ctx.cpu.ctrl.psr.set_pm(0xF0);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(4), 0x0004_0009_0001_0003);
    assert_eq!(ctx.cpu.ctrl.psr.pm(), 0x5F);
}

#[test]
fn pipelined_graphics_writes_at_once_and_sets_irp() {
    let faddz = gfx(fp_op::FADDZ, 4, 2, 6).pipelined().build();
    let mut ctx = TestContext::new().program(&[faddz]);
    ctx.cpu.regs.write_f64(2, 5);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.regs.read_f64(4), 5);
    assert!(ctx.cpu.ctrl.fsr.irp());
}
