//! Dual-Operation Tests.
//!
//! `pfam`/`pfsm` push into the adder and multiplier in the same step. The
//! multiplier's product only reaches a register by feeding a later dual
//! operation through `MPIPE` or `T`.

use crate::common::builder::instruction::{InstructionBuilder, NOP, fp_op};
use crate::common::harness::TestContext;
use i860_core::core::pipeline::Unit;

const R2P1: u32 = 0;
const R2PT: u32 = 1;
const R2AP1: u32 = 2;

fn pfam(dpc: u32, fdest: u32, fsrc1: u32, fsrc2: u32) -> u32 {
    InstructionBuilder::new()
        .dual(fp_op::PFAM, dpc, fdest, fsrc1, fsrc2)
        .build()
}

fn pfsm(dpc: u32, fdest: u32, fsrc1: u32, fsrc2: u32) -> u32 {
    InstructionBuilder::new()
        .dual(fp_op::PFSM, dpc, fdest, fsrc1, fsrc2)
        .build()
}

/// Loads `KR = 2.0` and starts `KR * 3.0` in the multiplier, then idles until
/// the product is leaving it.
fn primed(second: u32) -> TestContext {
    let mut ctx = TestContext::new().program(&[
        pfam(R2PT, 10, 2, 3),
        NOP,
        NOP,
        second,
        NOP,
        NOP,
        NOP,
    ]);
    ctx.set_f32(2, 2.0);
    ctx.set_f32(3, 3.0);
    ctx.set_f32(5, 1.0);
    ctx.set_f32(6, 10.0);
    ctx
}

#[test]
fn r2pt_loads_kr_from_src1() {
    let mut ctx = primed(NOP);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.special.kr, u64::from(2.0f32.to_bits()));
    assert!(!ctx.cpu.pipelines.get(Unit::Multiplier).is_empty());
    assert!(!ctx.cpu.pipelines.get(Unit::Adder).is_empty());
}

#[test]
fn pfam_adds_src1_to_retiring_product() {
    let mut ctx = primed(pfam(R2P1, 8, 5, 3));
    ctx.step_n(4);
    // The first adder result (T + MPIPE, both zero) landed in f10.
    assert_eq!(ctx.get_f32(10), 0.0);
    assert_eq!(ctx.get_f32(8), 0.0);
    ctx.step_n(3);
    assert_eq!(ctx.get_f32(8), 7.0);
}

#[test]
fn pfsm_subtracts_retiring_product() {
    let mut ctx = primed(pfsm(R2P1, 8, 6, 3));
    ctx.step_n(7);
    assert_eq!(ctx.get_f32(8), 4.0);
}

#[test]
fn r2ap1_loads_t_from_multiplier() {
    let mut ctx = primed(pfam(R2AP1, 8, 5, 3));
    ctx.step_n(4);
    assert_eq!(ctx.cpu.special.t, u64::from(6.0f32.to_bits()));
}

#[test]
fn paths_without_k_load_keep_kr() {
    let mut ctx = TestContext::new().program(&[pfam(R2P1, 8, 5, 3)]);
    ctx.set_f32(5, 9.0);
    ctx.cpu.special.kr = u64::from(1.5f32.to_bits());
    ctx.step_n(1);
    assert_eq!(ctx.cpu.special.kr, u64::from(1.5f32.to_bits()));
}
