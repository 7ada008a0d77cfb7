//! Statistics Tests.
//!
//! Counters are driven by running short programs, then checked through the
//! struct fields, the JSON report and the text report.

use crate::common::builder::instruction::{FpWidth, InstructionBuilder, NOP, fp_op};
use crate::common::harness::TestContext;
use i860_core::stats::SimStats;

fn mixed_program() -> Vec<u32> {
    vec![
        InstructionBuilder::new().addu_imm(4, 1, 0).build(),
        InstructionBuilder::new()
            .fld(FpWidth::Long, 4, 0, 5, false)
            .build(),
        InstructionBuilder::new().st_l(4, 4, 5).build(),
        InstructionBuilder::new().fadd(6, 4, 4).pipelined().build(),
        InstructionBuilder::new().fp(fp_op::FORM, 8, 2, 0).build(),
        InstructionBuilder::new().ld_c(5, 7).build(),
        InstructionBuilder::new().br(0).build(),
        NOP,
    ]
}

fn run_mixed() -> TestContext {
    let mut ctx = TestContext::new().program(&mixed_program());
    ctx.set_reg(5, 0x2000);
    ctx.step_n(8);
    ctx
}

#[test]
fn instruction_mix_by_category() {
    let stats = run_mixed().cpu.stats;
    assert_eq!(stats.instructions, 8);
    assert_eq!(stats.cycles, 8);
    assert_eq!(stats.inst_integer, 2, "addu and the nop");
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_fp, 1);
    assert_eq!(stats.inst_graphics, 1);
    assert_eq!(stats.inst_control, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.retired_adder, 1);
}

#[test]
fn traps_counted_per_class() {
    let trap = InstructionBuilder::new().trap().build();
    let ld = InstructionBuilder::new().ld_l(4, 0, 5).build();
    let mut ctx = TestContext::new().program(&[trap]);
    let _ = ctx.step();
    ctx = ctx.program(&[ld]);
    ctx.set_reg(5, 2);
    let _ = ctx.step();

    let traps = ctx.cpu.stats.traps;
    assert_eq!(traps.instruction_fault, 1);
    assert_eq!(traps.data_access, 1);
    assert_eq!(traps.total(), 2);
    assert_eq!(ctx.cpu.stats.instructions, 0);
    assert_eq!(ctx.cpu.stats.cycles, 2);
}

#[test]
fn json_report_carries_every_counter() {
    let stats = run_mixed().cpu.stats;
    let json: serde_json::Value = serde_json::from_str(&stats.to_json()).unwrap();
    assert_eq!(json["instructions"], 8);
    assert_eq!(json["inst_graphics"], 1);
    assert_eq!(json["traps"]["external"], 0);
    assert_eq!(json["retired_adder"], 1);
}

#[test]
fn text_report_lists_sections() {
    let report = run_mixed().cpu.stats.to_string();
    assert!(report.contains("CORE STATISTICS"));
    assert!(report.lines().any(|l| l.starts_with("core.instructions") && l.ends_with(" 8")));
    assert!(report.contains("traps.total"));
    assert!(report.ends_with(&format!("pins.bus_hold_stalls     {:>12}", 0)));
}

#[test]
fn default_is_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.traps.total(), 0);
    assert_eq!(stats.instructions, 0);
}
