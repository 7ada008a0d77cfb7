//! Register Snapshot Tests.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;
use i860_core::core::cpu::Snapshot;
use pretty_assertions::assert_eq;

#[test]
fn delta_lists_changed_registers_in_order() {
    let addu = InstructionBuilder::new().addu_imm(4, 5, 0).build();
    let mut ctx = TestContext::new().program(&[addu]);
    let before = ctx.cpu.snapshot();
    ctx.step_n(1);
    let after = ctx.cpu.snapshot();

    assert_eq!(
        Snapshot::delta(&before, &after),
        "pc: 0x00001000 -> 0x00001004\nr4: 0x00000000 -> 0x00000005\n"
    );
    assert_eq!(Snapshot::delta(&after, &after), "");
}

#[test]
fn get_reads_by_name() {
    let mut ctx = TestContext::new();
    ctx.set_reg(7, 0xCAFE);
    ctx.set_f32(3, 1.0);
    let snap = ctx.cpu.snapshot();

    assert_eq!(snap.get("r7"), Ok(0xCAFE));
    assert_eq!(snap.get("f3"), Ok(1.0f32.to_bits()));
    assert_eq!(snap.get("epsr"), Ok(0x0004_0701));
    assert_eq!(
        snap.get("r99").map_err(|e| e.to_string()),
        Err("unknown register `r99`".to_string())
    );
}

#[test]
fn snapshot_does_not_disturb_core() {
    let ctx = TestContext::new();
    let a = ctx.cpu.snapshot();
    let b = ctx.cpu.snapshot();
    assert_eq!(a, b);
    assert!(ctx.cpu.pipelines.is_empty());
}

#[test]
fn serializes_to_json() {
    let mut ctx = TestContext::new();
    ctx.set_reg(2, 42);
    let json = serde_json::to_value(ctx.cpu.snapshot()).unwrap();
    assert_eq!(json["r"][2], 42);
    assert_eq!(json["epsr"], 0x0004_0701);
}
