//! External Interrupt and Pin Tests.
//!
//! The bus reports interrupt line changes when polled. A raised line is
//! recognised while `PSR.IM` is set and no delayed branch is outstanding.

use crate::common::builder::instruction::{InstructionBuilder, NOP};
use crate::common::harness::{PROGRAM_BASE, TestContext};
use i860_core::common::{TRAP_VECTOR, TrapClass};
use i860_core::config::InterruptConfig;
use i860_core::{Config, Pin, StepOutcome};

fn interruptible(program: &[u32]) -> TestContext {
    let mut ctx = TestContext::new().program(program);
    ctx.cpu.ctrl.psr.set_im(true);
    ctx
}

#[test]
fn raised_line_vectors_with_resume_address() {
    let mut ctx = interruptible(&[NOP, NOP]);
    ctx.cpu.bus_mut().set_irq(true);

    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::External));
    assert_eq!(ctx.cpu.pc, TRAP_VECTOR);
    assert_eq!(ctx.cpu.ctrl.fir, PROGRAM_BASE + 4);
    assert!(ctx.cpu.ctrl.psr.interrupt());
    assert!(ctx.cpu.ctrl.epsr.int());
    assert!(!ctx.cpu.ctrl.psr.im());
    assert_eq!(ctx.cpu.stats.instructions, 1, "the interrupted instruction completed");
    assert_eq!(ctx.cpu.stats.traps.external, 1);
}

#[test]
fn masked_line_is_ignored() {
    let mut ctx = TestContext::new().program(&[NOP, NOP]);
    ctx.cpu.bus_mut().set_irq(true);
    ctx.step_n(2);
    assert!(ctx.cpu.ctrl.epsr.int());
    assert!(!ctx.cpu.ctrl.psr.interrupt());
}

#[test]
fn lowered_line_clears_epsr_int() {
    let mut ctx = TestContext::new().program(&[NOP, NOP]);
    ctx.cpu.bus_mut().set_irq(true);
    ctx.step_n(1);
    ctx.cpu.bus_mut().set_irq(false);
    ctx.step_n(1);
    assert!(!ctx.cpu.ctrl.epsr.int());
}

#[test]
fn host_raised_interrupt() {
    let mut ctx = interruptible(&[NOP]);
    ctx.cpu.gen_interrupt();
    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::External));
}

#[test]
fn interrupt_waits_for_delay_slot() {
    let br = InstructionBuilder::new().br(2).build();
    let mut ctx = interruptible(&[br, NOP]);
    ctx.cpu.bus_mut().set_irq(true);

    assert_eq!(ctx.step(), StepOutcome::Executed);
    assert!(ctx.cpu.delayed.is_some());
    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::External));
    assert_eq!(ctx.cpu.ctrl.fir, PROGRAM_BASE + 12, "resumes at the branch target");
}

#[test]
fn synchronous_trap_owns_fir_and_both_bits_are_set() {
    let trap = InstructionBuilder::new().trap().build();
    let mut ctx = interruptible(&[trap]);
    ctx.cpu.bus_mut().set_irq(true);

    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::InstructionFault));
    assert_eq!(ctx.cpu.ctrl.fir, PROGRAM_BASE);
    assert!(ctx.cpu.ctrl.psr.it());
    assert!(ctx.cpu.ctrl.psr.interrupt());
    assert_eq!(ctx.cpu.stats.traps.total(), 2);
}

#[test]
fn poll_interval_spaces_out_polls() {
    let config = Config {
        interrupts: InterruptConfig { poll_interval: 3 },
        ..Config::default()
    };
    let mut ctx = TestContext::with_config(&config).program(&[NOP; 4]);
    ctx.cpu.ctrl.psr.set_im(true);
    ctx.cpu.bus_mut().set_irq(true);

    ctx.step_n(2);
    assert!(!ctx.cpu.ctrl.epsr.int());
    assert_eq!(ctx.step(), StepOutcome::TrapTaken(TrapClass::External));
}

#[test]
fn zero_poll_interval_never_polls() {
    let config = Config {
        interrupts: InterruptConfig { poll_interval: 0 },
        ..Config::default()
    };
    let mut ctx = TestContext::with_config(&config).program(&[NOP; 4]);
    ctx.cpu.ctrl.psr.set_im(true);
    ctx.cpu.bus_mut().set_irq(true);
    ctx.step_n(4);
    assert!(!ctx.cpu.ctrl.epsr.int());
}

#[test]
fn bus_hold_suspends_execution() {
    let mut ctx = TestContext::new().program(&[NOP, NOP]);
    ctx.cpu.set_pin(Pin::BusHold, true);
    assert!(ctx.cpu.pin(Pin::BusHold));

    assert_eq!(ctx.step(), StepOutcome::Held);
    assert_eq!(ctx.cpu.run(10), 0);
    assert_eq!(ctx.cpu.pc, PROGRAM_BASE);
    assert_eq!(ctx.cpu.stats.bus_hold_stalls, 2);
    assert_eq!(ctx.cpu.stats.cycles, 0);

    ctx.cpu.set_pin(Pin::BusHold, false);
    assert_eq!(ctx.cpu.run(2), 2);
}

#[test]
fn reset_pin_resets_and_holds() {
    let addu = InstructionBuilder::new().addu_imm(4, 3, 0).build();
    let mut ctx = TestContext::new().program(&[addu, addu]);
    ctx.step_n(1);
    assert_eq!(ctx.get_reg(4), 3);

    ctx.cpu.set_pin(Pin::Reset, true);
    assert_eq!(ctx.get_reg(4), 0);
    assert_eq!(ctx.cpu.pc, PROGRAM_BASE);
    assert_eq!(ctx.step(), StepOutcome::Held);

    ctx.cpu.set_pin(Pin::Reset, false);
    assert_eq!(ctx.step(), StepOutcome::Executed);
    assert_eq!(ctx.get_reg(4), 3);
}
