//! Bus Traffic Tests.
//!
//! These run the core against a mocked bus to pin down exactly which bus
//! calls a data access makes: byte accesses in little-endian mode, native
//! word accesses in big-endian mode, and none at all when the access faults.

use crate::common::builder::instruction::{FpWidth, InstructionBuilder};
use crate::common::harness::PROGRAM_BASE;
use crate::common::mocks::bus::{MockSystemBus, program_bus};
use i860_core::common::TrapClass;
use i860_core::config::GeneralConfig;
use i860_core::soc::IrqLine;
use i860_core::{Config, Cpu, StepOutcome};
use mockall::predicate::eq;

const DATA: u32 = 0x2000;

fn core(bus: MockSystemBus) -> Cpu<MockSystemBus> {
    let config = Config {
        general: GeneralConfig {
            start_pc: Some(PROGRAM_BASE),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    let mut cpu = Cpu::new(bus, &config);
    cpu.regs.write(4, 0x1122_3344);
    cpu.regs.write(5, DATA);
    cpu
}

#[test]
fn misaligned_store_never_reaches_bus() {
    let st = InstructionBuilder::new().st_l(4, 0, 6).build();
    let mut bus = program_bus(PROGRAM_BASE, &[st]);
    bus.expect_write_u8().never();
    bus.expect_write_u32().never();
    let mut cpu = core(bus);
    cpu.regs.write(6, DATA + 1);
    assert_eq!(cpu.step(), StepOutcome::TrapTaken(TrapClass::DataAccess));
}

#[test]
fn breakpointed_store_never_reaches_bus() {
    let st = InstructionBuilder::new().st_l(4, 0, 5).build();
    let mut bus = program_bus(PROGRAM_BASE, &[st]);
    bus.expect_write_u8().never();
    let mut cpu = core(bus);
    cpu.ctrl.db = DATA;
    cpu.ctrl.psr.set_bw(true);
    assert_eq!(cpu.step(), StepOutcome::TrapTaken(TrapClass::DataAccess));
}

#[test]
fn little_endian_store_writes_bytes() {
    let st = InstructionBuilder::new().st_l(4, 8, 5).build();
    let mut bus = program_bus(PROGRAM_BASE, &[st]);
    for (i, byte) in [0x44u8, 0x33, 0x22, 0x11].into_iter().enumerate() {
        bus.expect_write_u8()
            .with(eq(DATA + 8 + i as u32), eq(byte))
            .times(1)
            .return_const(());
    }
    bus.expect_write_u32().never();
    let mut cpu = core(bus);
    assert_eq!(cpu.step(), StepOutcome::Executed);
}

#[test]
fn big_endian_store_uses_word_access() {
    let st = InstructionBuilder::new().st_l(4, 8, 5).build();
    let mut bus = program_bus(PROGRAM_BASE, &[st]);
    bus.expect_write_u32()
        .with(eq(DATA + 8), eq(0x1122_3344))
        .times(1)
        .return_const(());
    bus.expect_write_u8().never();
    let mut cpu = core(bus);
    cpu.ctrl.epsr.set_be(true);
    assert_eq!(cpu.step(), StepOutcome::Executed);
}

#[test]
fn big_endian_double_load_reads_high_word_first() {
    let fld = InstructionBuilder::new()
        .fld(FpWidth::Double, 4, 0, 5, false)
        .build();
    let mut bus = program_bus(PROGRAM_BASE, &[fld]);
    bus.expect_read_u32()
        .with(eq(DATA))
        .times(1)
        .return_const(0x4004_0000u32);
    bus.expect_read_u32()
        .with(eq(DATA + 4))
        .times(1)
        .return_const(0u32);
    let mut cpu = core(bus);
    cpu.ctrl.epsr.set_be(true);
    assert_eq!(cpu.step(), StepOutcome::Executed);
    assert_eq!(f64::from_bits(cpu.regs.read_f64(4)), 2.5);
}

#[test]
fn polled_interrupt_is_taken() {
    let mut bus = MockSystemBus::new();
    // Word zero is `ld.b r0(r0), r0`, harmless.
    bus.expect_read_u8().return_const(0u8);
    bus.expect_poll_interrupts()
        .with(eq(1))
        .times(1)
        .return_const(IrqLine::Asserted);
    let mut cpu = core(bus);
    cpu.ctrl.psr.set_im(true);
    assert_eq!(cpu.step(), StepOutcome::TrapTaken(TrapClass::External));
    assert_eq!(cpu.ctrl.fir, PROGRAM_BASE + 4);
}
