use i860_core::core::arch::control::{
    ControlReg, ControlRegs, DIRBASE_ITI, EPSR_RESET, PSR_TRAP_MASK,
};
use pretty_assertions::assert_eq;

#[test]
fn reset_values() {
    let regs = ControlRegs::new();
    assert_eq!(regs.read(ControlReg::Epsr), EPSR_RESET);
    assert_eq!(regs.read(ControlReg::Psr), 0);
    assert_eq!(regs.read(ControlReg::Dirbase), 0);
    assert_eq!(regs.read(ControlReg::Fsr), 0);
}

#[test]
fn creg_numbers() {
    assert_eq!(ControlReg::from_index(0), Some(ControlReg::Fir));
    assert_eq!(ControlReg::from_index(5), Some(ControlReg::Epsr));
    assert_eq!(ControlReg::from_index(6), None);
    assert_eq!(ControlReg::from_index(7), None);
}

#[test]
fn user_psr_store_keeps_supervisor_bits() {
    let mut regs = ControlRegs::new();
    regs.psr.set_user(true);
    let changed = regs.store(ControlReg::Psr, 0xFFFF_FFFF, true);
    assert!(changed);
    // CC, LCC and the SC/PS/PM fields are user-writable.
    assert!(regs.psr.cc() && regs.psr.lcc());
    assert_eq!(regs.psr.pm(), 0xFF);
    assert!(!regs.psr.im());
    assert!(regs.psr.user());
    assert_eq!(regs.psr.trap_bits(), 0);
}

#[test]
fn supervisor_psr_store_clears_but_never_sets_trap_bits() {
    let mut regs = ControlRegs::new();
    regs.psr.set_it(true);
    let _ = regs.store(ControlReg::Psr, PSR_TRAP_MASK, false);
    assert!(regs.psr.it());
    assert!(!regs.psr.dat());
    let _ = regs.store(ControlReg::Psr, 0, false);
    assert_eq!(regs.psr.trap_bits(), 0);
}

#[test]
fn user_cannot_write_dirbase_or_db() {
    let mut regs = ControlRegs::new();
    assert!(!regs.store(ControlReg::Dirbase, 0x1000_0001, true));
    assert!(!regs.store(ControlReg::Db, 0x40, true));
    assert_eq!(regs.dirbase.0, 0);
    assert_eq!(regs.db, 0);
}

#[test]
fn dirbase_drops_iti() {
    let mut regs = ControlRegs::new();
    assert!(regs.store(ControlReg::Dirbase, 0x0001_0000 | DIRBASE_ITI | 1, false));
    assert_eq!(regs.dirbase.0, 0x0001_0001);
    assert!(regs.dirbase.ate());
    assert_eq!(regs.dirbase.dtb(), 0x0001_0000);
}

#[test]
fn fir_is_not_writable() {
    let mut regs = ControlRegs::new();
    assert!(!regs.store(ControlReg::Fir, 0x1234, false));
    assert_eq!(regs.fir, 0);
}

#[test]
fn fsr_store_is_unrestricted() {
    let mut regs = ControlRegs::new();
    let _ = regs.store(ControlReg::Fsr, 0b10_0001, true);
    assert!(regs.fsr.fz());
    assert!(regs.fsr.fte());
}
