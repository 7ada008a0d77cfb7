//! Trap and delay-slot state.
//!
//! This module holds the pending-trap state machine consulted by the
//! execution driver. It performs the following:
//! 1. **Classification:** Records whether a pending trap is synchronous, was
//!    raised from a delay slot, or came from the external interrupt line.
//! 2. **Latching:** Keeps the external interrupt latched while a synchronous
//!    trap owns the vector, so both trap bits are reported together.
//! 3. **FIR Selection:** Chooses between the faulting instruction's address and
//!    the resume address when the trap is delivered.
//! 4. **FIR Indicator:** Tracks whether `fir` still holds a trap address for `ld.c`.

use crate::common::error::{Trap, TrapClass};

/// What kind of trap is waiting to be vectored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingTrap {
    /// Nothing pending.
    #[default]
    None,
    /// Synchronous fault from an ordinary instruction.
    Normal,
    /// Synchronous fault from the instruction in a branch's delay slot.
    InDelaySlot,
    /// External interrupt with no synchronous fault alongside it.
    External,
}

/// A trap resolved for delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrapDelivery {
    /// The state the controller was in when the trap was taken.
    pub kind: PendingTrap,
    /// Value to place in `fir`.
    pub fir: u32,
    /// Class of the synchronous fault, if any.
    pub class: Option<TrapClass>,
    /// Whether the external interrupt was latched as well.
    pub external: bool,
}

impl TrapDelivery {
    /// The class reported to the caller of `step()`; a synchronous fault wins.
    pub fn primary_class(&self) -> TrapClass {
        self.class.unwrap_or(TrapClass::External)
    }
}

/// Pending-trap state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrapController {
    pending: PendingTrap,
    class: Option<TrapClass>,
    fault_addr: u32,
    external_latched: bool,
    fir_gets_trap_addr: bool,
}

impl TrapController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to the reset state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current pending state.
    pub const fn pending(&self) -> PendingTrap {
        self.pending
    }

    /// Whether any trap is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.pending != PendingTrap::None
    }

    /// Whether the external interrupt has been latched.
    pub const fn external_latched(&self) -> bool {
        self.external_latched
    }

    /// Records a trap raised while executing the instruction at `insn_addr`.
    ///
    /// # Arguments
    ///
    /// * `trap`          - The trap returned by the instruction handler.
    /// * `insn_addr`     - Address of the instruction that raised it.
    /// * `in_delay_slot` - Whether that instruction occupied a delay slot.
    pub fn raise(&mut self, trap: &Trap, insn_addr: u32, in_delay_slot: bool) {
        if matches!(trap, Trap::External) {
            self.latch_external();
            return;
        }
        match self.pending {
            PendingTrap::None | PendingTrap::External => {
                self.pending = if in_delay_slot {
                    PendingTrap::InDelaySlot
                } else {
                    PendingTrap::Normal
                };
                self.class = Some(trap.class());
                self.fault_addr = insn_addr;
            }
            PendingTrap::Normal | PendingTrap::InDelaySlot => {
                debug_assert!(false, "second synchronous trap {trap} before delivery");
            }
        }
    }

    /// Latches the external interrupt. A pending synchronous trap keeps the vector.
    pub fn latch_external(&mut self) {
        self.external_latched = true;
        if self.pending == PendingTrap::None {
            self.pending = PendingTrap::External;
        }
    }

    /// Resolves the pending trap and returns to `None`.
    ///
    /// # Arguments
    ///
    /// * `next_pc` - Address execution would have resumed at; becomes `fir`
    ///   for an external interrupt.
    ///
    /// # Returns
    ///
    /// The delivery to apply, or `None` if nothing was pending.
    pub fn take(&mut self, next_pc: u32) -> Option<TrapDelivery> {
        let fir = match self.pending {
            PendingTrap::None => return None,
            PendingTrap::Normal | PendingTrap::InDelaySlot => self.fault_addr,
            PendingTrap::External => next_pc,
        };
        let delivery = TrapDelivery {
            kind: self.pending,
            fir,
            class: self.class,
            external: self.external_latched,
        };
        self.pending = PendingTrap::None;
        self.class = None;
        self.external_latched = false;
        self.fir_gets_trap_addr = true;
        Some(delivery)
    }

    /// Whether `fir` still holds the address captured by the last trap.
    pub const fn fir_gets_trap_addr(&self) -> bool {
        self.fir_gets_trap_addr
    }

    /// Clears the FIR indicator (first `ld.c fir` after a trap, or `bri` out of a handler).
    pub fn clear_fir_indicator(&mut self) {
        self.fir_gets_trap_addr = false;
    }
}
