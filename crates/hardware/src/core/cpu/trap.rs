//! Trap Handling Logic.
//!
//! This module vectors a resolved trap. It performs the following:
//! 1. **Context Saving:** Copies `PSR.U`/`PSR.IM` into `PU`/`PIM` and drops to
//!    supervisor mode with interrupts masked.
//! 2. **Reporting:** Sets the `PSR` trap bit for the fault class and, when the
//!    external line was latched alongside, `PSR.IN` as well.
//! 3. **Redirection:** Loads `fir`, discards any outstanding delayed branch and
//!    sends the next fetch to the trap vector.

use super::Cpu;
use crate::common::TRAP_VECTOR;
use crate::common::error::TrapClass;
use crate::core::arch::trap::TrapDelivery;
use crate::soc::traits::Bus;

impl<B: Bus> Cpu<B> {
    /// Applies a trap delivery produced by the trap controller.
    ///
    /// # Arguments
    ///
    /// * `delivery` - The resolved trap: its kind, `fir` value and classes.
    pub fn deliver_trap(&mut self, delivery: &TrapDelivery) {
        let psr = &mut self.ctrl.psr;
        let (user, im) = (psr.user(), psr.im());
        psr.set_prev_user(user);
        psr.set_pim(im);
        psr.set_user(false);
        psr.set_im(false);
        psr.set_dim(false);
        psr.set_ds(false);

        if let Some(class) = delivery.class {
            psr.raise(class);
            self.stats.record_trap(class);
        }
        if delivery.external {
            psr.raise(TrapClass::External);
            self.stats.record_trap(TrapClass::External);
        }

        self.ctrl.fir = delivery.fir;
        self.delayed = None;
        self.pc = TRAP_VECTOR;

        tracing::debug!(
            kind = ?delivery.kind,
            class = ?delivery.primary_class(),
            external = delivery.external,
            fir = delivery.fir,
            vector = TRAP_VECTOR,
            "trap"
        );
    }
}
