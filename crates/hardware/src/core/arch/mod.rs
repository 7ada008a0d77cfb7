//! i860 architectural state.
//!
//! This module contains the storage side of the core. It includes the following modules:
//! 1. **Control Registers:** `fir`, `psr`, `dirbase`, `db`, `fsr`, `epsr` and their bitfields.
//! 2. **FPRs:** Floating-point register file with single/double/quad aliasing.
//! 3. **GPRs:** Integer register file.
//! 4. **Special Registers:** `KR`, `KI`, `T` and `MERGE`.
//! 5. **Traps:** Pending-trap and delay-slot state machine.

/// Control register definitions and store rules.
pub mod control;

/// Floating-point register file implementation.
pub mod fpr;

/// Integer register file implementation.
pub mod gpr;

/// Floating-point special registers.
pub mod special;

/// Pending-trap state machine.
pub mod trap;
