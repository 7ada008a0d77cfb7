//! i860 Integer Register File.
//!
//! This module implements the integer register bank. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`r0`-`r31`).
//! 2. **Invariant Enforcement:** Ensures that register `r0` is hardwired to zero.

use crate::common::constants::NUM_GPRS;

/// Integer register file. Register `r0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_GPRS],
}

impl Gpr {
    /// Creates a new integer register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an integer register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `r0` always returns 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to an integer register. Writes to `r0` are dropped.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Iterates all 32 registers in index order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..NUM_GPRS).map(|i| self.read(i))
    }
}
