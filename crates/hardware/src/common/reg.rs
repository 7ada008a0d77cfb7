//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which acts as a unified interface for
//! the integer and floating-point register banks. It provides:
//! 1. **Unified Storage:** Combined storage for `r0`-`r31` and `f0`-`f31`.
//! 2. **Width Aliasing:** Single, double and quad views of the floating-point words.
//! 3. **Observability:** Raw word access for snapshots and tracing.

use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// Unified register file containing both integer and floating-point registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    fpr: Fpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an integer register. `r0` always returns 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        self.gpr.read(idx)
    }

    /// Writes an integer register. Writes to `r0` are ignored.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        self.gpr.write(idx, val);
    }

    /// Reads a single-precision floating-point register as raw bits.
    #[inline]
    pub fn read_f32(&self, idx: usize) -> u32 {
        self.fpr.read_single(idx)
    }

    /// Writes a single-precision floating-point register from raw bits.
    #[inline]
    pub fn write_f32(&mut self, idx: usize, val: u32) {
        self.fpr.write_single(idx, val);
    }

    /// Reads the double-precision pair containing `idx` as raw bits.
    #[inline]
    pub fn read_f64(&self, idx: usize) -> u64 {
        self.fpr.read_double(idx)
    }

    /// Writes the double-precision pair containing `idx` from raw bits.
    #[inline]
    pub fn write_f64(&mut self, idx: usize, val: u64) {
        self.fpr.write_double(idx, val);
    }

    /// Reads the 128-bit quad containing `idx`.
    #[inline]
    pub fn read_quad(&self, idx: usize) -> u128 {
        self.fpr.read_quad(idx)
    }

    /// Writes the 128-bit quad containing `idx`.
    #[inline]
    pub fn write_quad(&mut self, idx: usize, val: u128) {
        self.fpr.write_quad(idx, val);
    }

    /// Integer register bank, for bulk inspection.
    pub const fn gpr(&self) -> &Gpr {
        &self.gpr
    }

    /// Floating-point register bank, for bulk inspection.
    pub const fn fpr(&self) -> &Fpr {
        &self.fpr
    }
}
