//! i860 Floating-Point Register File.
//!
//! This module implements the floating-point register bank. It performs the following:
//! 1. **Storage:** Maintains 32 single-precision words (`f0`-`f31`), 128 bytes in total.
//! 2. **Width Aliasing:** Exposes the same words as 16 doubles and 8 quads.
//! 3. **Invariant Enforcement:** `f0` and `f1` read as zero and ignore writes.
//!
//! A double-precision operand named by register `N` occupies the even/odd
//! pair `N & !1` (low word) and `N | 1` (high word). A quad occupies the four
//! words starting at `N & !3`, lowest word least significant. Wider accessors
//! only touch the words they cover, so a double write never disturbs its
//! neighbours.

use crate::common::constants::NUM_FPRS;

/// Floating-point register file stored as 32-bit words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    words: [u32; NUM_FPRS],
}

impl Fpr {
    /// Creates a new floating-point register file with every word zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one 32-bit word. `f0` and `f1` always return 0.
    #[inline]
    pub fn read_single(&self, idx: usize) -> u32 {
        if idx < 2 { 0 } else { self.words[idx] }
    }

    /// Writes one 32-bit word. Writes to `f0` and `f1` are dropped.
    #[inline]
    pub fn write_single(&mut self, idx: usize, val: u32) {
        if idx >= 2 {
            self.words[idx] = val;
        }
    }

    /// Reads the double-precision pair containing `idx`.
    ///
    /// # Returns
    ///
    /// `(f[idx|1] << 32) | f[idx&!1]`.
    #[inline]
    pub fn read_double(&self, idx: usize) -> u64 {
        let lo = self.read_single(idx & !1);
        let hi = self.read_single(idx | 1);
        (u64::from(hi) << 32) | u64::from(lo)
    }

    /// Writes the double-precision pair containing `idx`.
    #[inline]
    pub fn write_double(&mut self, idx: usize, val: u64) {
        self.write_single(idx & !1, val as u32);
        self.write_single(idx | 1, (val >> 32) as u32);
    }

    /// Reads the quad containing `idx` (four consecutive words, low first).
    pub fn read_quad(&self, idx: usize) -> u128 {
        let base = idx & !3;
        (0..4).fold(0u128, |acc, i| acc | (u128::from(self.read_single(base + i)) << (32 * i)))
    }

    /// Writes the quad containing `idx`.
    pub fn write_quad(&mut self, idx: usize, val: u128) {
        let base = idx & !3;
        for i in 0..4 {
            self.write_single(base + i, (val >> (32 * i)) as u32);
        }
    }

    /// Iterates all 32 words in index order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..NUM_FPRS).map(|i| self.read_single(i))
    }
}
