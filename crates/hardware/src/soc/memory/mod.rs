//! Flat RAM device.
//!
//! This module implements a simple backing store for the [`Bus`] trait. It provides:
//! 1. **Storage:** A byte vector mapped at a physical base address.
//! 2. **Open Bus:** Reads outside the mapped window return zero; writes are dropped.
//! 3. **Interrupt Line:** A host-driven interrupt level reported through `poll_interrupts`.

use crate::soc::traits::{Bus, IrqLine};

/// Byte-addressed RAM window.
#[derive(Clone, Debug)]
pub struct Ram {
    data: Vec<u8>,
    base: u32,
    irq_level: bool,
    irq_reported: bool,
}

impl Ram {
    /// Creates a zero-filled RAM window.
    ///
    /// # Arguments
    ///
    /// * `base` - Physical address of the first byte.
    /// * `size` - Size of the window in bytes.
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            data: vec![0; size],
            base,
            irq_level: false,
            irq_reported: false,
        }
    }

    /// Physical address of the first byte.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Size of the window in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, addr: u32) -> Option<usize> {
        let off = addr.wrapping_sub(self.base) as usize;
        (off < self.data.len()).then_some(off)
    }

    /// Copies `bytes` into RAM starting at `addr`; bytes outside the window are dropped.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), *b);
        }
    }

    /// Stores instruction words little-endian, the byte order the core fetches in.
    pub fn load_words(&mut self, addr: u32, words: &[u32]) {
        for (i, w) in words.iter().enumerate() {
            self.load(addr.wrapping_add(4 * i as u32), &w.to_le_bytes());
        }
    }

    /// Drives the external interrupt line level seen by the next poll.
    pub const fn set_irq(&mut self, level: bool) {
        self.irq_level = level;
    }
}

impl Bus for Ram {
    fn read_u8(&mut self, addr: u32) -> u8 {
        self.offset(addr).map_or(0, |off| self.data[off])
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        if let Some(off) = self.offset(addr) {
            self.data[off] = val;
        } else {
            tracing::trace!("write to {addr:#010x} outside RAM dropped");
        }
    }

    fn poll_interrupts(&mut self, _host_cycles: u64) -> IrqLine {
        if self.irq_level == self.irq_reported {
            return IrqLine::Unchanged;
        }
        self.irq_reported = self.irq_level;
        if self.irq_level {
            IrqLine::Asserted
        } else {
            IrqLine::Deasserted
        }
    }
}
