//! Bus trait for the core's external address space.
//!
//! This module defines the `Bus` trait the core is generic over. It provides:
//! 1. **Access:** Byte reads and writes (required) plus big-endian halfword and word
//!    accessors built from them, which a backing store may override with native versions.
//! 2. **Interrupts:** A polling hook returning changes on the external interrupt line.
//!
//! The core never touches storage directly; whatever answers these calls (RAM, MMIO,
//! peripheral registers) is the embedder's business.

/// Change reported on the external interrupt line by [`Bus::poll_interrupts`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IrqLine {
    /// No change since the last poll.
    #[default]
    Unchanged,
    /// The line was asserted.
    Asserted,
    /// The line was deasserted.
    Deasserted,
}

/// The flat 32-bit physical address space seen by the core.
///
/// Multi-byte provided methods are big-endian, matching the processor's
/// native byte order when `EPSR.BE` is set. The core assembles
/// little-endian values from byte accesses itself.
pub trait Bus {
    /// Reads one byte.
    fn read_u8(&mut self, addr: u32) -> u8;

    /// Writes one byte.
    fn write_u8(&mut self, addr: u32, val: u8);

    /// Reads a big-endian halfword.
    fn read_u16(&mut self, addr: u32) -> u16 {
        u16::from_be_bytes([self.read_u8(addr), self.read_u8(addr.wrapping_add(1))])
    }

    /// Reads a big-endian word.
    fn read_u32(&mut self, addr: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.read_u8(addr.wrapping_add(i as u32));
        }
        u32::from_be_bytes(bytes)
    }

    /// Writes a big-endian halfword.
    fn write_u16(&mut self, addr: u32, val: u16) {
        for (i, b) in val.to_be_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), b);
        }
    }

    /// Writes a big-endian word.
    fn write_u32(&mut self, addr: u32, val: u32) {
        for (i, b) in val.to_be_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), b);
        }
    }

    /// Processes pending interrupt sources.
    ///
    /// Called by the execution driver every `interrupts.poll_interval` steps.
    ///
    /// # Arguments
    ///
    /// * `host_cycles` - Cycles elapsed since the previous poll.
    fn poll_interrupts(&mut self, host_cycles: u64) -> IrqLine {
        let _ = host_cycles;
        IrqLine::Unchanged
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn read_u8(&mut self, addr: u32) -> u8 {
        (**self).read_u8(addr)
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        (**self).write_u8(addr, val);
    }

    fn read_u16(&mut self, addr: u32) -> u16 {
        (**self).read_u16(addr)
    }

    fn read_u32(&mut self, addr: u32) -> u32 {
        (**self).read_u32(addr)
    }

    fn write_u16(&mut self, addr: u32, val: u16) {
        (**self).write_u16(addr, val);
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        (**self).write_u32(addr, val);
    }

    fn poll_interrupts(&mut self, host_cycles: u64) -> IrqLine {
        (**self).poll_interrupts(host_cycles)
    }
}

impl<B: Bus + ?Sized> Bus for Box<B> {
    fn read_u8(&mut self, addr: u32) -> u8 {
        (**self).read_u8(addr)
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        (**self).write_u8(addr, val);
    }

    fn read_u16(&mut self, addr: u32) -> u16 {
        (**self).read_u16(addr)
    }

    fn read_u32(&mut self, addr: u32) -> u32 {
        (**self).read_u32(addr)
    }

    fn write_u16(&mut self, addr: u32, val: u16) {
        (**self).write_u16(addr, val);
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        (**self).write_u32(addr, val);
    }

    fn poll_interrupts(&mut self, host_cycles: u64) -> IrqLine {
        (**self).poll_interrupts(host_cycles)
    }
}
