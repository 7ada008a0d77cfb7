//! Memory Access Helpers.
//!
//! This module provides the interface between the CPU and the bus. It performs the following:
//! 1. **Address Translation:** Interfaces with the MMU to convert virtual to physical addresses.
//! 2. **Checks:** Alignment and data breakpoints are tested before the bus is touched.
//! 3. **Byte Order:** Data accesses follow `EPSR.BE`; instruction fetch is always little-endian.
//!
//! Every access is aligned to its size, so it never crosses a page and needs
//! exactly one translation. A faulting access performs no bus write.

use super::Cpu;
use crate::common::{AccessType, PhysAddr, TranslationResult, Trap, VirtAddr};
use crate::soc::traits::Bus;

impl<B: Bus> Cpu<B> {
    /// Translates a virtual address to a physical address using the MMU.
    ///
    /// # Arguments
    ///
    /// * `vaddr` - The virtual address to translate.
    /// * `access` - The type of memory access (Fetch/Read/Write).
    ///
    /// # Returns
    ///
    /// A `TranslationResult` containing the physical address or a trap if translation fails.
    pub fn translate(&mut self, vaddr: VirtAddr, access: AccessType) -> TranslationResult {
        self.mmu.translate(vaddr, access, &self.ctrl, &mut self.bus)
    }

    /// Fetches the instruction word at `pc`.
    pub(crate) fn fetch(&mut self, pc: u32) -> Result<u32, Trap> {
        let paddr = self
            .translate(VirtAddr::new(pc & !3), AccessType::Fetch)
            .into_result()?;
        Ok(self.read_le(paddr, 4) as u32)
    }

    /// Validates a data access and returns its physical address.
    ///
    /// # Arguments
    ///
    /// * `vaddr`  - Effective address.
    /// * `size`   - Access size in bytes (1, 2, 4, 8 or 16).
    /// * `access` - Read or Write.
    ///
    /// # Returns
    ///
    /// The physical address, or the alignment, breakpoint or page fault trap.
    pub(crate) fn data_address(
        &mut self,
        vaddr: u32,
        size: u32,
        access: AccessType,
    ) -> Result<PhysAddr, Trap> {
        debug_assert!(size.is_power_of_two() && size <= 16);
        if vaddr & (size - 1) != 0 {
            return Err(Trap::UnalignedAccess {
                addr: vaddr,
                access,
            });
        }
        let psr = self.ctrl.psr;
        let watched = if access.is_write() { psr.bw() } else { psr.br() };
        if watched && self.ctrl.db.wrapping_sub(vaddr) < size {
            return Err(Trap::DataBreakpoint { addr: vaddr });
        }
        self.translate(VirtAddr::new(vaddr), access).into_result()
    }

    /// Loads `size` bytes (1, 2, 4 or 8), zero-extended.
    pub(crate) fn read_data(&mut self, vaddr: u32, size: u32) -> Result<u64, Trap> {
        let paddr = self.data_address(vaddr, size, AccessType::Read)?;
        Ok(if self.ctrl.epsr.be() {
            self.read_be(paddr, size)
        } else {
            self.read_le(paddr, size)
        })
    }

    /// Stores the low `size` bytes (1, 2, 4 or 8) of `val`.
    pub(crate) fn write_data(&mut self, vaddr: u32, size: u32, val: u64) -> Result<(), Trap> {
        let paddr = self.data_address(vaddr, size, AccessType::Write)?;
        if self.ctrl.epsr.be() {
            self.write_be(paddr, size, val);
        } else {
            self.write_le(paddr, size, val);
        }
        Ok(())
    }

    /// Loads a 16-byte quad. The half at the lower address is the low half in
    /// little-endian mode and the high half in big-endian mode.
    pub(crate) fn read_quad(&mut self, vaddr: u32) -> Result<u128, Trap> {
        let paddr = self.data_address(vaddr, 16, AccessType::Read)?;
        let upper = PhysAddr::new(paddr.val().wrapping_add(8));
        let (first, second) = if self.ctrl.epsr.be() {
            (self.read_be(paddr, 8), self.read_be(upper, 8))
        } else {
            (self.read_le(paddr, 8), self.read_le(upper, 8))
        };
        Ok(if self.ctrl.epsr.be() {
            (u128::from(first) << 64) | u128::from(second)
        } else {
            (u128::from(second) << 64) | u128::from(first)
        })
    }

    /// Stores a 16-byte quad, laid out as [`read_quad`](Self::read_quad) expects.
    pub(crate) fn write_quad(&mut self, vaddr: u32, val: u128) -> Result<(), Trap> {
        let paddr = self.data_address(vaddr, 16, AccessType::Write)?;
        let upper = PhysAddr::new(paddr.val().wrapping_add(8));
        let (lo, hi) = (val as u64, (val >> 64) as u64);
        if self.ctrl.epsr.be() {
            self.write_be(paddr, 8, hi);
            self.write_be(upper, 8, lo);
        } else {
            self.write_le(paddr, 8, lo);
            self.write_le(upper, 8, hi);
        }
        Ok(())
    }

    /// Stores the bytes of `val` whose bit is set in `byte_mask` (bit `i` is byte `i`
    /// of the value, least significant first) as part of an 8-byte access.
    pub(crate) fn write_masked(&mut self, vaddr: u32, val: u64, byte_mask: u8) -> Result<(), Trap> {
        let paddr = self.data_address(vaddr, 8, AccessType::Write)?.val();
        let be = self.ctrl.epsr.be();
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            if byte_mask & (1 << i) == 0 {
                continue;
            }
            let offset = if be { 7 - i as u32 } else { i as u32 };
            self.bus.write_u8(paddr.wrapping_add(offset), byte);
        }
        Ok(())
    }

    fn read_le(&mut self, paddr: PhysAddr, size: u32) -> u64 {
        let base = paddr.val();
        (0..size).rev().fold(0u64, |acc, i| {
            (acc << 8) | u64::from(self.bus.read_u8(base.wrapping_add(i)))
        })
    }

    fn write_le(&mut self, paddr: PhysAddr, size: u32, val: u64) {
        let base = paddr.val();
        for i in 0..size {
            self.bus.write_u8(base.wrapping_add(i), (val >> (8 * i)) as u8);
        }
    }

    fn read_be(&mut self, paddr: PhysAddr, size: u32) -> u64 {
        let a = paddr.val();
        match size {
            1 => u64::from(self.bus.read_u8(a)),
            2 => u64::from(self.bus.read_u16(a)),
            4 => u64::from(self.bus.read_u32(a)),
            _ => {
                let hi = u64::from(self.bus.read_u32(a));
                let lo = u64::from(self.bus.read_u32(a.wrapping_add(4)));
                (hi << 32) | lo
            }
        }
    }

    fn write_be(&mut self, paddr: PhysAddr, size: u32, val: u64) {
        let a = paddr.val();
        match size {
            1 => self.bus.write_u8(a, val as u8),
            2 => self.bus.write_u16(a, val as u16),
            4 => self.bus.write_u32(a, val as u32),
            _ => {
                self.bus.write_u32(a, (val >> 32) as u32);
                self.bus.write_u32(a.wrapping_add(4), val as u32);
            }
        }
    }
}
