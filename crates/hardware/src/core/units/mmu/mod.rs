//! Memory Management Unit (MMU).
//!
//! This module implements the address translator. It performs the following:
//! 1. **Bypass:** With `DIRBASE.ATE` clear every address maps to itself.
//! 2. **Translation:** With `ATE` set, walks the two-level page table for every access.
//! 3. **Fault Reporting:** Returns a page fault carrying the address and access type.
//!
//! Translations are not cached between instructions, so a page-table edit is
//! visible to the very next access.

/// Two-level page table walker.
pub mod ptw;

use crate::common::{AccessType, PhysAddr, TranslationResult, VirtAddr};
use crate::core::arch::control::ControlRegs;
use crate::soc::traits::Bus;

use self::ptw::{WalkContext, page_table_walk};

/// Stateless address translator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mmu;

impl Mmu {
    /// Translates a virtual address to a physical address.
    ///
    /// # Arguments
    ///
    /// * `vaddr`  - Virtual address to translate.
    /// * `access` - Type of access (Fetch, Read, Write).
    /// * `regs`   - Control registers (`DIRBASE`, `PSR.U`, `EPSR.WP`).
    /// * `bus`    - Bus for page table reads and accessed-bit write-back.
    ///
    /// # Returns
    ///
    /// A `TranslationResult` with the physical address, walk cycles, and any fault.
    pub fn translate<B: Bus + ?Sized>(
        self,
        vaddr: VirtAddr,
        access: AccessType,
        regs: &ControlRegs,
        bus: &mut B,
    ) -> TranslationResult {
        if !regs.dirbase.ate() {
            return TranslationResult::success(PhysAddr::new(vaddr.val()), 0);
        }
        page_table_walk(vaddr, access, &WalkContext::from_regs(regs), bus)
    }
}
