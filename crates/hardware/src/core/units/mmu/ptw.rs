//! Two-level page table walker.
//!
//! This module implements the i860 page table walk. A virtual address selects a
//! directory entry (bits 31:22) in the table at `DIRBASE.DTB`, which points at a
//! page table whose entry (bits 21:12) supplies the 4 KiB frame. Both levels are
//! checked for presence and permission; on success the accessed bit is set in both
//! and written back.

use crate::common::constants::{FRAME_MASK, PAGE_SHIFT};
use crate::common::{AccessType, PhysAddr, TranslationResult, Trap, VirtAddr};
use crate::core::arch::control::ControlRegs;
use crate::soc::traits::Bus;

/// Present bit (bit 0).
const PTE_PRESENT_BIT: u32 = 1;

/// Writable bit (bit 1).
const PTE_WRITE_BIT: u32 = 1 << 1;

/// User-accessible bit (bit 2).
const PTE_USER_BIT: u32 = 1 << 2;

/// Accessed bit (bit 5).
const PTE_ACCESSED_BIT: u32 = 1 << 5;

/// Dirty bit (bit 6).
const PTE_DIRTY_BIT: u32 = 1 << 6;

/// Size of a directory or table entry in bytes.
const PTE_SIZE: u32 = 4;

/// Bus cycles charged for each entry read or write-back.
const PTE_ACCESS_CYCLES: u64 = 1;

/// A strongly-typed wrapper around a raw 32-bit directory or page-table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTableEntry(u32);

impl PageTableEntry {
    /// Wraps a raw entry.
    pub const fn new(val: u32) -> Self {
        Self(val)
    }

    /// Returns the underlying raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if the Present (P) bit is set.
    pub const fn is_present(self) -> bool {
        self.0 & PTE_PRESENT_BIT != 0
    }

    /// Returns true if the Writable (W) bit is set.
    pub const fn is_writable(self) -> bool {
        self.0 & PTE_WRITE_BIT != 0
    }

    /// Returns true if the User (U) bit is set.
    pub const fn is_user(self) -> bool {
        self.0 & PTE_USER_BIT != 0
    }

    /// Returns true if the Accessed (A) bit is set.
    pub const fn is_accessed(self) -> bool {
        self.0 & PTE_ACCESSED_BIT != 0
    }

    /// Returns true if the Dirty (D) bit is set.
    pub const fn is_dirty(self) -> bool {
        self.0 & PTE_DIRTY_BIT != 0
    }

    /// Frame address held in bits 31:12.
    pub const fn frame(self) -> u32 {
        self.0 & FRAME_MASK
    }

    /// Returns a copy with the Accessed (A) bit set.
    const fn with_accessed(self) -> Self {
        Self(self.0 | PTE_ACCESSED_BIT)
    }
}

/// Privilege context the walk checks entries against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkContext {
    /// Physical address of the page directory.
    pub dtb: u32,
    /// Access issued in user mode (`PSR.U`).
    pub user: bool,
    /// Supervisor writes honour the W bit (`EPSR.WP`).
    pub write_protect: bool,
}

impl WalkContext {
    /// Builds the context from the current control registers.
    pub const fn from_regs(regs: &ControlRegs) -> Self {
        Self {
            dtb: regs.dirbase.dtb(),
            user: regs.psr.user(),
            write_protect: regs.epsr.wp(),
        }
    }
}

/// Entries are stored little-endian regardless of `EPSR.BE`.
fn read_entry<B: Bus + ?Sized>(bus: &mut B, addr: u32) -> PageTableEntry {
    let bytes = [0u32, 1, 2, 3].map(|i| bus.read_u8(addr.wrapping_add(i)));
    PageTableEntry::new(u32::from_le_bytes(bytes))
}

fn write_entry<B: Bus + ?Sized>(bus: &mut B, addr: u32, pte: PageTableEntry) {
    for (i, b) in pte.raw().to_le_bytes().into_iter().enumerate() {
        bus.write_u8(addr.wrapping_add(i as u32), b);
    }
}

/// Checks one level's entry against the access.
fn permits(pte: PageTableEntry, access: AccessType, ctx: &WalkContext) -> bool {
    if !pte.is_present() {
        return false;
    }
    if access.is_write() && !pte.is_writable() && (ctx.user || ctx.write_protect) {
        return false;
    }
    !(ctx.user && !pte.is_user())
}

/// Performs a page table walk.
///
/// # Arguments
///
/// * `vaddr`  - The virtual address to translate.
/// * `access` - The type of memory access (Fetch, Read, Write).
/// * `ctx`    - Directory base and privilege state.
/// * `bus`    - Bus the tables are read from and written back to.
///
/// # Returns
///
/// The physical address, or a page fault carrying `vaddr` and `access`.
/// Nothing is written back when the walk faults.
pub fn page_table_walk<B: Bus + ?Sized>(
    vaddr: VirtAddr,
    access: AccessType,
    ctx: &WalkContext,
    bus: &mut B,
) -> TranslationResult {
    let fault = Trap::PageFault {
        addr: vaddr.val(),
        access,
    };
    let mut cycles = 0;

    let pde_addr = ctx.dtb | (vaddr.dir_index() * PTE_SIZE);
    let pde = read_entry(bus, pde_addr);
    cycles += PTE_ACCESS_CYCLES;
    if !permits(pde, access, ctx) {
        return TranslationResult::fault(fault, cycles);
    }

    let pte_addr = pde.frame() | (vaddr.page_index() * PTE_SIZE);
    let pte = read_entry(bus, pte_addr);
    cycles += PTE_ACCESS_CYCLES;
    if !permits(pte, access, ctx) {
        return TranslationResult::fault(fault, cycles);
    }

    // The dirty bit is software-managed: the first write to a clean page faults.
    if access.is_write() && !pte.is_dirty() {
        return TranslationResult::fault(fault, cycles);
    }

    if !pde.is_accessed() {
        write_entry(bus, pde_addr, pde.with_accessed());
        cycles += PTE_ACCESS_CYCLES;
    }
    if !pte.is_accessed() {
        write_entry(bus, pte_addr, pte.with_accessed());
        cycles += PTE_ACCESS_CYCLES;
    }

    let paddr = pte.frame() | vaddr.page_offset();
    debug_assert_eq!(paddr >> PAGE_SHIFT, pte.frame() >> PAGE_SHIFT);
    TranslationResult::success(PhysAddr::new(paddr), cycles)
}
