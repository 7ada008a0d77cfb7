//! Physical and Virtual Address types.
//!
//! This module defines strong types for the two 32-bit address spaces the core deals with.
//! It provides the following:
//! 1. **Type Safety:** Keeps untranslated and translated addresses apart at compile time.
//! 2. **Field Extraction:** Splits a virtual address into directory, page and offset fields.
//! 3. **MMU Integration:** Acts as the currency of the address translator.

use super::constants::{DIR_SHIFT, OFFSET_MASK, PAGE_INDEX_MASK, PAGE_SHIFT};

/// A virtual address as issued by an instruction fetch or a load/store.
///
/// When `DIRBASE.ATE` is clear every virtual address is also a valid physical
/// address; otherwise it must be mapped through the two-level page table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address presented to the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Creates a new virtual address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Index into the page directory (bits 31:22).
    #[inline]
    pub const fn dir_index(self) -> u32 {
        self.0 >> DIR_SHIFT
    }

    /// Index into the second-level page table (bits 21:12).
    #[inline]
    pub const fn page_index(self) -> u32 {
        (self.0 >> PAGE_SHIFT) & PAGE_INDEX_MASK
    }

    /// Extracts the byte offset within a 4 KiB page (bits 11:0).
    #[inline]
    pub const fn page_offset(self) -> u32 {
        self.0 & OFFSET_MASK
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}
