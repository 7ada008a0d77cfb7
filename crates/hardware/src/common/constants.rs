//! Global System Constants.
//!
//! This module defines architecture-wide constants used across the core. It includes:
//! 1. **Memory Constants:** Page sizes, masks, and shifts for address translation.
//! 2. **Vector Constants:** The reset and trap vectors.
//! 3. **Register Constants:** Register counts and the link register index.

/// Page size in bytes (4 KiB).
pub const PAGE_SIZE: u32 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u32 = 12;

/// Number of bits to shift to reach the page-directory index.
pub const DIR_SHIFT: u32 = 22;

/// Mask for the 10-bit page-table index after shifting.
pub const PAGE_INDEX_MASK: u32 = 0x3FF;

/// Mask for extracting the page offset from an address.
pub const OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Mask for the frame address held in a page-directory or page-table entry.
pub const FRAME_MASK: u32 = !OFFSET_MASK;

/// Address the core fetches from after reset.
pub const RESET_VECTOR: u32 = 0xFFFF_FF00;

/// Address every trap, fault and interrupt vectors to.
pub const TRAP_VECTOR: u32 = 0xFFFF_FF00;

/// Size of one instruction word in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of integer registers.
pub const NUM_GPRS: usize = 32;

/// Number of 32-bit floating-point register words.
pub const NUM_FPRS: usize = 32;

/// Register written with the return address by `call` and `calli`.
pub const LINK_REGISTER: usize = 1;
