//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the core.
//! These types are used for the following:
//! 1. **Permission Validation:** Checking the writable and user bits during translation.
//! 2. **Fault Generation:** Choosing between instruction (IAT) and data (DAT) access traps.
//! 3. **Breakpoints:** Matching data reads and writes against `DB`.

use serde::Serialize;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access (loads, `pfld`, page-table reads on behalf of software).
    Read,

    /// Data write access (stores, `pst.d`).
    Write,
}

impl AccessType {
    /// Whether this access is a data reference rather than a fetch.
    #[inline]
    pub const fn is_data(self) -> bool {
        !matches!(self, Self::Fetch)
    }

    /// Whether this access modifies memory.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
