//! Common utilities and types used throughout the i860 execution core.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the core. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Page geometry, vectors and register counts.
//! 3. **Memory Access:** Definitions for categorizing memory operations (Fetch/Read/Write).
//! 4. **Error Handling:** Trap representations, translation results and host errors.
//! 5. **Register Management:** A unified interface for integer and floating-point registers.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Architecture-wide constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and trap definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, RESET_VECTOR, TRAP_VECTOR};
pub use data::AccessType;
pub use error::{ConfigError, RegisterLookupError, TranslationResult, Trap, TrapClass};
pub use reg::RegisterFile;
