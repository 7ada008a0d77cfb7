//! System-on-Chip (SoC) boundary.
//!
//! This module organizes what the core sees of the outside world: the
//! `Bus` trait it is generic over and a flat RAM device implementing it.

/// Flat RAM backing store.
pub mod memory;

/// Bus trait definitions.
pub mod traits;

pub use memory::Ram;
pub use traits::{Bus, IrqLine};
