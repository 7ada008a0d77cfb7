//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains field extraction, opcode definitions and the table-driven decoder
//! for the i860 XR instruction set.

/// Table-driven instruction decoder.
pub mod decode;

/// Instruction field extraction.
pub mod instruction;

/// Primary and escape opcodes.
pub mod opcodes;

pub use decode::{Decoded, OpFlags, decode};
pub use opcodes::Opcode;
