//! Execution units and functional components.
//!
//! This module contains the datapaths the execution driver calls into:
//! the integer ALU, the floating-point arithmetic behind the adder and
//! multiplier pipelines, the graphics unit, the dual-operation data-path
//! table, and the address translator.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Dual-operation data-path control table.
pub mod dual;

/// Floating-point arithmetic.
pub mod fpu;

/// Graphics unit datapaths.
pub mod graphics;

/// Memory Management Unit with the two-level page table walker.
pub mod mmu;
