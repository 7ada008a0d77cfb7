//! Core processor implementation.
//!
//! This module contains the execution core: architectural state, the
//! step-at-a-time driver, the floating-point pipelines, and the functional
//! units they are built from.

/// Architectural state (register banks, control registers, trap controller).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Floating-point pipelines (stage entries, per-unit FIFOs, the four-unit set).
pub mod pipeline;

/// Functional units (ALU, FPU, graphics, dual-operation data paths, MMU).
pub mod units;

pub use self::cpu::Cpu;
