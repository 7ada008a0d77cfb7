//! Intel i860 execution core library.
//!
//! This crate implements the pipelined instruction-execution core of an i860 emulator with the following:
//! 1. **Core:** Register file, control registers, delay-slot branches and precise trap delivery.
//! 2. **Pipelines:** Adder, multiplier, load and graphics units with per-value precision staging.
//! 3. **Memory:** Two-level page-table translation and an endian-aware data port.
//! 4. **ISA:** Table-driven decoding of the primary, core-escape and floating-point-escape opcodes.
//! 5. **SoC:** The bus trait the core is generic over, plus a flat RAM device.
//!
//! ```
//! use i860_core::soc::Ram;
//! use i860_core::{Config, Cpu};
//!
//! // addu 5, r0, r4  (register 4 <- 5)
//! let mut ram = Ram::new(0, 0x1000);
//! ram.load_words(0x100, &[0x8404_0005]);
//!
//! let config = Config::from_json(r#"{"general": {"start_pc": 256}}"#).unwrap();
//! let mut cpu = Cpu::new(ram, &config);
//! let _ = cpu.step();
//! assert_eq!(cpu.regs.read(4), 5);
//! ```

/// Common types and constants (addresses, registers, traps, access types).
pub mod common;
/// Core configuration (defaults, JSON parsing, validation).
pub mod config;
/// CPU core (arch state, execution driver, pipelines, functional units).
pub mod core;
/// Instruction set (field extraction, opcode tables, decoder).
pub mod isa;
/// System-on-chip (bus trait, RAM).
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; generic over the bus it executes from.
pub use crate::core::Cpu;
/// Outcome of a single step and the pins that gate execution.
pub use crate::core::cpu::{Pin, StepOutcome};
