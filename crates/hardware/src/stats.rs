//! Execution statistics collection and reporting.
//!
//! This module tracks counters for the execution core. It provides:
//! 1. **Progress:** The opaque cycle counter and executed instruction count.
//! 2. **Instruction mix:** Counts by category (integer, load, store, branch, FP, graphics, control).
//! 3. **Traps:** Traps taken, per class.
//! 4. **Pipelines:** Retirements per pipeline unit.
//! 5. **Pins:** Steps suspended by bus hold.

use std::fmt;

use serde::Serialize;

use crate::common::error::TrapClass;
use crate::core::pipeline::Unit;
use crate::isa::{OpFlags, Opcode};

/// Traps taken, one counter per class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrapCounts {
    /// Undefined opcode, `trap`, `intovr`.
    pub instruction_fault: u64,
    /// Instruction fetch page faults.
    pub instruction_access: u64,
    /// Data page faults, misalignment and data breakpoints.
    pub data_access: u64,
    /// Floating-point faults.
    pub floating_point: u64,
    /// External interrupts.
    pub external: u64,
}

impl TrapCounts {
    /// Sum over all classes.
    pub const fn total(&self) -> u64 {
        self.instruction_fault
            + self.instruction_access
            + self.data_access
            + self.floating_point
            + self.external
    }
}

/// Statistics for one core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Steps that advanced the core (executed or trapped). Opaque to callers.
    pub cycles: u64,
    /// Instructions that completed without a trap.
    pub instructions: u64,

    /// Integer ALU and shift instructions.
    pub inst_integer: u64,
    /// Integer and floating-point loads.
    pub inst_load: u64,
    /// Integer, floating-point and pixel stores.
    pub inst_store: u64,
    /// Branches and calls.
    pub inst_branch: u64,
    /// Floating-point arithmetic and transfers.
    pub inst_fp: u64,
    /// Graphics unit instructions.
    pub inst_graphics: u64,
    /// Control register accesses, traps, lock/unlock and flush.
    pub inst_control: u64,

    /// Traps taken per class.
    pub traps: TrapCounts,

    /// Entries retired from the adder pipeline.
    pub retired_adder: u64,
    /// Entries retired from the multiplier pipeline.
    pub retired_multiplier: u64,
    /// Entries retired from the load pipeline.
    pub retired_load: u64,
    /// Entries retired from the graphics pipeline.
    pub retired_graphics: u64,

    /// Steps suspended because the bus-hold pin was asserted.
    pub bus_hold_stalls: u64,
}

impl SimStats {
    /// Counts a completed instruction under its category.
    pub const fn record_instruction(&mut self, op: Opcode, flags: OpFlags) {
        self.instructions += 1;
        match op {
            Opcode::LdB | Opcode::Ld | Opcode::Fld | Opcode::Pfld => self.inst_load += 1,
            Opcode::StB | Opcode::St | Opcode::Fst | Opcode::PstD => self.inst_store += 1,
            Opcode::LdC
            | Opcode::StC
            | Opcode::Trap
            | Opcode::Intovr
            | Opcode::Lock
            | Opcode::Unlock
            | Opcode::Flush => self.inst_control += 1,
            _ if flags.contains(OpFlags::CONTROL_FLOW) => self.inst_branch += 1,
            _ if flags.contains(OpFlags::GRAPHICS) => self.inst_graphics += 1,
            _ if flags.contains(OpFlags::FLOATING_POINT) => self.inst_fp += 1,
            _ => self.inst_integer += 1,
        }
    }

    /// Counts a delivered trap.
    pub const fn record_trap(&mut self, class: TrapClass) {
        match class {
            TrapClass::InstructionFault => self.traps.instruction_fault += 1,
            TrapClass::InstructionAccess => self.traps.instruction_access += 1,
            TrapClass::DataAccess => self.traps.data_access += 1,
            TrapClass::FloatingPoint => self.traps.floating_point += 1,
            TrapClass::External => self.traps.external += 1,
        }
    }

    /// Counts a pipeline retirement.
    pub const fn record_retirement(&mut self, unit: Unit) {
        match unit {
            Unit::Adder => self.retired_adder += 1,
            Unit::Multiplier => self.retired_multiplier += 1,
            Unit::Load => self.retired_load += 1,
            Unit::Graphics => self.retired_graphics += 1,
        }
    }

    /// Serializes the counters as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CORE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "core.cycles              {:>12}", self.cycles)?;
        writeln!(f, "core.instructions        {:>12}", self.instructions)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "mix.integer              {:>12}", self.inst_integer)?;
        writeln!(f, "mix.load                 {:>12}", self.inst_load)?;
        writeln!(f, "mix.store                {:>12}", self.inst_store)?;
        writeln!(f, "mix.branch               {:>12}", self.inst_branch)?;
        writeln!(f, "mix.fp                   {:>12}", self.inst_fp)?;
        writeln!(f, "mix.graphics             {:>12}", self.inst_graphics)?;
        writeln!(f, "mix.control              {:>12}", self.inst_control)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "traps.total              {:>12}", self.traps.total())?;
        writeln!(f, "traps.instruction        {:>12}", self.traps.instruction_fault)?;
        writeln!(f, "traps.instruction_access {:>12}", self.traps.instruction_access)?;
        writeln!(f, "traps.data_access        {:>12}", self.traps.data_access)?;
        writeln!(f, "traps.floating_point     {:>12}", self.traps.floating_point)?;
        writeln!(f, "traps.external           {:>12}", self.traps.external)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "pipe.adder               {:>12}", self.retired_adder)?;
        writeln!(f, "pipe.multiplier          {:>12}", self.retired_multiplier)?;
        writeln!(f, "pipe.load                {:>12}", self.retired_load)?;
        writeln!(f, "pipe.graphics            {:>12}", self.retired_graphics)?;
        write!(f, "pins.bus_hold_stalls     {:>12}", self.bus_hold_stalls)
    }
}
