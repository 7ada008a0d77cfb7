//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, program counter and control registers.
//! 2. **Pipeline Control:** Owns the adder, multiplier, load and graphics pipelines.
//! 3. **Trap Control:** Holds the pending-trap state and the outstanding delayed branch.
//! 4. **System Integration:** Owns the bus and services the reset, bus-hold and interrupt pins.

/// Branch, call and loop instructions.
pub mod branch;

/// Control register access, software traps and lock/unlock.
pub mod control;

/// Instruction execution orchestration and pipeline coordination.
pub mod execution;

/// Floating-point loads, stores, arithmetic and dual operations.
pub mod float;

/// Graphics unit instructions.
pub mod graphics;

/// Integer arithmetic, logic, shifts, loads and stores.
pub mod integer;

/// Memory access handling and load/store operations.
pub mod memory;

/// Register snapshots for debuggers and tracing.
pub mod snapshot;

/// Trap delivery.
pub mod trap;

pub use self::execution::StepOutcome;
pub use self::snapshot::Snapshot;

use crate::common::{RESET_VECTOR, RegisterFile};
use crate::config::Config;
use crate::core::arch::control::ControlRegs;
use crate::core::arch::special::SpecialRegs;
use crate::core::arch::trap::TrapController;
use crate::core::pipeline::PipelineSet;
use crate::core::units::mmu::Mmu;
use crate::soc::traits::Bus;
use crate::stats::SimStats;

/// Input pins that gate execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pin {
    /// Holds the core in reset while asserted.
    Reset,
    /// Suspends execution while asserted.
    BusHold,
}

/// A taken control transfer waiting for its delay slot to execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayedBranch {
    /// Address fetched after the delay slot.
    pub target: u32,
    /// `bri` out of a trap handler: restore `U`/`IM` once the branch completes.
    pub trap_return: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pins {
    reset: bool,
    bus_hold: bool,
}

/// Main CPU structure containing all processor state and components.
///
/// The CPU executes one instruction per [`step`](Cpu::step), staging floating-point
/// results through the four pipelines and delivering traps precisely.
#[derive(Debug)]
pub struct Cpu<B: Bus> {
    /// General Purpose and Floating Point Registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u32,
    /// Control Registers (`fir`, `psr`, `dirbase`, `db`, `fsr`, `epsr`).
    pub ctrl: ControlRegs,
    /// Floating-point special registers (`KR`, `KI`, `T`, `MERGE`).
    pub special: SpecialRegs,
    /// Adder, multiplier, load and graphics pipelines.
    pub pipelines: PipelineSet,
    /// Pending-trap state.
    pub traps: TrapController,
    /// Memory Management Unit.
    pub mmu: Mmu,
    /// Branch whose delay slot executes next.
    pub delayed: Option<DelayedBranch>,
    /// Performance statistics.
    pub stats: SimStats,
    /// Enable instruction tracing.
    pub trace: bool,

    bus: B,
    pins: Pins,
    start_pc: Option<u32>,
    poll_interval: u64,
    poll_counter: u64,
    next_pc: u32,
}

impl<B: Bus> Cpu<B> {
    /// Creates a new CPU in its reset state.
    ///
    /// # Arguments
    ///
    /// * `bus`    - The address space the core fetches from and accesses.
    /// * `config` - The configuration parameters.
    ///
    /// # Returns
    ///
    /// A new `Cpu` with architected reset values and empty pipelines.
    pub fn new(bus: B, config: &Config) -> Self {
        let start_pc = config.general.start_pc;
        let pc = start_pc.unwrap_or(RESET_VECTOR);
        Self {
            regs: RegisterFile::new(),
            pc,
            ctrl: ControlRegs::new(),
            special: SpecialRegs::default(),
            pipelines: PipelineSet::new(),
            traps: TrapController::new(),
            mmu: Mmu,
            delayed: None,
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            bus,
            pins: Pins::default(),
            start_pc,
            poll_interval: config.interrupts.poll_interval,
            poll_counter: 0,
            next_pc: pc,
        }
    }

    /// Device reset: restores every architected register, empties the pipelines
    /// and clears trap state. Statistics and pin levels are kept.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.pc = self.start_pc.unwrap_or(RESET_VECTOR);
        self.next_pc = self.pc;
        self.ctrl = ControlRegs::new();
        self.special = SpecialRegs::default();
        self.pipelines.clear();
        self.traps.reset();
        self.delayed = None;
        self.poll_counter = 0;
        tracing::debug!(pc = self.pc, "reset");
    }

    /// Drives an input pin.
    ///
    /// Asserting [`Pin::Reset`] resets the core and holds it until the pin is
    /// deasserted. [`Pin::BusHold`] suspends execution while asserted.
    pub fn set_pin(&mut self, pin: Pin, asserted: bool) {
        match pin {
            Pin::Reset => {
                if asserted {
                    self.reset();
                }
                self.pins.reset = asserted;
            }
            Pin::BusHold => self.pins.bus_hold = asserted,
        }
    }

    /// Whether `pin` is currently asserted.
    pub const fn pin(&self, pin: Pin) -> bool {
        match pin {
            Pin::Reset => self.pins.reset,
            Pin::BusHold => self.pins.bus_hold,
        }
    }

    /// Asserts the external interrupt line (`EPSR.INT`).
    pub const fn gen_interrupt(&mut self) {
        self.ctrl.epsr.set_int(true);
    }

    /// Deasserts the external interrupt line.
    pub const fn clr_interrupt(&mut self) {
        self.ctrl.epsr.set_int(false);
    }

    /// Borrows the bus.
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrows the bus, e.g. to load a program.
    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consumes the core and returns its bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Whether `PSR.U` is set.
    #[inline]
    pub(crate) const fn is_user(&self) -> bool {
        self.ctrl.psr.user()
    }
}
