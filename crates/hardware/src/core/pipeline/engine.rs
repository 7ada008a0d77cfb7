//! The four floating-point pipelines.
//!
//! This module groups the adder, multiplier, load and graphics pipelines and
//! clocks them together. It provides:
//! 1. **Depth Policy:** Stage counts per unit and precision.
//! 2. **Atomic Dual Push:** Adder and multiplier inputs latched in one call.
//! 3. **Continuous Staging:** One `advance_all` per executed instruction, in a
//!    fixed unit order, regardless of which units the instruction used.

use serde::Serialize;

use super::latches::{FpValue, Precision, StageEntry};
use super::unit::Pipeline;

/// Adder pipeline depth.
pub const ADDER_STAGES: u8 = 3;

/// Multiplier pipeline depth for single-precision results.
pub const MULTIPLIER_SINGLE_STAGES: u8 = 3;

/// Multiplier pipeline depth for double-precision results.
pub const MULTIPLIER_DOUBLE_STAGES: u8 = 2;

/// Load pipeline depth.
pub const LOAD_STAGES: u8 = 3;

/// Graphics/integer pipeline depth.
pub const GRAPHICS_STAGES: u8 = 1;

/// Identifies one of the four pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    /// Floating-point adder.
    Adder,
    /// Floating-point multiplier.
    Multiplier,
    /// Pipelined load (`pfld`).
    Load,
    /// Graphics/integer unit.
    Graphics,
}

impl Unit {
    /// All units in advance order.
    pub const ALL: [Self; 4] = [Self::Adder, Self::Multiplier, Self::Load, Self::Graphics];

    /// Default number of stages a value of `precision` spends in this unit.
    pub const fn depth(self, precision: Precision) -> u8 {
        match (self, precision) {
            (Self::Adder, _) => ADDER_STAGES,
            (Self::Multiplier, Precision::Single) => MULTIPLIER_SINGLE_STAGES,
            (Self::Multiplier, Precision::Double) => MULTIPLIER_DOUBLE_STAGES,
            (Self::Load, _) => LOAD_STAGES,
            (Self::Graphics, _) => GRAPHICS_STAGES,
        }
    }
}

/// The adder, multiplier, load and graphics pipelines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineSet {
    adder: Pipeline,
    multiplier: Pipeline,
    load: Pipeline,
    graphics: Pipeline,
}

impl PipelineSet {
    /// Creates four empty pipelines.
    pub const fn new() -> Self {
        Self {
            adder: Pipeline::new(),
            multiplier: Pipeline::new(),
            load: Pipeline::new(),
            graphics: Pipeline::new(),
        }
    }

    /// Empties every pipeline.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Borrows one pipeline.
    pub const fn get(&self, unit: Unit) -> &Pipeline {
        match unit {
            Unit::Adder => &self.adder,
            Unit::Multiplier => &self.multiplier,
            Unit::Load => &self.load,
            Unit::Graphics => &self.graphics,
        }
    }

    const fn get_mut(&mut self, unit: Unit) -> &mut Pipeline {
        match unit {
            Unit::Adder => &mut self.adder,
            Unit::Multiplier => &mut self.multiplier,
            Unit::Load => &mut self.load,
            Unit::Graphics => &mut self.graphics,
        }
    }

    /// Pushes a value with the unit's default depth for its precision.
    ///
    /// # Arguments
    ///
    /// * `unit`  - Target pipeline.
    /// * `value` - Result bits and precision.
    /// * `dest`  - Floating-point register written on retirement.
    pub fn push(&mut self, unit: Unit, value: FpValue, dest: Option<u8>) {
        let depth = unit.depth(value.precision());
        self.get_mut(unit).push(StageEntry::new(value, dest, depth));
    }

    /// Pushes a fully specified entry (e.g. `pfmul3.dd`, which always takes three stages).
    pub fn push_entry(&mut self, unit: Unit, entry: StageEntry) {
        self.get_mut(unit).push(entry);
    }

    /// Latches a dual operation's adder and multiplier inputs together.
    pub fn push_dual(&mut self, adder: StageEntry, multiplier: StageEntry) {
        self.adder.push(adder);
        self.multiplier.push(multiplier);
    }

    /// Value about to leave `unit`, or single-precision zero when it is empty.
    pub fn retiring_value(&self, unit: Unit) -> FpValue {
        self.get(unit).retiring_value()
    }

    /// Advances all four pipelines once, adder first.
    ///
    /// # Arguments
    ///
    /// * `commit` - Called for every retiring entry with the unit it left.
    ///
    /// # Returns
    ///
    /// Total number of retirements.
    pub fn advance_all(&mut self, mut commit: impl FnMut(Unit, StageEntry)) -> usize {
        Unit::ALL
            .iter()
            .map(|&unit| self.get_mut(unit).advance(|e| commit(unit, e)))
            .sum()
    }

    /// Whether `unit`'s last occupied stage holds a double-precision value.
    pub fn last_stage_is_double(&self, unit: Unit) -> bool {
        self.get(unit)
            .last_stage_precision()
            .is_some_and(Precision::is_double)
    }

    /// Whether nothing is in flight in any unit.
    pub fn is_empty(&self) -> bool {
        Unit::ALL.iter().all(|&u| self.get(u).is_empty())
    }
}
