//! A single staged pipeline.
//!
//! `push` fills an input latch during instruction execution; `advance`
//! clocks every occupied slot forward by one and then moves the latch into
//! stage 0. An entry retires once it has been clocked `depth` times, so a
//! value pushed on step `T` commits at the end of step `T + depth`. Entries
//! carry their own depth, which lets a double-precision multiply drain one
//! stage early while older single-precision work still completes first.

use super::latches::{FpValue, Precision, StageEntry};

/// Maximum number of stages any unit has.
pub const MAX_STAGES: usize = 3;

/// A staged pipeline of up to [`MAX_STAGES`] slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    slots: [Option<StageEntry>; MAX_STAGES],
    input: Option<StageEntry>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_STAGES],
            input: None,
        }
    }

    /// Empties every stage and the input latch.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Latches a freshly computed value for entry into stage 0.
    ///
    /// # Arguments
    ///
    /// * `entry` - Value, destination and drain depth. `depth` must be 1..=3.
    pub fn push(&mut self, entry: StageEntry) {
        assert!(
            (1..=MAX_STAGES as u8).contains(&entry.depth),
            "pipeline depth {} out of range",
            entry.depth
        );
        debug_assert!(self.input.is_none(), "two pushes into one unit in a step");
        self.input = Some(entry);
    }

    /// Shifts every stage forward by one.
    ///
    /// # Arguments
    ///
    /// * `retire` - Called once per retiring entry, oldest first.
    ///
    /// # Returns
    ///
    /// The number of entries that retired.
    pub fn advance(&mut self, mut retire: impl FnMut(StageEntry)) -> usize {
        let mut retired = 0;
        for k in (0..MAX_STAGES).rev() {
            let Some(entry) = self.slots[k].take() else {
                continue;
            };
            if k + 1 >= usize::from(entry.depth) {
                retire(entry);
                retired += 1;
            } else {
                debug_assert!(self.slots[k + 1].is_none(), "pipeline slot collision");
                self.slots[k + 1] = Some(entry);
            }
        }
        self.slots[0] = self.input.take();
        retired
    }

    /// The entry the next `advance` retires first, if any.
    pub fn retiring(&self) -> Option<&StageEntry> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .find_map(|(k, s)| s.as_ref().filter(|e| k + 1 >= usize::from(e.depth)))
    }

    /// Value of [`Self::retiring`], or single-precision zero if none.
    pub fn retiring_value(&self) -> FpValue {
        self.retiring().map_or(FpValue::Single(0), |e| e.value)
    }

    /// Precision held in the last occupied stage, used for the FSR result-precision bits.
    pub fn last_stage_precision(&self) -> Option<Precision> {
        self.slots.iter().rev().flatten().next().map(StageEntry::precision)
    }

    /// Stage contents, stage 0 first.
    pub const fn stages(&self) -> &[Option<StageEntry>; MAX_STAGES] {
        &self.slots
    }

    /// Whether no value is in flight or latched.
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.slots.iter().all(Option::is_none)
    }
}
