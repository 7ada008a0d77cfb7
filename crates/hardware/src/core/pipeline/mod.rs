//! Floating-point pipeline engine.
//!
//! This module contains the staged computation model. It includes the following components:
//! 1. **Latches:** Precision-tagged values and the slot entries that carry them.
//! 2. **Unit:** One pipeline with per-entry drain depth.
//! 3. **Engine:** The adder, multiplier, load and graphics pipelines clocked together.

/// The four pipelines and their depth policy.
pub mod engine;

/// Precision-tagged stage entries.
pub mod latches;

/// A single staged pipeline.
pub mod unit;

pub use engine::{PipelineSet, Unit};
pub use latches::{FpValue, Precision, StageEntry};
pub use unit::Pipeline;
