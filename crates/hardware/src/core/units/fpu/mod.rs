//! Floating-Point Unit (FPU).
//!
//! This module implements the arithmetic behind the adder and multiplier
//! pipelines using native single and double precision. It provides:
//! 1. **Arithmetic:** Add, subtract, multiply and move with precision conversion.
//! 2. **Reciprocals:** `frcp` and `frsqr`, with their domain errors.
//! 3. **Conversions:** `fix` (rounding per `FSR.RM`) and `ftrunc`.
//! 4. **Comparisons:** The `pfgt`/`pfle`/`pfeq` predicates.
//! 5. **Exceptions:** Source, overflow, underflow and inexact detection.
//!
//! Operations are organized into submodules:
//! - [`exception_flags`]: The raised-condition set.
//! - [`rounding_modes`]: `FSR.RM` decoding for `fix`.

/// Floating-point exception flag types.
pub mod exception_flags;

/// Rounding mode definitions and support.
pub mod rounding_modes;

use self::exception_flags::FpFlags;
use self::rounding_modes::RoundingMode;
use crate::core::pipeline::latches::{FpValue, Precision};

/// Mask keeping the 53 low bits of an `fmlow` product.
const FMLOW_MASK: u64 = (1 << 53) - 1;

/// Floating-point arithmetic operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpOp {
    /// `s1 + s2`.
    Add,
    /// `s1 - s2`.
    Sub,
    /// `s1 * s2`.
    Mul,
    /// `s1`, converted to the result precision.
    Mov,
}

/// Floating-point comparison predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `s1 > s2` (`pfgt`).
    Greater,
    /// `s1 <= s2` (`pfle`).
    LessOrEqual,
    /// `s1 == s2` (`pfeq`).
    Equal,
}

/// Outcome of a floating-point operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FpResult {
    /// Result bits in the requested precision.
    pub value: FpValue,
    /// Conditions raised while computing it.
    pub flags: FpFlags,
}

/// Floating-Point Unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fpu;

impl Fpu {
    /// Executes an adder or multiplier operation.
    ///
    /// Single-precision operands with a single-precision result are computed in
    /// `f32`; anything involving a double is computed in `f64` and narrowed.
    ///
    /// # Arguments
    ///
    /// * `op`            - The operation to perform.
    /// * `a`             - First operand (`src1`).
    /// * `b`             - Second operand (`src2`), ignored by `Mov`.
    /// * `result`        - Result precision (`R` bit).
    /// * `flush_to_zero` - `FSR.FZ`: replace underflowed results with signed zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use i860_core::core::pipeline::{FpValue, Precision};
    /// use i860_core::core::units::fpu::{FpOp, Fpu};
    ///
    /// let a = FpValue::Single(1.5f32.to_bits());
    /// let b = FpValue::Single(2.25f32.to_bits());
    /// let r = Fpu::execute(FpOp::Add, a, b, Precision::Single, false);
    /// assert_eq!(r.value, FpValue::Single(3.75f32.to_bits()));
    /// assert!(r.flags.is_empty());
    /// ```
    pub fn execute(
        op: FpOp,
        a: FpValue,
        b: FpValue,
        result: Precision,
        flush_to_zero: bool,
    ) -> FpResult {
        let uses_b = op != FpOp::Mov;
        let mut flags = FpFlags::NONE;
        let (x, y) = (a.to_f64(), b.to_f64());
        if x.is_nan() || (uses_b && y.is_nan()) {
            flags |= FpFlags::SOURCE;
        }
        let finite_inputs = x.is_finite() && (!uses_b || y.is_finite());

        let exact = match op {
            FpOp::Add => x + y,
            FpOp::Sub => x - y,
            FpOp::Mul => x * y,
            FpOp::Mov => x,
        };
        let all_single = matches!(a, FpValue::Single(_))
            && (!uses_b || matches!(b, FpValue::Single(_)))
            && result == Precision::Single;
        let rounded = if all_single {
            let (xs, ys) = (x as f32, y as f32);
            f64::from(match op {
                FpOp::Add => xs + ys,
                FpOp::Sub => xs - ys,
                FpOp::Mul => xs * ys,
                FpOp::Mov => xs,
            })
        } else {
            exact
        };
        Self::finish(exact, rounded, result, flush_to_zero, finite_inputs, flags)
    }

    /// Reciprocal (`frcp`) of `src2`. A zero source is a source exception.
    pub fn reciprocal(src: FpValue, result: Precision, flush_to_zero: bool) -> FpResult {
        let x = src.to_f64();
        let mut flags = FpFlags::NONE;
        if x == 0.0 || x.is_nan() {
            flags |= FpFlags::SOURCE;
        }
        let r = 1.0 / x;
        Self::finish(r, r, result, flush_to_zero, false, flags)
    }

    /// Reciprocal square root (`frsqr`) of `src2`. Zero or negative sources are
    /// source exceptions.
    pub fn reciprocal_sqrt(src: FpValue, result: Precision, flush_to_zero: bool) -> FpResult {
        let x = src.to_f64();
        let mut flags = FpFlags::NONE;
        if x <= 0.0 || x.is_nan() {
            flags |= FpFlags::SOURCE;
        }
        let r = 1.0 / x.sqrt();
        Self::finish(r, r, result, flush_to_zero, false, flags)
    }

    /// Converts to a 32-bit integer, rounding per `mode`.
    ///
    /// # Returns
    ///
    /// The integer (saturated at the `i32` range) and any raised flags. A NaN
    /// source converts to zero and raises a source exception.
    pub fn to_integer(src: FpValue, mode: RoundingMode) -> (u32, FpFlags) {
        let x = src.to_f64();
        if x.is_nan() {
            return (0, FpFlags::SOURCE);
        }
        let r = mode.round(x);
        let mut flags = FpFlags::NONE;
        if r != x && src.precision() == Precision::Single {
            flags |= FpFlags::INEXACT;
        }
        if r > f64::from(i32::MAX) || r < f64::from(i32::MIN) {
            flags |= FpFlags::OVERFLOW;
        }
        ((r as i32) as u32, flags)
    }

    /// Evaluates a comparison predicate. Unordered operands compare false and
    /// raise a source exception.
    pub fn compare(op: CompareOp, a: FpValue, b: FpValue) -> (bool, FpFlags) {
        let (x, y) = (a.to_f64(), b.to_f64());
        let flags = if x.is_nan() || y.is_nan() {
            FpFlags::SOURCE
        } else {
            FpFlags::NONE
        };
        let holds = match op {
            CompareOp::Greater => x > y,
            CompareOp::LessOrEqual => x <= y,
            CompareOp::Equal => x == y,
        };
        (holds, flags)
    }

    /// `fmlow`: low 53 bits of the product of the operands' low words.
    pub const fn multiply_low(a: u64, b: u64) -> u64 {
        ((a as u32 as u64) * (b as u32 as u64)) & FMLOW_MASK
    }

    /// Narrows `rounded` to `result` precision and classifies the outcome.
    fn finish(
        exact: f64,
        rounded: f64,
        result: Precision,
        flush_to_zero: bool,
        finite_inputs: bool,
        mut flags: FpFlags,
    ) -> FpResult {
        let (mut value, min_normal, is_inf) = match result {
            Precision::Single => {
                let v = rounded as f32;
                (
                    FpValue::Single(v.to_bits()),
                    f64::from(f32::MIN_POSITIVE),
                    v.is_infinite(),
                )
            }
            Precision::Double => (
                FpValue::Double(rounded.to_bits()),
                f64::MIN_POSITIVE,
                rounded.is_infinite(),
            ),
        };
        let magnitude = value.to_f64().abs();

        if finite_inputs && is_inf {
            flags |= FpFlags::OVERFLOW;
        }
        if exact != 0.0 && exact.is_finite() && magnitude < min_normal {
            flags |= FpFlags::UNDERFLOW;
            if flush_to_zero {
                let negative = exact.is_sign_negative();
                value = match result {
                    Precision::Single => FpValue::Single(if negative { 0x8000_0000 } else { 0 }),
                    Precision::Double => FpValue::Double(if negative { 1 << 63 } else { 0 }),
                };
            }
        }
        if result == Precision::Single && exact.is_finite() && value.to_f64() != exact {
            flags |= FpFlags::INEXACT;
        }
        FpResult { value, flags }
    }
}
