//! Floating-point rounding mode support.
//!
//! `FSR.RM` selects one of four modes:
//!
//! | Value | Mode    | Description                 |
//! |-------|---------|-----------------------------|
//! | 0b00  | Nearest | Round to nearest, ties even |
//! | 0b01  | Down    | Round towards −∞            |
//! | 0b10  | Up      | Round towards +∞            |
//! | 0b11  | Chop    | Round towards zero          |
//!
//! Only `fix` consults the mode; arithmetic uses the host's round-to-nearest.

/// `FSR.RM` rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    Nearest = 0b00,
    /// Round towards −∞.
    Down = 0b01,
    /// Round towards +∞.
    Up = 0b10,
    /// Round towards zero.
    Chop = 0b11,
}

impl RoundingMode {
    /// Decodes the 2-bit `FSR.RM` field.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0b00 => Self::Nearest,
            0b01 => Self::Down,
            0b10 => Self::Up,
            _ => Self::Chop,
        }
    }

    /// Rounds `x` to an integral value in this mode.
    pub fn round(self, x: f64) -> f64 {
        match self {
            Self::Nearest => x.round_ties_even(),
            Self::Down => x.floor(),
            Self::Up => x.ceil(),
            Self::Chop => x.trunc(),
        }
    }
}
