//! Graphics unit operations.
//!
//! Pure 64-bit integer datapaths behind the pixel instructions. The caller
//! supplies and commits `MERGE` and `PSR.PM`.
//!
//! | Instruction | Result                     | Side effect                         |
//! |-------------|----------------------------|-------------------------------------|
//! | `fiadd`     | `s1 + s2` (32 or 64 bit)   |                                     |
//! | `fisub`     | `s1 - s2` (32 or 64 bit)   |                                     |
//! | `faddp`     | `s1 + s2`                  | `MERGE` shifted, pixel bits merged  |
//! | `faddz`     | `s1 + s2`                  | `MERGE` shifted, Z bits merged      |
//! | `form`      | `MERGE \| s1`              | `MERGE` cleared                     |
//! | `fzchk*`    | per-field unsigned minimum | `PM` shifted, one bit per field     |

/// `faddp` merge parameters per pixel size: (shift, mask of result bits kept).
const FADDP_8: (u32, u64) = (8, 0xFF00_FF00_FF00_FF00);
const FADDP_16: (u32, u64) = (6, 0xFC00_FC00_FC00_FC00);
const FADDP_32: (u32, u64) = (8, 0xFF00_0000_FF00_0000);

/// `faddz` merge parameters: (shift, mask).
const FADDZ: (u32, u64) = (16, 0xFFFF_0000_FFFF_0000);

/// Operation performed by the graphics unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphicsOp {
    /// `fiadd`.
    IntegerAdd,
    /// `fisub`.
    IntegerSub,
    /// `faddp`.
    PixelAdd,
    /// `faddz`.
    ZAdd,
    /// `form`.
    Or,
    /// `fzchks` / `fzchkl`.
    ZCheck(ZWidth),
}

impl GraphicsOp {
    /// Whether the `R` bit picks the width; every other operation is 64-bit.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::IntegerAdd | Self::IntegerSub)
    }
}

/// Z-buffer field width checked by `fzchks` / `fzchkl`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZWidth {
    /// Four 16-bit fields (`fzchks`).
    Short,
    /// Two 32-bit fields (`fzchkl`).
    Long,
}

impl ZWidth {
    const fn field_bits(self) -> u32 {
        match self {
            Self::Short => 16,
            Self::Long => 32,
        }
    }

    const fn fields(self) -> u32 {
        64 / self.field_bits()
    }
}

/// Integer add in the graphics unit; `double` selects the 64-bit form.
pub const fn integer_add(s1: u64, s2: u64, double: bool) -> u64 {
    if double {
        s1.wrapping_add(s2)
    } else {
        (s1 as u32).wrapping_add(s2 as u32) as u64
    }
}

/// Integer subtract in the graphics unit; `double` selects the 64-bit form.
pub const fn integer_sub(s1: u64, s2: u64, double: bool) -> u64 {
    if double {
        s1.wrapping_sub(s2)
    } else {
        (s1 as u32).wrapping_sub(s2 as u32) as u64
    }
}

const fn merge_with(merge: u64, result: u64, (shift, mask): (u32, u64)) -> u64 {
    ((merge >> shift) & !mask) | (result & mask)
}

/// `faddp`: pixel add with interpolation merge.
///
/// # Arguments
///
/// * `s1`, `s2`   - Operands.
/// * `merge`      - Current `MERGE`.
/// * `pixel_bits` - Pixel size from `PSR.PS` (8, 16 or 32).
///
/// # Returns
///
/// `(result, new_merge)`. An unsupported pixel size leaves `MERGE` unchanged.
pub const fn faddp(s1: u64, s2: u64, merge: u64, pixel_bits: Option<u32>) -> (u64, u64) {
    let r = s1.wrapping_add(s2);
    let merge = match pixel_bits {
        Some(8) => merge_with(merge, r, FADDP_8),
        Some(16) => merge_with(merge, r, FADDP_16),
        Some(32) => merge_with(merge, r, FADDP_32),
        _ => merge,
    };
    (r, merge)
}

/// `faddz`: Z add with 16-bit merge. Returns `(result, new_merge)`.
pub const fn faddz(s1: u64, s2: u64, merge: u64) -> (u64, u64) {
    let r = s1.wrapping_add(s2);
    (r, merge_with(merge, r, FADDZ))
}

/// `form`: returns `(MERGE | s1, 0)`.
pub const fn form(s1: u64, merge: u64) -> (u64, u64) {
    (merge | s1, 0)
}

/// Z-buffer check.
///
/// For every field keeps the smaller (unsigned) of the `s1` and `s2` fields.
/// `PM` is shifted right by the field count and a bit is set at the top for
/// every field where `s2 <= s1`, field 0 (least significant) lowest.
///
/// # Returns
///
/// `(result, new_pm)`.
pub const fn zcheck(s1: u64, s2: u64, pm: u32, width: ZWidth) -> (u64, u32) {
    let bits = width.field_bits();
    let n = width.fields();
    let field_mask = (1u64 << bits) - 1;
    let mut result = 0u64;
    let mut pm = (pm & 0xFF) >> n;
    let mut i = 0;
    while i < n {
        let shift = i * bits;
        let f1 = (s1 >> shift) & field_mask;
        let f2 = (s2 >> shift) & field_mask;
        if f2 <= f1 {
            result |= f2 << shift;
            pm |= 1 << (8 - n + i);
        } else {
            result |= f1 << shift;
        }
        i += 1;
    }
    (result, pm)
}
