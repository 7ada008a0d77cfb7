//! Control register definitions and operations.
//!
//! This module implements the six control registers reachable through `ld.c`/`st.c`.
//! It provides:
//! 1. **Register Numbers:** The `ControlReg` selector decoded from the `creg` field.
//! 2. **Typed Bitfields:** `Psr`, `Epsr`, `Dirbase` and `Fsr` newtypes with named accessors.
//! 3. **Field Masks:** Trap, supervisor-only and read-only masks.
//! 4. **Register Storage:** The `ControlRegs` struct, with privilege-aware store rules.

use serde::Serialize;

use crate::common::error::TrapClass;

/// PSR bits that record the class of the last trap.
pub const PSR_TRAP_MASK: u32 = 0x0000_1F00;

/// PSR bits a user-mode `st.c` may not change.
pub const PSR_SUPERVISOR_MASK: u32 = 0x0000_FFF3;

/// EPSR bits no `st.c` may change.
pub const EPSR_READ_ONLY_MASK: u32 = 0x003E_1FFF;

/// Additional EPSR bits a user-mode `st.c` may not change.
pub const EPSR_USER_READ_ONLY_MASK: u32 = 0x00C0_6000;

/// EPSR value after reset: XR processor type 1, stepping 7, data cache size 1.
pub const EPSR_RESET: u32 = 0x0004_0701;

/// DIRBASE bit that is accepted by `st.c` but never stored.
pub const DIRBASE_ITI: u32 = 1 << 5;

macro_rules! flag {
    ($(#[$doc:meta])* $get:ident, $set:ident, $bit:expr) => {
        $(#[$doc])*
        #[inline]
        pub const fn $get(self) -> bool {
            self.0 & (1 << $bit) != 0
        }

        #[doc = concat!("Sets or clears the bit read by [`Self::", stringify!($get), "`].")]
        #[inline]
        pub const fn $set(&mut self, on: bool) {
            if on {
                self.0 |= 1 << $bit;
            } else {
                self.0 &= !(1 << $bit);
            }
        }
    };
}

macro_rules! field {
    ($(#[$doc:meta])* $get:ident, $set:ident, $shift:expr, $width:expr) => {
        $(#[$doc])*
        #[inline]
        pub const fn $get(self) -> u32 {
            (self.0 >> $shift) & ((1 << $width) - 1)
        }

        #[doc = concat!("Replaces the field read by [`Self::", stringify!($get), "`].")]
        #[inline]
        pub const fn $set(&mut self, val: u32) {
            let mask = ((1u32 << $width) - 1) << $shift;
            self.0 = (self.0 & !mask) | ((val << $shift) & mask);
        }
    };
}

/// Processor status register (`psr`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Psr(pub u32);

impl Psr {
    flag!(/// Break on read (bit 0).
        br, set_br, 0);
    flag!(/// Break on write (bit 1).
        bw, set_bw, 1);
    flag!(/// Condition code (bit 2).
        cc, set_cc, 2);
    flag!(/// Loop condition code used by `bla` (bit 3).
        lcc, set_lcc, 3);
    flag!(/// Interrupt mask; external interrupts are recognised while set (bit 4).
        im, set_im, 4);
    flag!(/// Previous interrupt mask (bit 5).
        pim, set_pim, 5);
    flag!(/// User mode (bit 6).
        user, set_user, 6);
    flag!(/// Previous user mode (bit 7).
        prev_user, set_prev_user, 7);
    flag!(/// Instruction trap (bit 8).
        it, set_it, 8);
    flag!(/// External interrupt trap (bit 9).
        interrupt, set_interrupt, 9);
    flag!(/// Instruction access trap (bit 10).
        iat, set_iat, 10);
    flag!(/// Data access trap (bit 11).
        dat, set_dat, 11);
    flag!(/// Floating-point trap (bit 12).
        ft, set_ft, 12);
    flag!(/// Delayed switch (bit 13).
        ds, set_ds, 13);
    flag!(/// Dual-instruction mode (bit 14).
        dim, set_dim, 14);
    field!(/// Shift count loaded by `shr`, consumed by `shrd` (bits 21:17).
        sc, set_sc, 17, 5);
    field!(/// Pixel size selector: 0 = 8, 1 = 16, 2 = 32 bits (bits 23:22).
        ps, set_ps, 22, 2);
    field!(/// Pixel mask consumed by `pst.d` and produced by `fzchk` (bits 31:24).
        pm, set_pm, 24, 8);

    /// Returns the trap bits (IT, IN, IAT, DAT, FT).
    #[inline]
    pub const fn trap_bits(self) -> u32 {
        self.0 & PSR_TRAP_MASK
    }

    /// Sets the trap bit that reports `class`.
    pub const fn raise(&mut self, class: TrapClass) {
        match class {
            TrapClass::InstructionFault => self.set_it(true),
            TrapClass::External => self.set_interrupt(true),
            TrapClass::InstructionAccess => self.set_iat(true),
            TrapClass::DataAccess => self.set_dat(true),
            TrapClass::FloatingPoint => self.set_ft(true),
        }
    }

    /// Pixel size in bits selected by `ps`, or `None` for the reserved encoding.
    pub const fn pixel_bits(self) -> Option<u32> {
        match self.ps() {
            0 => Some(8),
            1 => Some(16),
            2 => Some(32),
            _ => None,
        }
    }
}

/// Extended processor status register (`epsr`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Epsr(pub u32);

impl Default for Epsr {
    fn default() -> Self {
        Self(EPSR_RESET)
    }
}

impl Epsr {
    field!(/// Processor type (bits 7:0).
        processor_type, set_processor_type, 0, 8);
    field!(/// Stepping number (bits 12:8).
        stepping, set_stepping, 8, 5);
    flag!(/// Interlock (bit 13).
        il, set_il, 13);
    flag!(/// Write protect: supervisor writes honour the page W bit (bit 14).
        wp, set_wp, 14);
    flag!(/// External interrupt line level (bit 17).
        int, set_int, 17);
    field!(/// Data cache size (bits 21:18).
        dcs, set_dcs, 18, 4);
    flag!(/// Page-table bit mode (bit 22).
        pbm, set_pbm, 22);
    flag!(/// Big-endian data accesses (bit 23).
        be, set_be, 23);
    flag!(/// Overflow flag from the last signed/unsigned add or subtract (bit 24).
        of, set_of, 24);
}

/// Page-directory base register (`dirbase`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Dirbase(pub u32);

impl Dirbase {
    flag!(/// Address translation enable (bit 0).
        ate, set_ate, 0);
    field!(/// DRAM page size (bits 3:1).
        dps, set_dps, 1, 3);
    flag!(/// Bus lock (bit 4).
        bl, set_bl, 4);
    flag!(/// Code-size 8-bit boot mode (bit 7).
        cs8, set_cs8, 7);
    field!(/// Replacement block (bits 10:8).
        rb, set_rb, 8, 3);

    /// Directory table base: physical address of the page directory (bits 31:12).
    #[inline]
    pub const fn dtb(self) -> u32 {
        self.0 & 0xFFFF_F000
    }
}

/// Floating-point status register (`fsr`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Fsr(pub u32);

impl Fsr {
    flag!(/// Flush underflows to zero (bit 0).
        fz, set_fz, 0);
    flag!(/// Trap inexact (bit 1).
        ti, set_ti, 1);
    field!(/// Rounding mode: 0 nearest, 1 down, 2 up, 3 chop (bits 3:2).
        rm, set_rm, 2, 2);
    flag!(/// Update bit for `st.c fsr` in pipelined state restore (bit 4).
        u, set_u, 4);
    flag!(/// Floating-point trap enable (bit 5).
        fte, set_fte, 5);
    flag!(/// Sticky inexact (bit 7).
        si, set_si, 7);
    flag!(/// Source exception (bit 8).
        se, set_se, 8);
    flag!(/// Multiplier underflow (bit 9).
        mu, set_mu, 9);
    flag!(/// Multiplier overflow (bit 10).
        mo, set_mo, 10);
    flag!(/// Multiplier inexact (bit 11).
        mi, set_mi, 11);
    flag!(/// Multiplier add-one (bit 12).
        ma, set_ma, 12);
    flag!(/// Adder underflow (bit 13).
        au, set_au, 13);
    flag!(/// Adder overflow (bit 14).
        ao, set_ao, 14);
    flag!(/// Adder inexact (bit 15).
        ai, set_ai, 15);
    flag!(/// Adder add-one (bit 16).
        aa, set_aa, 16);
    field!(/// Result register of the adder's last stage (bits 21:17).
        rr, set_rr, 17, 5);
    field!(/// Adder exponent (bits 24:22).
        ae, set_ae, 22, 3);
    flag!(/// Load pipe result precision, set when double (bit 26).
        lrp, set_lrp, 26);
    flag!(/// Integer (graphics) pipe result precision (bit 27).
        irp, set_irp, 27);
    flag!(/// Multiplier pipe result precision (bit 28).
        mrp, set_mrp, 28);
    flag!(/// Adder pipe result precision (bit 29).
        arp, set_arp, 29);
}

/// Control register number carried in the `creg` field of `ld.c`/`st.c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlReg {
    /// Fault instruction register.
    Fir,
    /// Processor status register.
    Psr,
    /// Page-directory base register.
    Dirbase,
    /// Data breakpoint register.
    Db,
    /// Floating-point status register.
    Fsr,
    /// Extended processor status register.
    Epsr,
}

impl ControlReg {
    /// Decodes a `creg` number; numbers above 5 are reserved.
    pub const fn from_index(idx: u32) -> Option<Self> {
        match idx {
            0 => Some(Self::Fir),
            1 => Some(Self::Psr),
            2 => Some(Self::Dirbase),
            3 => Some(Self::Db),
            4 => Some(Self::Fsr),
            5 => Some(Self::Epsr),
            _ => None,
        }
    }
}

/// The control register bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlRegs {
    /// Fault instruction register.
    pub fir: u32,
    /// Processor status register.
    pub psr: Psr,
    /// Page-directory base register.
    pub dirbase: Dirbase,
    /// Data breakpoint address.
    pub db: u32,
    /// Floating-point status register.
    pub fsr: Fsr,
    /// Extended processor status register.
    pub epsr: Epsr,
}

impl ControlRegs {
    /// Creates the bank with architected reset values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a control register's raw value (no side effects).
    pub const fn read(&self, reg: ControlReg) -> u32 {
        match reg {
            ControlReg::Fir => self.fir,
            ControlReg::Psr => self.psr.0,
            ControlReg::Dirbase => self.dirbase.0,
            ControlReg::Db => self.db,
            ControlReg::Fsr => self.fsr.0,
            ControlReg::Epsr => self.epsr.0,
        }
    }

    /// Applies an `st.c` store, honouring read-only and supervisor-only bits.
    ///
    /// # Arguments
    ///
    /// * `reg`  - Destination control register.
    /// * `val`  - Value from the source integer register.
    /// * `user` - Whether the store executes in user mode.
    ///
    /// # Returns
    ///
    /// `true` if any stored bit changed.
    pub const fn store(&mut self, reg: ControlReg, val: u32, user: bool) -> bool {
        let before = self.read(reg);
        match reg {
            ControlReg::Fir => {}
            ControlReg::Psr => {
                let old = self.psr.0;
                self.psr.0 = if user {
                    (old & PSR_SUPERVISOR_MASK) | (val & !PSR_SUPERVISOR_MASK)
                } else {
                    // Trap bits may be cleared but never set by software.
                    let trap = old & val & PSR_TRAP_MASK;
                    (val & !PSR_TRAP_MASK) | trap
                };
            }
            ControlReg::Dirbase => {
                if !user {
                    self.dirbase.0 = val & !DIRBASE_ITI;
                }
            }
            ControlReg::Db => {
                if !user {
                    self.db = val;
                }
            }
            ControlReg::Fsr => self.fsr.0 = val,
            ControlReg::Epsr => {
                let keep = if user {
                    EPSR_READ_ONLY_MASK | EPSR_USER_READ_ONLY_MASK
                } else {
                    EPSR_READ_ONLY_MASK
                };
                self.epsr.0 = (self.epsr.0 & keep) | (val & !keep);
            }
        }
        self.read(reg) != before
    }
}
