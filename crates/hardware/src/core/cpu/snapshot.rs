//! Architectural register snapshots.
//!
//! A [`Snapshot`] copies every architectural register out of the core for
//! debuggers and tracing. Taking one has no effect on the core. Registers are
//! always listed in the same order: `pc fir psr dirbase db fsr epsr r0..r31 f0..f31`.

use std::fmt::Write as _;

use serde::Serialize;

use super::Cpu;
use crate::common::constants::{NUM_FPRS, NUM_GPRS};
use crate::common::error::RegisterLookupError;
use crate::soc::traits::Bus;

/// Names of the scalar registers, in snapshot order.
const SCALAR_NAMES: [&str; 7] = ["pc", "fir", "psr", "dirbase", "db", "fsr", "epsr"];

/// Copy of every architectural register.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Program counter.
    pub pc: u32,
    /// Fault instruction register.
    pub fir: u32,
    /// Processor status register.
    pub psr: u32,
    /// Page-directory base register.
    pub dirbase: u32,
    /// Data breakpoint register.
    pub db: u32,
    /// Floating-point status register.
    pub fsr: u32,
    /// Extended processor status register.
    pub epsr: u32,
    /// Integer registers `r0`-`r31`.
    pub r: [u32; NUM_GPRS],
    /// Floating-point registers `f0`-`f31` as single-precision words.
    pub f: [u32; NUM_FPRS],
}

impl Snapshot {
    /// Iterates `(name, value)` over every register in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (String, u32)> + '_ {
        let scalars = [
            self.pc,
            self.fir,
            self.psr,
            self.dirbase,
            self.db,
            self.fsr,
            self.epsr,
        ];
        let scalars = SCALAR_NAMES
            .iter()
            .zip(scalars)
            .map(|(name, v)| ((*name).to_string(), v));
        let gprs = self.r.iter().enumerate().map(|(i, &v)| (format!("r{i}"), v));
        let fprs = self.f.iter().enumerate().map(|(i, &v)| (format!("f{i}"), v));
        scalars.chain(gprs).chain(fprs)
    }

    /// Looks up a register by name (`pc`, `psr`, `r5`, `f12`, ...).
    ///
    /// # Returns
    ///
    /// The register's value, or `RegisterLookupError` for an unknown name.
    pub fn get(&self, name: &str) -> Result<u32, RegisterLookupError> {
        let unknown = || RegisterLookupError(name.to_string());
        match name {
            "pc" => return Ok(self.pc),
            "fir" => return Ok(self.fir),
            "psr" => return Ok(self.psr),
            "dirbase" => return Ok(self.dirbase),
            "db" => return Ok(self.db),
            "fsr" => return Ok(self.fsr),
            "epsr" => return Ok(self.epsr),
            _ => {}
        }
        let (bank, index): (&[u32], &str) = if let Some(idx) = name.strip_prefix('r') {
            (&self.r, idx)
        } else if let Some(idx) = name.strip_prefix('f') {
            (&self.f, idx)
        } else {
            return Err(unknown());
        };
        // Reject "r01" and "r+1", which `parse` would otherwise accept.
        if index.is_empty() || (index.len() > 1 && index.starts_with('0')) {
            return Err(unknown());
        }
        index
            .parse::<usize>()
            .ok()
            .and_then(|i| bank.get(i).copied())
            .ok_or_else(unknown)
    }

    /// Renders the registers that differ between two snapshots.
    ///
    /// # Returns
    ///
    /// One line per changed register, `name: 0xOLD -> 0xNEW`, in snapshot
    /// order. Empty when nothing changed.
    pub fn delta(old: &Self, new: &Self) -> String {
        let mut out = String::new();
        for ((name, before), (_, after)) in old.iter().zip(new.iter()) {
            if before != after {
                let _ = writeln!(out, "{name}: {before:#010x} -> {after:#010x}");
            }
        }
        out
    }
}

impl<B: Bus> Cpu<B> {
    /// Captures every architectural register.
    pub fn snapshot(&self) -> Snapshot {
        let mut r = [0u32; NUM_GPRS];
        for (slot, v) in r.iter_mut().zip(self.regs.gpr().iter()) {
            *slot = v;
        }
        let mut f = [0u32; NUM_FPRS];
        for (slot, v) in f.iter_mut().zip(self.regs.fpr().iter()) {
            *slot = v;
        }
        Snapshot {
            pc: self.pc,
            fir: self.ctrl.fir,
            psr: self.ctrl.psr.0,
            dirbase: self.ctrl.dirbase.0,
            db: self.ctrl.db,
            fsr: self.ctrl.fsr.0,
            epsr: self.ctrl.epsr.0,
            r,
            f,
        }
    }
}
