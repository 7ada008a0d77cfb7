//! Trap and Translation Result definitions.
//!
//! This module defines the error handling and trap mechanisms for the core. It provides:
//! 1. **Trap Representation:** Every synchronous fault and the asynchronous external interrupt.
//! 2. **Trap Classes:** The PSR trap bit each fault is reported through.
//! 3. **Translation Results:** The outcome of a virtual-to-physical address translation.
//! 4. **Host Errors:** Configuration and introspection failures, which are not traps.

use serde::Serialize;
use thiserror::Error;

use super::addr::PhysAddr;
use super::data::AccessType;

/// Architectural trap raised by an instruction or an external source.
///
/// Instruction handlers return `Result<(), Trap>`; the execution driver turns
/// an `Err` into trap-controller state and vectors on the same step. A trap is
/// never a host-level failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// No decode-table entry exists for the instruction word, or the encoding
    /// is architecturally reserved (e.g. a control transfer in a delay slot).
    #[error("undefined opcode {insn:#010x}")]
    UndefinedOpcode {
        /// The offending instruction word.
        insn: u32,
    },

    /// The `trap` instruction.
    #[error("software trap")]
    SoftwareTrap,

    /// `intovr` executed with `EPSR.OF` set.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A load or store whose effective address is not size-aligned.
    #[error("unaligned {access:?} at {addr:#010x}")]
    UnalignedAccess {
        /// The misaligned effective address.
        addr: u32,
        /// Whether the access was a read or a write.
        access: AccessType,
    },

    /// A page-directory or page-table entry rejected the access.
    #[error("page fault on {access:?} at {addr:#010x}")]
    PageFault {
        /// The virtual address that failed to translate.
        addr: u32,
        /// The kind of access that was attempted.
        access: AccessType,
    },

    /// A data access touched the byte addressed by `DB` with `PSR.BR`/`PSR.BW` set.
    #[error("data breakpoint at {addr:#010x}")]
    DataBreakpoint {
        /// The effective address of the access that matched.
        addr: u32,
    },

    /// A floating-point exception with `FSR.FTE` set.
    #[error("floating-point exception")]
    FloatingPoint,

    /// The external interrupt line, recognised while `PSR.IM` is set.
    #[error("external interrupt")]
    External,
}

impl Trap {
    /// Returns the class this trap is reported under.
    pub const fn class(&self) -> TrapClass {
        match self {
            Self::UndefinedOpcode { .. } | Self::SoftwareTrap | Self::IntegerOverflow => {
                TrapClass::InstructionFault
            }
            Self::PageFault {
                access: AccessType::Fetch,
                ..
            } => TrapClass::InstructionAccess,
            Self::UnalignedAccess { .. } | Self::PageFault { .. } | Self::DataBreakpoint { .. } => {
                TrapClass::DataAccess
            }
            Self::FloatingPoint => TrapClass::FloatingPoint,
            Self::External => TrapClass::External,
        }
    }
}

/// Trap class, one per PSR trap bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TrapClass {
    /// `PSR.IT`: undefined opcode, `trap`, `intovr`.
    InstructionFault,
    /// `PSR.IAT`: page fault on instruction fetch.
    InstructionAccess,
    /// `PSR.DAT`: data page fault, misalignment, data breakpoint.
    DataAccess,
    /// `PSR.FT`: floating-point fault.
    FloatingPoint,
    /// `PSR.IN`: external interrupt.
    External,
}

/// Result of a virtual-to-physical address translation operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    /// The translated physical address, or zero if translation failed.
    pub paddr: PhysAddr,
    /// Number of bus cycles consumed by the page walk.
    pub cycles: u64,
    /// Trap that occurred during translation, if any.
    pub trap: Option<Trap>,
}

impl TranslationResult {
    /// Creates a successful translation result.
    #[inline]
    pub const fn success(paddr: PhysAddr, cycles: u64) -> Self {
        Self {
            paddr,
            cycles,
            trap: None,
        }
    }

    /// Creates a translation result indicating a fault occurred.
    #[inline]
    pub const fn fault(trap: Trap, cycles: u64) -> Self {
        Self {
            paddr: PhysAddr(0),
            cycles,
            trap: Some(trap),
        }
    }

    /// Converts into a `Result` so callers can propagate the fault with `?`.
    #[inline]
    pub const fn into_result(self) -> Result<PhysAddr, Trap> {
        match self.trap {
            Some(trap) => Err(trap),
            None => Ok(self.paddr),
        }
    }
}

/// Failure to build a [`Config`](crate::config::Config) from its serialized form.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid JSON for the configuration schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but its value is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

/// A register name passed to the introspection API does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown register `{0}`")]
pub struct RegisterLookupError(pub String);
