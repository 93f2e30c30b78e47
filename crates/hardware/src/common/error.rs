//! Trap and Error definitions.
//!
//! This module defines the error handling and trap mechanisms for the core. It provides:
//! 1. **Trap Representation:** The architectural causes the decoder can signal.
//! 2. **Decode Faults:** Illegal and build-disabled instructions, both fatal.
//! 3. **Plumbing Errors:** Channel handshake misuse and configuration loading failures.

use std::fmt;

use thiserror::Error;

use crate::isa::privileged::cause;

/// Architectural trap causes recognized by the decode stage.
///
/// The decoder only marks the intent: the control word is rewritten into a
/// non-committing CSRRWI aimed at `mcause` with the cause code in its zimm field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trap {
    /// Illegal instruction exception.
    ///
    /// The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Breakpoint exception raised by `EBREAK`.
    ///
    /// The associated value is the program counter.
    Breakpoint(u32),

    /// Environment call raised by `ECALL`.
    ///
    /// The associated value is the program counter.
    EnvironmentCall(u32),
}

impl Trap {
    /// Returns the exception code written to `mcause` for this trap.
    pub const fn code(self) -> u32 {
        match self {
            Self::IllegalInstruction(_) => cause::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => cause::BREAKPOINT,
            Self::EnvironmentCall(_) => cause::ENVIRONMENT_CALL_FROM_M_MODE,
        }
    }
}

impl fmt::Display for Trap {
    /// Formats the trap for display.
    ///
    /// # Arguments
    ///
    /// * `f` - The formatter to write to.
    ///
    /// # Returns
    ///
    /// A formatting result indicating success or failure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#010x})"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#x})"),
            Self::EnvironmentCall(pc) => write!(f, "EnvironmentCall({pc:#x})"),
        }
    }
}

/// Optional instruction-set extensions that can be switched off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Integer multiply/divide.
    M,
    /// CSR access plus `ECALL`/`EBREAK`.
    Zicsr,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M => f.write_str("M"),
            Self::Zicsr => f.write_str("Zicsr"),
        }
    }
}

/// Fatal decode faults.
///
/// Neither variant is retried: each indicates either a malformed program or a
/// mismatch between the program and the configured ISA.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Unrecognized opcode, or unrecognized funct code within a known opcode.
    #[error("illegal instruction {inst:#010x}: {reason}")]
    IllegalInstruction {
        /// Raw instruction word.
        inst: u32,
        /// Which field failed to match.
        reason: &'static str,
    },

    /// Recognized instruction whose extension is disabled in this build or config.
    #[error("instruction {inst:#010x} needs the disabled {feature} extension")]
    UnimplementedFeature {
        /// Raw instruction word.
        inst: u32,
        /// The extension that would implement it.
        feature: Feature,
    },
}

impl DecodeError {
    /// Raw instruction word that failed to decode.
    pub const fn inst(&self) -> u32 {
        match self {
            Self::IllegalInstruction { inst, .. } | Self::UnimplementedFeature { inst, .. } => {
                *inst
            }
        }
    }
}

/// Handshake misuse on a single-slot channel.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// Push attempted while the consumer has not drained the previous value.
    #[error("channel `{0}` is full")]
    Full(&'static str),

    /// Blocking pop attempted with no value available.
    #[error("channel `{0}` is empty")]
    Empty(&'static str),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid JSON for [`crate::config::Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors returned by a stage's per-cycle step.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The dispatched instruction failed to decode.
    ///
    /// The cycle has completed (a trap-marked no-op was pushed) before this is returned.
    #[error("decode fault at pc {pc:#010x}")]
    Decode {
        /// Program counter of the faulting instruction.
        pc: u32,
        /// Underlying decode fault.
        #[source]
        source: DecodeError,
    },

    /// A channel operation was attempted outside the handshake discipline.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}
