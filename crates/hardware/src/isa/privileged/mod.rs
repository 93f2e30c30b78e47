//! Privileged Architecture Definitions.
//!
//! Defines constants for the slice of the RISC-V Privileged Specification the
//! core touches: trap causes and system opcodes.
//!
//! # Modules
//!
//! - `cause`: Exception cause codes.
//! - `opcodes`: System instruction opcodes (CSR access, ECALL, EBREAK).

/// Exception cause code definitions.
pub mod cause;

/// System instruction opcodes (CSR access, ECALL, EBREAK).
pub mod opcodes;
