//! RISC-V architecture-specific components.
//!
//! The decode stage owns the only piece of architectural state in this model:
//! the general-purpose register file.

/// General-Purpose Register file implementation.
pub mod gpr;
