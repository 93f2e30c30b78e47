//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) is used in R-type instructions to
//! distinguish between operations that share the same `funct3` (e.g., ADD vs SUB).
//! On RV32 it also selects between SRLI and SRAI, since the shift amount is only 5 bits.

/// Default operation (ADD, SRL, SLLI, SRLI, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA, SRAI).
pub const ALT: u32 = 0b0100000;
