//! Global Core Constants.
//!
//! This module defines constants shared across the decode and writeback stages. It includes:
//! 1. **Architecture Constants:** Register count.
//! 2. **Program Flow Constants:** Reset PC, instruction size and the end-of-program word.
//! 3. **Trap Plumbing Constants:** The CSR address targeted by trap-marked control words.
//! 4. **Memory Constants:** Byte and lane geometry of a data memory word.

/// Number of architectural integer registers (`x0`-`x31`).
pub const REG_COUNT: usize = 32;

/// Size of an instruction in bytes (no compressed encodings).
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical pre-start program counter.
///
/// The decode stage expects the first fetched PC to equal `RESET_PC + 4`,
/// so a fetch stream starting at `0x0` is accepted without a flush.
pub const RESET_PC: u32 = 0xFFFF_FFFC;

/// `JAL x0, 0`: a jump to itself, used as the end-of-program marker.
pub const END_OF_PROGRAM: u32 = 0x0000_006F;

/// Address of the `mcause` CSR.
///
/// Trap-marked control words reuse the CSRRWI encoding aimed at this register.
pub const CSR_MCAUSE: u32 = 0x342;

/// Bits per byte.
pub const BYTE_BITS: u32 = 8;

/// Bytes per data memory word.
pub const WORD_BYTES: u32 = 4;

/// Byte-enable mask selecting all four lanes of a word.
pub const BYTE_ENABLE_ALL: u8 = 0b1111;
