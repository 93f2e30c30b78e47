//! RISC-V Multiply/Divide Extension (M) Opcodes.
//!
//! The M extension shares the `OP_REG` opcode with base integer instructions.

/// M-Extension selector in funct7 field.
pub const M_EXTENSION: u32 = 0b0000001;
