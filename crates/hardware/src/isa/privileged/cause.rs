//! RISC-V Trap Cause Codes.
//!
//! Exception codes written to `mcause` by the trap-marked control words the
//! decoder emits. Only synchronous exceptions are raised by this core.

/// Illegal instruction.
pub const ILLEGAL_INSTRUCTION: u32 = 2;

/// Breakpoint (`EBREAK`).
pub const BREAKPOINT: u32 = 3;

/// Environment call from M-mode (`ECALL`; the core only runs in M-mode).
pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
