//! Pipeline stage implementations.
//!
//! This module contains the two modeled stages. It includes:
//! 1. **Decode:** Decodes instructions, reads and forwards operands, resolves
//!    control flow and runs the stall controller.
//! 2. **Writeback:** Performs the data memory access and feeds the register
//!    write back to decode.

/// Instruction decode stage implementation.
pub mod decode;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage and its channels.
pub use decode::{DecodePorts, DecodeStage};
/// Writeback stage and its channels.
pub use writeback::{WritebackPorts, WritebackStage};
