//! RV32 decode/writeback pipeline model.
//!
//! This crate models, one clock edge at a time, the decode and writeback stages of a
//! small in-order RISC-V core (RV32I, optional M and Zicsr) built for high-level synthesis:
//! 1. **Core:** Decode stage (register file, hazard sentinels, forwarding, branch resolution,
//!    freeze/flush controller) and writeback stage (load slicing, store positioning).
//! 2. **Channels:** Single-slot handoff channels carrying the back-pressure discipline between stages.
//! 3. **ISA:** Opcode tables, immediate extraction and a disassembler for traces.
//! 4. **SoC:** A word-addressed data memory behind the writeback stage.
//! 5. **Simulation:** Configuration and instruction-category statistics.

/// Common types and constants (register geometry, traps, errors).
pub mod common;
/// Model configuration (reset PC, enabled extensions, memory size).
pub mod config;
/// CPU core (register file, pipeline stages, functional units).
pub mod core;
/// Instruction set (field extraction, immediates, RV32I/M, privileged, disassembly).
pub mod isa;
/// System-on-chip collaborators (data memory).
pub mod soc;
/// Instruction-category counters and stall statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Decode stage and its channel bundle; the stage owns the register file and sentinel table.
pub use crate::core::pipeline::stages::{DecodePorts, DecodeStage};
/// Writeback stage and its channel bundle; the stage talks to a [`soc::DataMemory`].
pub use crate::core::pipeline::stages::{WritebackPorts, WritebackStage};
/// Per-cycle stage interface.
pub use crate::core::pipeline::traits::{PipelineStage, StepOutcome};
