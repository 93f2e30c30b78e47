//! Core processor implementation.
//!
//! This module contains the architectural register file, the decode and
//! writeback pipeline stages with their channels and control logic, and the
//! functional units those stages call into.

/// Architecture-specific components (register file).
pub mod arch;

/// Pipeline implementation (stages, channels, latches, hazards, signals).
pub mod pipeline;

/// Functional units (branch resolution, load/store alignment).
pub mod units;
