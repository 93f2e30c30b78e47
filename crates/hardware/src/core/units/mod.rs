//! Functional units.
//!
//! Pure combinational helpers the pipeline stages call into: branch/jump
//! resolution for decode, and load/store lane handling for writeback.

/// Branch Resolution Unit: jump targets and branch conditions.
pub mod bru;

/// Load/Store Unit: lane selection, extension and byte enables.
pub mod lsu;
