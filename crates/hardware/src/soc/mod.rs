//! System-on-Chip (SoC) Components.
//!
//! This module holds the collaborators the core talks to outside its own
//! pipeline: the data memory behind the writeback stage.

/// Flat word-addressed data memory.
pub mod memory;

/// Data memory trait definition.
pub mod traits;

pub use memory::FlatMemory;
pub use traits::DataMemory;
