//! # Unit Components
//!
//! This module mirrors `src/` and organizes the tests for each building block
//! of the model: ISA helpers, the pipeline core, the data memory, configuration
//! loading and statistics.

/// Configuration defaults and JSON loading.
pub mod config;

/// Core tests: functional units, pipeline building blocks and both stages.
pub mod core;


/// SoC tests: the flat data memory.
pub mod soc;
