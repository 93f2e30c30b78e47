//! Common types and constants used throughout the pipeline model.
//!
//! This module provides the building blocks shared by every stage. It includes:
//! 1. **Constants:** Register geometry, reset PC, end-of-program word, CSR addresses.
//! 2. **Error Handling:** Architectural trap causes and the library error enums.

/// Common constants used throughout the core.
pub mod constants;

/// Error types and trap definitions.
pub mod error;

pub use error::{ChannelError, ConfigError, DecodeError, Feature, PipelineError, Trap};
