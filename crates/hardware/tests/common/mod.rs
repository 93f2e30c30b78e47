//! Shared test infrastructure.


/// Stage drivers and the program runner.
pub mod harness;
