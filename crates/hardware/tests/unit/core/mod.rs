//! # Core Tests
