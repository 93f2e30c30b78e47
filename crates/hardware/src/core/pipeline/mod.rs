//! Decode/writeback pipeline model.
//!
//! This module contains the cycle-level model of the decode stage and its writeback
//! collaborator. It includes the following components:
//! 1. **Channels:** Single-slot handoff links with back-pressure.
//! 2. **Control:** The decode table mapping instruction words to control words.
//! 3. **Hazards:** Sentinel-based hazard detection and operand forwarding.
//! 4. **Stall Controller:** Freeze/flush state machine and fetch redirects.
//! 5. **Stages:** The decode and writeback step functions and their port bundles.
//! 6. **Traits:** The common stage interface.

/// Single-slot handoff channel.
pub mod channel;

/// Decode table keyed by opcode, funct3 and funct7.
pub mod control;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Channel payloads (fetch packet, forward token, decode output, feedback).
pub mod latches;

/// Per-register pending-writer sentinels.
pub mod scoreboard;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (decode, writeback).
pub mod stages;

/// Freeze/flush controller.
pub mod stall;

/// Traits for pipeline stage components.
pub mod traits;
