//! Data Hazard Detection and Forwarding.
//!
//! This module implements the decode stage's forwarding unit. It provides:
//! 1. **Operand Forwarding:** Replaces a register-file read with execute's value
//!    when the forward token belongs to the register's pending writer.
//! 2. **Hazard Detection:** Flags an operand whose pending write was neither
//!    forwarded nor produced by the instruction reading it.

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::ForwardToken;
use crate::core::pipeline::scoreboard::Scoreboard;

/// Result of reading one source operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandRead {
    /// Operand value handed to execute.
    pub value: u32,
    /// `true` if the value came from the forward token.
    pub forwarded: bool,
}

/// Reads a source operand, forwarding from execute when possible.
///
/// Forwarding succeeds when the register's sentinel is valid, the forward
/// token's PC equals the sentinel's PC, and the token is not flagged as a
/// load/store (whose ALU value is an address, not the result). Otherwise the
/// register file value is returned; it may be stale, which [`has_hazard`] reports.
///
/// # Arguments
///
/// * `gpr` - Register file, already updated by this cycle's writeback feedback.
/// * `sentinels` - Pending-writer table.
/// * `fwd` - The forward token in effect this cycle.
/// * `reg` - Source register index.
///
/// # Returns
///
/// The operand value and whether it was forwarded.
pub fn read_operand(gpr: &Gpr, sentinels: &Scoreboard, fwd: &ForwardToken, reg: usize) -> OperandRead {
    match sentinels.pending(reg) {
        Some(pc) if !fwd.is_load_store && fwd.pc == pc => OperandRead {
            value: fwd.data,
            forwarded: true,
        },
        _ => OperandRead {
            value: gpr.read(reg),
            forwarded: false,
        },
    }
}

/// Checks whether an operand is blocked on an unresolved write.
///
/// # Arguments
///
/// * `sentinels` - Pending-writer table.
/// * `reg` - Source register index.
/// * `forward_success` - Sticky per-operand flag: set once the operand was
///   forwarded, or when the instruction itself armed the sentinel.
///
/// # Returns
///
/// `true` if the stage must freeze for this operand.
pub const fn has_hazard(sentinels: &Scoreboard, reg: usize, forward_success: bool) -> bool {
    sentinels.is_pending(reg) && !forward_success
}
