//! PC-tagged sentinel scoreboard for register dependency tracking.
//!
//! Maps each architectural register to the PC of the in-flight instruction
//! that will write it, or `None` if the register file already holds the value.
//! Decode sets an entry when it dispatches a writer and the writeback feedback
//! clears it. Matching on the PC rather than the register alone keeps an older
//! writer's feedback from clearing the entry of a newer writer to the same register.

use crate::common::constants::REG_COUNT;

/// One sentinel per register: `Some(pending_pc)` while a write is in flight.
///
/// Each register has exactly one slot, so at most one sentinel per register can
/// be valid at any time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    /// GPR sentinels (x0 always None: hardwired zero).
    gpr: [Option<u32>; REG_COUNT],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Create a new scoreboard with all sentinels clear.
    pub const fn new() -> Self {
        Self {
            gpr: [None; REG_COUNT],
        }
    }

    /// Mark a register as having a pending writer at the given PC.
    /// No-op for x0 (hardwired zero).
    pub const fn set_pending(&mut self, reg: usize, pc: u32) {
        if reg != 0 {
            self.gpr[reg] = Some(pc);
        }
    }

    /// PC of the pending writer for a register, if its sentinel is valid.
    pub const fn pending(&self, reg: usize) -> Option<u32> {
        self.gpr[reg]
    }

    /// Returns `true` if the register's sentinel is valid.
    pub const fn is_pending(&self, reg: usize) -> bool {
        self.gpr[reg].is_some()
    }

    /// Clear a register's sentinel, but ONLY if it was set by the instruction at `pc`.
    ///
    /// # Returns
    ///
    /// `true` if the sentinel was cleared.
    pub fn clear_if_match(&mut self, reg: usize, pc: u32) -> bool {
        let slot = &mut self.gpr[reg];
        if *slot == Some(pc) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Number of registers with a valid sentinel.
    pub fn pending_count(&self) -> usize {
        self.gpr.iter().filter(|s| s.is_some()).count()
    }

    /// Flush: clear all sentinels.
    pub const fn flush(&mut self) {
        self.gpr = [None; REG_COUNT];
    }
}
