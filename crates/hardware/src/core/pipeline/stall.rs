//! Stall/Flush Controller.
//!
//! This module implements the decode stage's freeze/flush policy. It provides:
//! 1. **State Machine:** `Running`, `Frozen` (data or load hazard) and
//!    `Redirecting` (taken jump or branch, one flush cycle).
//! 2. **Priority Rules:** Hazards win over misprediction recovery, which wins
//!    over new redirects; first match per cycle.
//! 3. **Fetch Control:** The redirect message sent to fetch every cycle.
//!
//! The `freeze` and `flush` registers persist across cycles: the decode stage
//! reads them at the start of the next cycle to decide whether to accept a new
//! instruction and whether to discard the fetched slot.

use std::fmt;

use tracing::debug;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::latches::FetchRedirect;
use crate::core::units::bru::Resolution;

/// Controller state after a cycle's evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Instructions flow normally.
    #[default]
    Running,
    /// Held on an unresolved operand or an in-flight load.
    Frozen,
    /// Flushing the wrong-path slot after a taken jump or branch.
    Redirecting,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("RUNNING"),
            Self::Frozen => f.write_str("FROZEN"),
            Self::Redirecting => f.write_str("REDIRECTING"),
        }
    }
}

/// Per-cycle conditions the controller decides on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallInputs {
    /// An operand has a valid sentinel and was not forwarded.
    pub hazard: bool,
    /// A load is still waiting for its writeback.
    pub load_pending: bool,
    /// Fetch delivered a PC off the expected stream this cycle.
    pub flush_next: bool,
    /// Jump/branch resolution of the current instruction.
    pub resolution: Resolution,
    /// PC of the current instruction.
    pub pc: u32,
}

/// Freeze/flush state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallController {
    state: ControllerState,
    freeze: bool,
    flush: bool,
}

impl StallController {
    /// Creates a controller in the `Running` state.
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Running,
            freeze: false,
            flush: false,
        }
    }

    /// Returns the state chosen by the last evaluation.
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns `true` if the current instruction is held.
    pub const fn freeze(&self) -> bool {
        self.freeze
    }

    /// Returns `true` if the next fetched slot is wrong-path.
    pub const fn flush(&self) -> bool {
        self.flush
    }

    /// Returns the controller to `Running` with both registers cleared.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies the priority rules for one cycle.
    ///
    /// # Arguments
    ///
    /// * `inputs` - This cycle's hazard, load, stream and resolution signals.
    ///
    /// # Returns
    ///
    /// The redirect message for fetch. `address` is `pc + 4` unless a
    /// redirect is issued.
    pub fn evaluate(&mut self, inputs: &StallInputs) -> FetchRedirect {
        let fall_through = inputs.pc.wrapping_add(INSTRUCTION_SIZE);
        let prev = self.state;

        let msg = if inputs.hazard || inputs.load_pending {
            self.state = ControllerState::Frozen;
            self.freeze = true;
            self.flush = false;
            FetchRedirect {
                freeze: true,
                redirect: false,
                address: fall_through,
            }
        } else if inputs.flush_next {
            // Recovery already under way: the registers keep their values.
            self.state = ControllerState::Running;
            FetchRedirect {
                freeze: false,
                redirect: false,
                address: fall_through,
            }
        } else {
            match inputs.resolution.taken_target() {
                Some(target) if !self.flush && target != fall_through => {
                    self.state = ControllerState::Redirecting;
                    self.freeze = true;
                    self.flush = true;
                    FetchRedirect {
                        freeze: false,
                        redirect: true,
                        address: target,
                    }
                }
                _ => {
                    self.state = ControllerState::Running;
                    self.freeze = false;
                    self.flush = false;
                    FetchRedirect {
                        freeze: false,
                        redirect: false,
                        address: fall_through,
                    }
                }
            }
        };

        if prev != self.state {
            debug!(
                pc = format_args!("{:#010x}", inputs.pc),
                from = %prev,
                to = %self.state,
                "controller transition"
            );
        }
        msg
    }
}
