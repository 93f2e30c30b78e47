//! Pipeline Stage Interface.
//!
//! This module defines the common contract for the modeled stages. It provides:
//! 1. **Pipeline Stage Interface:** One `step` per rising clock edge over a port bundle.
//! 2. **Step Outcome:** Whether the cycle ran and what it did.
//!
//! A step is all-or-nothing: if any blocking input is empty or any output is
//! full, the stage returns [`StepOutcome::Blocked`] without touching its state
//! or its channels.

use crate::common::error::PipelineError;
use crate::core::pipeline::latches::Tag;
use crate::core::pipeline::stall::ControllerState;

/// What a completed cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Tag of the instruction pushed downstream, if any.
    pub pushed: Option<Tag>,
    /// Controller state at the end of the cycle.
    pub state: ControllerState,
    /// The fetched slot was discarded as wrong-path.
    pub squashed: bool,
    /// The end-of-program word was accepted on this cycle.
    pub program_end: bool,
}

/// Result of one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An input was empty or an output full; nothing changed.
    Blocked,
    /// The cycle ran to completion.
    Completed(CycleSummary),
}

impl StepOutcome {
    /// Returns the summary of a completed cycle.
    pub const fn summary(&self) -> Option<&CycleSummary> {
        match self {
            Self::Blocked => None,
            Self::Completed(summary) => Some(summary),
        }
    }

    /// Returns `true` if the cycle did not run.
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// Represents a stage in the instruction pipeline.
pub trait PipelineStage {
    /// The channels the stage reads and writes.
    type Ports;

    /// Executes one cycle of the stage.
    ///
    /// # Arguments
    ///
    /// * `ports` - The stage's channels.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Decode`] after a cycle that dispatched an undecodable
    /// instruction; [`PipelineError::Channel`] on handshake misuse.
    fn step(&mut self, ports: &mut Self::Ports) -> Result<StepOutcome, PipelineError>;

    /// Restores the stage's reset state.
    fn reset(&mut self);
}
