//! Writeback (WB) Stage.
//!
//! This module implements the stage after execute. It performs the following:
//! 1. **Memory Access:** Loads read the addressed word and slice out their lane;
//!    stores position their value in its lane and write with a byte enable.
//! 2. **Result Selection:** `memtoreg` picks the loaded value over the ALU result.
//! 3. **Feedback:** Sends the register write back to decode, tagged with the
//!    instruction's PC so decode can clear the matching sentinel.

use tracing::{trace, warn};

use crate::common::error::PipelineError;
use crate::core::pipeline::channel::Channel;
use crate::core::pipeline::latches::{ExecuteResult, WbFeedback};
use crate::core::pipeline::traits::{CycleSummary, PipelineStage, StepOutcome};
use crate::core::units::lsu;
use crate::soc::traits::DataMemory;

/// Channels touched by the writeback stage.
#[derive(Debug)]
pub struct WritebackPorts {
    /// Execute → writeback (blocking).
    pub input: Channel<ExecuteResult>,
    /// Writeback → decode.
    pub feedback: Channel<WbFeedback>,
}

impl Default for WritebackPorts {
    fn default() -> Self {
        Self::new()
    }
}

impl WritebackPorts {
    /// Creates the port bundle with both channels empty.
    pub const fn new() -> Self {
        Self {
            input: Channel::new("execute_result"),
            feedback: Channel::new("feedback"),
        }
    }
}

/// Writeback stage owning its data memory.
#[derive(Debug)]
pub struct WritebackStage<M> {
    mem: M,
}

impl<M: DataMemory> WritebackStage<M> {
    /// Creates a writeback stage in front of `mem`.
    pub const fn new(mem: M) -> Self {
        Self { mem }
    }

    /// Borrows the data memory.
    pub const fn memory(&self) -> &M {
        &self.mem
    }

    /// Mutably borrows the data memory (e.g. to preload data).
    pub const fn memory_mut(&mut self) -> &mut M {
        &mut self.mem
    }

    /// Performs the memory access of one executed instruction.
    ///
    /// # Returns
    ///
    /// The loaded register value (zero if the instruction is not a load).
    fn access(&mut self, input: &ExecuteResult) -> u32 {
        let addr = input.alu_res;
        let word_addr = lsu::word_address(addr);

        if input.load.is_load() {
            if lsu::load_misaligned(addr, input.load) {
                warn!(
                    pc = format_args!("{:#010x}", input.pc),
                    addr = format_args!("{addr:#010x}"),
                    kind = ?input.load,
                    "misaligned load"
                );
            }
            let word = self.mem.read_word(word_addr);
            lsu::extract_load(word, addr, input.load)
        } else {
            if input.store.is_store() {
                if lsu::store_misaligned(addr, input.store) {
                    warn!(
                        pc = format_args!("{:#010x}", input.pc),
                        addr = format_args!("{addr:#010x}"),
                        kind = ?input.store,
                        "misaligned store"
                    );
                }
                let lane = lsu::position_store(input.store_data, addr, input.store);
                self.mem.write_word(word_addr, lane.data, lane.byte_enable);
            }
            0
        }
    }
}

impl<M: DataMemory> PipelineStage for WritebackStage<M> {
    type Ports = WritebackPorts;

    fn step(&mut self, ports: &mut WritebackPorts) -> Result<StepOutcome, PipelineError> {
        if !(ports.input.is_ready() && ports.feedback.has_room()) {
            return Ok(StepOutcome::Blocked);
        }

        let input = ports.input.pop()?;
        let loaded = self.access(&input);
        let feedback = WbFeedback {
            regwrite: input.regwrite,
            rd: input.dest_reg,
            data: if input.memtoreg { loaded } else { input.alu_res },
            tag: input.tag,
            pc: input.pc,
        };
        ports.feedback.push(feedback)?;

        trace!(
            pc = format_args!("{:#010x}", feedback.pc),
            tag = %feedback.tag,
            regwrite = feedback.regwrite,
            rd = feedback.rd,
            data = format_args!("{:#010x}", feedback.data),
            "writeback"
        );

        Ok(StepOutcome::Completed(CycleSummary {
            pushed: Some(input.tag),
            ..CycleSummary::default()
        }))
    }

    /// Writeback keeps no state besides its memory, which survives reset.
    fn reset(&mut self) {}
}
