//! Instruction Decode (ID) Stage.
//!
//! This module implements the decode stage as a per-cycle step function. Each completed
//! cycle performs the following, in order:
//! 1. **Intake:** Takes the forward token, the fetched PC/instruction pair and the
//!    writeback feedback (register write before operand read).
//! 2. **Stream Check:** Accepts the fetched instruction only if it continues the
//!    stream this stage predicted; otherwise the slot is a wrong-path bubble.
//! 3. **Register Read:** Reads both source operands with forwarding from execute.
//! 4. **Resolution:** Computes jump and branch targets and the branch condition.
//! 5. **Control Generation:** Builds the control word from the decode table and
//!    applies the stall controller's freeze/flush decision.
//! 6. **Output:** Sends the redirect message to fetch every cycle and the control
//!    word to execute whenever the stage is not frozen.

use tracing::{debug, error, info, trace};

use crate::common::constants::{END_OF_PROGRAM, INSTRUCTION_SIZE};
use crate::common::error::{DecodeError, PipelineError, Trap};
use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::channel::Channel;
use crate::core::pipeline::control::{DecodeTable, Decoded, trap_control_word};
use crate::core::pipeline::hazards::{has_hazard, read_operand};
use crate::core::pipeline::latches::{
    DecodeOut, FetchPacket, FetchRedirect, ForwardToken, ImemWord, Tag, WbFeedback,
};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::signals::ControlWord;
use crate::core::pipeline::stall::{ControllerState, StallController, StallInputs};
use crate::core::pipeline::traits::{CycleSummary, PipelineStage, StepOutcome};
use crate::core::units::bru::{self, Flow, Resolution};
use crate::isa::disasm::disassemble;
use crate::isa::instruction::InstructionBits;
use crate::stats::SimStats;

/// Channels touched by the decode stage.
#[derive(Debug)]
pub struct DecodePorts {
    /// Fetch → decode: PC of the fetched word (blocking).
    pub fetch: Channel<FetchPacket>,
    /// Instruction memory → decode: the fetched word (blocking).
    pub imem: Channel<ImemWord>,
    /// Execute → decode: forward token (non-blocking).
    pub forward: Channel<ForwardToken>,
    /// Writeback → decode: register write (non-blocking).
    pub feedback: Channel<WbFeedback>,
    /// Decode → execute: control word and operands.
    pub execute: Channel<DecodeOut>,
    /// Decode → fetch: freeze/redirect message, every completed cycle.
    pub redirect: Channel<FetchRedirect>,
}

impl Default for DecodePorts {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodePorts {
    /// Creates the port bundle with every channel empty.
    pub const fn new() -> Self {
        Self {
            fetch: Channel::new("fetch"),
            imem: Channel::new("imem"),
            forward: Channel::new("forward"),
            feedback: Channel::new("feedback"),
            execute: Channel::new("execute"),
            redirect: Channel::new("redirect"),
        }
    }

    /// Returns `true` if a cycle can complete: both blocking inputs hold data
    /// and both outputs have room.
    pub const fn can_step(&self) -> bool {
        self.fetch.is_ready()
            && self.imem.is_ready()
            && self.execute.has_room()
            && self.redirect.has_room()
    }
}

/// Decode stage state.
///
/// Owns the register file, the sentinel table and the stall controller. The
/// fetched pair is buffered so a frozen or flushing cycle can keep presenting
/// the current instruction while the channels keep draining.
#[derive(Debug)]
pub struct DecodeStage {
    reset_pc: u32,
    table: DecodeTable,
    gpr: Gpr,
    sentinels: Scoreboard,
    controller: StallController,

    pc: u32,
    insn: u32,
    fetch_in: FetchPacket,
    imem_in: ImemWord,
    fwd: ForwardToken,
    prediction: Resolution,
    forward_success: [bool; 2],

    load_pending: bool,
    load_pc: u32,

    next_tag: Tag,
    stats: SimStats,
}

impl DecodeStage {
    /// Creates a decode stage in its reset state.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the reset PC and the enabled extensions.
    pub fn new(config: &Config) -> Self {
        let reset_pc = config.general.reset_pc;
        Self {
            reset_pc,
            table: DecodeTable::new(&config.isa),
            gpr: Gpr::new(),
            sentinels: Scoreboard::new(),
            controller: StallController::new(),
            pc: reset_pc,
            insn: 0,
            fetch_in: FetchPacket::default(),
            imem_in: ImemWord::default(),
            fwd: ForwardToken::default(),
            prediction: Resolution::default(),
            forward_success: [false; 2],
            load_pending: false,
            load_pc: reset_pc,
            next_tag: Tag::default(),
            stats: SimStats::default(),
        }
    }

    /// PC of the instruction currently presented.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Instruction word currently presented.
    pub const fn insn(&self) -> u32 {
        self.insn
    }

    /// Register file.
    pub const fn gpr(&self) -> &Gpr {
        &self.gpr
    }

    /// Pending-writer sentinels.
    pub const fn sentinels(&self) -> &Scoreboard {
        &self.sentinels
    }

    /// Controller state after the last completed cycle.
    pub const fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// `true` while a dispatched load has not been written back.
    pub const fn load_pending(&self) -> bool {
        self.load_pending
    }

    /// Instruction counters and stall statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// `true` once the end-of-program word has been accepted.
    pub const fn program_end(&self) -> bool {
        self.stats.program_end
    }

    /// `true` if the fetched PC does not continue the predicted stream.
    fn off_stream(&self, fetched_pc: u32) -> bool {
        let p = &self.prediction;
        (p.jump && p.jump_target != fetched_pc)
            || (p.branch && p.branch_target != fetched_pc)
            || (!p.jump && !p.branch && fetched_pc != self.pc.wrapping_add(INSTRUCTION_SIZE))
    }

    /// Applies a writeback record: load completion, register write, sentinel clear.
    fn apply_feedback(&mut self, fb: &WbFeedback) {
        if self.load_pending && fb.pc == self.load_pc {
            self.load_pending = false;
            debug!(pc = format_args!("{:#010x}", fb.pc), "load written back");
        }
        if fb.regwrite && fb.rd != 0 {
            self.gpr.write(fb.rd, fb.data);
            if self.sentinels.clear_if_match(fb.rd, fb.pc) {
                debug!(
                    rd = fb.rd,
                    pc = format_args!("{:#010x}", fb.pc),
                    "sentinel cleared"
                );
            }
        }
    }

    /// Latches the buffered fetch pair as the current instruction.
    fn accept(&mut self) {
        self.pc = self.fetch_in.pc;
        self.insn = self.imem_in.instr;
        self.forward_success = [false; 2];
        self.stats.counters.record(self.insn);
    }

    /// Latches `program_end` the first time the end word leaves decode.
    fn end_of_program(&mut self, dispatch: bool) -> bool {
        if !dispatch || self.insn != END_OF_PROGRAM || self.stats.program_end {
            return false;
        }
        self.stats.program_end = true;
        info!(pc = format_args!("{:#010x}", self.pc), "end of program");
        debug!("register file\n{}", self.gpr);
        true
    }

    /// Decodes the current instruction.
    ///
    /// A decode fault yields the trap-marked no-op together with the fault.
    fn decode_current(&self) -> (Decoded, Option<DecodeError>) {
        if self.insn == 0 {
            let bubble = Decoded {
                ctrl: ControlWord {
                    pc: self.pc,
                    ..ControlWord::default()
                },
                ..Decoded::default()
            };
            return (bubble, None);
        }
        match self.table.decode(self.insn, self.pc) {
            Ok(decoded) => (decoded, None),
            Err(fault) => {
                let trap = Trap::IllegalInstruction(self.insn);
                let decoded = Decoded {
                    ctrl: trap_control_word(self.insn, self.pc, trap),
                    flow: Flow::Sequential,
                    trap: Some(trap),
                };
                (decoded, Some(fault))
            }
        }
    }
}

impl PipelineStage for DecodeStage {
    type Ports = DecodePorts;

    fn step(&mut self, ports: &mut DecodePorts) -> Result<StepOutcome, PipelineError> {
        if !ports.can_step() {
            self.stats.blocked_cycles += 1;
            trace!(pc = format_args!("{:#010x}", self.pc), "decode blocked");
            return Ok(StepOutcome::Blocked);
        }

        // ── Intake ────────────────────────────────────────
        if let Some(token) = ports.forward.pop_nb() {
            self.fwd = token;
        } else {
            // No producer this cycle: the stale token must not forward.
            self.fwd.is_load_store = true;
            trace!(pc = format_args!("{:#010x}", self.fwd.pc), "no forward token");
        }

        let fetched = ports.fetch.pop()?;
        let word = ports.imem.pop()?;
        let squashed = self.controller.flush();
        if squashed {
            self.stats.squashed += 1;
            trace!(pc = format_args!("{:#010x}", fetched.pc), "wrong-path slot discarded");
        } else {
            self.fetch_in = fetched;
            self.imem_in = word;
        }

        if let Some(fb) = ports.feedback.pop_nb() {
            self.apply_feedback(&fb);
        }

        // ── Stream check ──────────────────────────────────
        let frozen_before = self.controller.freeze();
        let flush_next = !frozen_before && self.off_stream(self.fetch_in.pc);
        if !frozen_before && !flush_next {
            self.accept();
        }

        // ── Register read with forwarding ─────────────────
        let rs1 = self.insn.rs1();
        let rs2 = self.insn.rs2();
        let op1 = read_operand(&self.gpr, &self.sentinels, &self.fwd, rs1);
        let op2 = read_operand(&self.gpr, &self.sentinels, &self.fwd, rs2);
        self.forward_success[0] |= op1.forwarded;
        self.forward_success[1] |= op2.forwarded;

        // ── Decode and resolve ────────────────────────────
        let (decoded, fault) = self.decode_current();
        let resolution = bru::resolve(self.insn, self.pc, op1.value, op2.value, decoded.flow);

        let hazard = has_hazard(&self.sentinels, rs1, self.forward_success[0])
            || has_hazard(&self.sentinels, rs2, self.forward_success[1]);
        let redirect = self.controller.evaluate(&StallInputs {
            hazard,
            load_pending: self.load_pending,
            flush_next,
            resolution,
            pc: self.pc,
        });
        self.prediction = resolution;

        let freeze = self.controller.freeze();
        let dispatch = !freeze && !flush_next && self.insn != 0;
        let program_end = self.end_of_program(dispatch);

        // ── Sentinel for the dispatched writer ────────────
        let mut ctrl = decoded.ctrl;
        if dispatch && ctrl.regwrite && ctrl.dest_reg != 0 {
            self.sentinels.set_pending(ctrl.dest_reg, self.pc);
            if rs1 == ctrl.dest_reg {
                self.forward_success[0] = true;
            }
            if rs2 == ctrl.dest_reg {
                self.forward_success[1] = true;
            }
            debug!(
                rd = ctrl.dest_reg,
                pc = format_args!("{:#010x}", self.pc),
                "sentinel set"
            );
        }

        if !dispatch {
            ctrl.bubble();
        }
        if ctrl.load.is_load() {
            self.load_pending = true;
            self.load_pc = self.pc;
        }

        // ── Output ────────────────────────────────────────
        ports.redirect.push(redirect)?;
        let trap = decoded.trap.filter(|_| dispatch);
        let pushed = if freeze {
            None
        } else {
            let tag = self.next_tag;
            self.next_tag = tag.next();
            ports.execute.push(DecodeOut {
                ctrl,
                rs1: op1.value,
                rs2: op2.value,
                tag,
                trap,
            })?;
            if let Some(trap) = trap {
                debug!(pc = format_args!("{:#010x}", self.pc), %trap, "trap marked");
            }
            self.stats.dispatched += 1;
            Some(tag)
        };

        let state = self.controller.state();
        self.stats.cycles += 1;
        match state {
            ControllerState::Frozen if self.load_pending => self.stats.stalls_load += 1,
            ControllerState::Frozen => self.stats.stalls_data += 1,
            ControllerState::Redirecting => self.stats.redirects += 1,
            ControllerState::Running => {}
        }

        trace!(
            pc = format_args!("{:#010x}", self.pc),
            insn = %disassemble(self.insn),
            %state,
            flush_next,
            tag = ?pushed,
            "decode cycle"
        );

        if let Some(source) = fault.filter(|_| dispatch) {
            self.stats.decode_faults += 1;
            error!(pc = format_args!("{:#010x}", self.pc), %source, "decode fault");
            return Err(PipelineError::Decode {
                pc: self.pc,
                source,
            });
        }

        Ok(StepOutcome::Completed(CycleSummary {
            pushed,
            state,
            squashed,
            program_end,
        }))
    }

    fn reset(&mut self) {
        self.gpr.reset();
        self.sentinels.flush();
        self.controller.reset();
        self.pc = self.reset_pc;
        self.insn = 0;
        self.fetch_in = FetchPacket::default();
        self.imem_in = ImemWord::default();
        self.fwd = ForwardToken::default();
        self.prediction = Resolution::default();
        self.forward_success = [false; 2];
        self.load_pending = false;
        self.load_pc = self.reset_pc;
        self.next_tag = Tag::default();
        self.stats = SimStats::default();
    }
}
