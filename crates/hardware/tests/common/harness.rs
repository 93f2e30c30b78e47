//! Stage drivers for tests.
//!
//! Two levels are provided:
//! - [`DecodeHarness`] drives the decode stage port by port: the test decides
//!   exactly which fetch pair, forward token and feedback record each cycle sees.
//! - [`ProgramRunner`] wires decode and writeback together with a one-slot-latency
//!   fetch model and a minimal execute model, so whole programs can be run.

use rv32hls_core::common::constants::INSTRUCTION_SIZE;
use rv32hls_core::common::error::PipelineError;
use rv32hls_core::config::Config;
use rv32hls_core::core::pipeline::latches::{
    DecodeOut, ExecuteResult, FetchPacket, FetchRedirect, ForwardToken, ImemWord, Tag, WbFeedback,
};
use rv32hls_core::core::pipeline::signals::{AluOp, AluSrc};
use rv32hls_core::core::pipeline::traits::{CycleSummary, PipelineStage, StepOutcome};
use rv32hls_core::soc::FlatMemory;
use rv32hls_core::{DecodePorts, DecodeStage, WritebackPorts, WritebackStage};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber (filtered by `RUST_LOG`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ══════════════════════════════════════════════════════════
// Port-level decode driver
// ══════════════════════════════════════════════════════════

/// Everything one decode cycle produced.
#[derive(Debug)]
pub struct Cycle {
    pub result: Result<StepOutcome, PipelineError>,
    pub out: Option<DecodeOut>,
    pub redirect: Option<FetchRedirect>,
}

impl Cycle {
    /// Summary of a completed, fault-free cycle.
    pub fn summary(&self) -> CycleSummary {
        match &self.result {
            Ok(StepOutcome::Completed(summary)) => *summary,
            other => panic!("expected a completed cycle, got {other:?}"),
        }
    }

    /// The control word pushed to execute, which must exist.
    pub fn pushed(&self) -> DecodeOut {
        self.out.expect("decode should have pushed to execute")
    }
}

pub struct DecodeHarness {
    pub stage: DecodeStage,
    pub ports: DecodePorts,
}

impl Default for DecodeHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeHarness {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        Self {
            stage: DecodeStage::new(config),
            ports: DecodePorts::new(),
        }
    }

    /// Queues an execute forward token for the next cycle.
    pub fn forward(&mut self, pc: u32, data: u32) {
        self.ports.forward.clear();
        self.ports
            .forward
            .push(ForwardToken {
                pc,
                data,
                is_load_store: false,
            })
            .unwrap();
    }

    /// Queues a load/store forward token (address, never forwarded).
    pub fn forward_load_store(&mut self, pc: u32, addr: u32) {
        self.ports.forward.clear();
        self.ports
            .forward
            .push(ForwardToken {
                pc,
                data: addr,
                is_load_store: true,
            })
            .unwrap();
    }

    /// Queues a writeback record for the next cycle.
    pub fn writeback(&mut self, rd: usize, data: u32, pc: u32) {
        self.ports.feedback.clear();
        self.ports
            .feedback
            .push(WbFeedback {
                regwrite: true,
                rd,
                data,
                tag: Tag::default(),
                pc,
            })
            .unwrap();
    }

    /// Presents one fetched pair, steps decode and drains both outputs.
    pub fn cycle(&mut self, pc: u32, insn: u32) -> Cycle {
        self.ports.fetch.push(FetchPacket { pc }).unwrap();
        self.ports.imem.push(ImemWord { instr: insn }).unwrap();
        let result = self.stage.step(&mut self.ports);
        Cycle {
            result,
            out: self.ports.execute.pop_nb(),
            redirect: self.ports.redirect.pop_nb(),
        }
    }

    /// Feeds `program` at sequential PCs starting from `base`, one word per cycle.
    pub fn sequence(&mut self, base: u32, program: &[u32]) -> Vec<Cycle> {
        program
            .iter()
            .enumerate()
            .map(|(i, &insn)| self.cycle(base + (i as u32) * INSTRUCTION_SIZE, insn))
            .collect()
    }
}

// ══════════════════════════════════════════════════════════
// Whole-program runner
// ══════════════════════════════════════════════════════════

/// Cycles run after the end-of-program word so in-flight writes land.
const DRAIN_CYCLES: u32 = 4;

/// Decode + execute model + writeback over a flat data memory.
///
/// Timing: an instruction dispatched in cycle `c` is executed in `c` (its
/// forward token is visible to decode in `c + 1`) and written back in `c + 1`
/// (the feedback is visible to decode in `c + 2`). Fetch has one slot of
/// latency: a redirect or freeze sent in cycle `c` steers the slot presented
/// in `c + 2`.
pub struct ProgramRunner {
    pub decode: DecodeStage,
    pub dports: DecodePorts,
    pub writeback: WritebackStage<FlatMemory>,
    pub wports: WritebackPorts,
    pub dispatched: Vec<DecodeOut>,
    program: Vec<u32>,
    inflight: u32,
    next: u32,
}

impl ProgramRunner {
    pub fn new(program: &[u32]) -> Self {
        Self::with_config(program, &Config::default())
    }

    pub fn with_config(program: &[u32], config: &Config) -> Self {
        init_tracing();
        Self {
            decode: DecodeStage::new(config),
            dports: DecodePorts::new(),
            writeback: WritebackStage::new(FlatMemory::from_config(&config.memory)),
            wports: WritebackPorts::new(),
            dispatched: Vec::new(),
            program: program.to_vec(),
            inflight: 0,
            next: INSTRUCTION_SIZE,
        }
    }

    pub fn reg(&self, r: usize) -> u32 {
        self.decode.gpr().read(r)
    }

    fn word_at(&self, pc: u32) -> u32 {
        self.program
            .get((pc / INSTRUCTION_SIZE) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Runs one clock edge across all modeled stages.
    pub fn tick(&mut self) -> Result<StepOutcome, PipelineError> {
        let _ = self.writeback.step(&mut self.wports)?;

        if self.dports.fetch.has_room() {
            let pc = self.inflight;
            self.dports.fetch.push(FetchPacket { pc }).unwrap();
            self.dports
                .imem
                .push(ImemWord {
                    instr: self.word_at(pc),
                })
                .unwrap();
        }

        let result = self.decode.step(&mut self.dports);

        if let Some(msg) = self.dports.redirect.pop_nb() {
            self.inflight = self.next;
            self.next = if msg.redirect || msg.freeze {
                msg.address
            } else {
                self.next.wrapping_add(INSTRUCTION_SIZE)
            };
        }

        if let Some(out) = self.dports.execute.pop_nb() {
            let alu_res = execute(&out);
            if out.ctrl.regwrite {
                self.dports.forward.clear();
                self.dports
                    .forward
                    .push(ForwardToken {
                        pc: out.ctrl.pc,
                        data: alu_res,
                        is_load_store: out.ctrl.load.is_load() || out.ctrl.store.is_store(),
                    })
                    .unwrap();
            }
            self.wports
                .input
                .push(ExecuteResult {
                    alu_res,
                    store_data: out.rs2,
                    load: out.ctrl.load,
                    store: out.ctrl.store,
                    regwrite: out.ctrl.regwrite,
                    memtoreg: out.ctrl.memtoreg,
                    dest_reg: out.ctrl.dest_reg,
                    tag: out.tag,
                    pc: out.ctrl.pc,
                })
                .unwrap();
            self.dispatched.push(out);
        }

        if let Some(fb) = self.wports.feedback.pop_nb() {
            self.dports.feedback.clear();
            self.dports.feedback.push(fb).unwrap();
        }

        result
    }

    /// Runs until the end-of-program word is dispatched, then drains.
    ///
    /// Returns the number of cycles run before the end was seen.
    pub fn run_until_end(&mut self, max_cycles: u32) -> u32 {
        for cycle in 0..max_cycles {
            let _ = self.tick().unwrap();
            if self.decode.program_end() {
                for _ in 0..DRAIN_CYCLES {
                    let _ = self.tick().unwrap();
                }
                return cycle;
            }
        }
        panic!("program did not reach its end within {max_cycles} cycles");
    }
}

/// Minimal ALU used by [`ProgramRunner`]; enough for RV32I + MUL tests.
fn execute(out: &DecodeOut) -> u32 {
    let c = &out.ctrl;
    let a = out.rs1;
    let b = match c.alu_src {
        AluSrc::Rs2 => out.rs2,
        AluSrc::Shamt => c.imm & 0x1F,
        AluSrc::ImmI | AluSrc::ImmS | AluSrc::ImmU => c.imm,
    };
    match c.alu_op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a << (b & 0x1F),
        AluOp::Slt => u32::from((a as i32) < (b as i32)),
        AluOp::Sltu => u32::from(a < b),
        AluOp::Xor => a ^ b,
        AluOp::Srl => a >> (b & 0x1F),
        AluOp::Sra => ((a as i32) >> (b & 0x1F)) as u32,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Lui => b,
        AluOp::Auipc => c.pc.wrapping_add(b),
        AluOp::Jal | AluOp::Jalr => c.pc.wrapping_add(INSTRUCTION_SIZE),
        AluOp::Mul => a.wrapping_mul(b),
        _ => 0,
    }
}
