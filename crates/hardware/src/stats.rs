//! Simulation statistics collection and reporting.
//!
//! This module tracks the decode stage's side outputs. It provides:
//! 1. **Instruction mix:** Monotonic counts of accepted instructions by category
//!    (jump, branch, memory, other) plus the total.
//! 2. **Stalls:** Cycles frozen on a data hazard or an in-flight load, and back-pressure cycles.
//! 3. **Control flow:** Redirects issued and wrong-path slots squashed.
//! 4. **End of program:** Whether the self-jump `0x0000006F` has been accepted.

use std::fmt::Write as _;

use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Instruction-category counters.
///
/// Only instructions the decode stage accepts are counted; a held or
/// re-presented instruction is counted once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionCounters {
    /// Every accepted instruction.
    pub total: u64,
    /// JAL and JALR.
    pub jump: u64,
    /// Conditional branches.
    pub branch: u64,
    /// Loads and stores.
    pub memory: u64,
    /// Everything else (ALU, CSR, system, bubbles).
    pub other: u64,
}

impl InstructionCounters {
    /// Counts one accepted instruction in its category.
    ///
    /// # Arguments
    ///
    /// * `inst` - Raw instruction word.
    pub fn record(&mut self, inst: u32) {
        match inst.opcode() {
            opcodes::OP_LOAD | opcodes::OP_STORE => self.memory += 1,
            opcodes::OP_JAL | opcodes::OP_JALR => self.jump += 1,
            opcodes::OP_BRANCH => self.branch += 1,
            _ => self.other += 1,
        }
        self.total += 1;
    }
}

/// Simulation statistics structure for the decode stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Instruction mix of accepted instructions.
    pub counters: InstructionCounters,
    /// Completed decode cycles.
    pub cycles: u64,
    /// Cycles skipped because an input was empty or an output was full.
    pub blocked_cycles: u64,
    /// Instructions pushed to execute (bubbles included).
    pub dispatched: u64,
    /// Frozen cycles caused by an unresolved operand.
    pub stalls_data: u64,
    /// Frozen cycles caused by an in-flight load.
    pub stalls_load: u64,
    /// Redirects sent to fetch.
    pub redirects: u64,
    /// Fetched slots discarded as wrong-path.
    pub squashed: u64,
    /// Instructions that failed to decode.
    pub decode_faults: u64,
    /// The end-of-program word has been accepted.
    pub program_end: bool,
}

impl SimStats {
    /// Renders a plain-text summary.
    ///
    /// Percentages are relative to completed cycles (or accepted instructions
    /// for the mix); a zero denominator is treated as one.
    pub fn report(&self) -> String {
        let cyc = self.cycles.max(1) as f64;
        let total = self.counters.total.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        let mut out = String::new();
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "RV32 DECODE STAGE STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "sim_cycles               {}", self.cycles);
        let _ = writeln!(out, "sim_blocked              {}", self.blocked_cycles);
        let _ = writeln!(out, "sim_insts                {}", self.counters.total);
        let _ = writeln!(out, "sim_dispatched           {}", self.dispatched);
        let _ = writeln!(out, "program_end              {}", self.program_end);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "INSTRUCTION MIX");
        for (name, n) in [
            ("op.jump", self.counters.jump),
            ("op.branch", self.counters.branch),
            ("op.memory", self.counters.memory),
            ("op.other", self.counters.other),
        ] {
            let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, total));
        }
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "STALLS AND FLUSHES");
        for (name, n) in [
            ("stalls.data", self.stalls_data),
            ("stalls.load", self.stalls_load),
            ("redirects", self.redirects),
            ("squashed", self.squashed),
        ] {
            let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, cyc));
        }
        let _ = writeln!(out, "  {:<22} {}", "decode_faults", self.decode_faults);
        let _ = writeln!(out, "==========================================================");
        out
    }
}
