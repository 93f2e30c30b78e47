//! Branch Resolution Unit (BRU).
//!
//! Resolves control flow in the decode stage, one cycle after fetch. It provides:
//! 1. **Jump Targets:** JAL (`pc + imm`) and JALR (`(rs1 + imm) & !1`).
//! 2. **Branch Targets:** `pc + imm`, computed for every instruction whether or not it is consumed.
//! 3. **Branch Conditions:** The six RV32I comparisons; unknown `funct3` is not taken.

use crate::isa::decode::{imm_b, imm_i, imm_j};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::funct3;

/// Control-flow class of a decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Falls through to `pc + 4`.
    #[default]
    Sequential,
    /// Unconditional PC-relative jump.
    Jal,
    /// Unconditional register-indirect jump.
    Jalr,
    /// Conditional PC-relative branch.
    Branch,
}

/// Outcome of resolving one instruction's control flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The instruction is a jump.
    pub jump: bool,
    /// The instruction is a branch and its condition holds.
    pub branch: bool,
    /// Jump target (zero when not a jump).
    pub jump_target: u32,
    /// Branch target (always computed).
    pub branch_target: u32,
}

impl Resolution {
    /// The address the instruction steers fetch to, if it changes flow.
    pub const fn taken_target(&self) -> Option<u32> {
        if self.jump {
            Some(self.jump_target)
        } else if self.branch {
            Some(self.branch_target)
        } else {
            None
        }
    }
}

/// JAL target: sign-extended 21-bit offset added to the PC.
pub const fn jal_target(inst: u32, pc: u32) -> u32 {
    pc.wrapping_add(imm_j(inst))
}

/// JALR target: sign-extended 12-bit offset added to rs1, bit 0 cleared.
pub const fn jalr_target(inst: u32, rs1: u32) -> u32 {
    rs1.wrapping_add(imm_i(inst)) & !1
}

/// Branch target: sign-extended 13-bit offset added to the PC.
pub const fn branch_target(inst: u32, pc: u32) -> u32 {
    pc.wrapping_add(imm_b(inst))
}

/// Evaluates a branch condition.
///
/// # Arguments
///
/// * `f3` - The branch `funct3`.
/// * `a` - First operand (rs1).
/// * `b` - Second operand (rs2).
///
/// # Returns
///
/// Whether the branch is taken. Unknown `funct3` values are not taken.
pub const fn branch_taken(f3: u32, a: u32, b: u32) -> bool {
    match f3 {
        funct3::BEQ => a == b,
        funct3::BNE => a != b,
        funct3::BLT => (a as i32) < (b as i32),
        funct3::BGE => (a as i32) >= (b as i32),
        funct3::BLTU => a < b,
        funct3::BGEU => a >= b,
        _ => false,
    }
}

/// Resolves the control flow of one instruction.
///
/// # Arguments
///
/// * `inst` - Raw instruction word.
/// * `pc` - Its program counter.
/// * `rs1` - First operand value (possibly forwarded).
/// * `rs2` - Second operand value (possibly forwarded).
/// * `flow` - Control-flow class from the decode table.
pub fn resolve(inst: u32, pc: u32, rs1: u32, rs2: u32, flow: Flow) -> Resolution {
    let branch_target = branch_target(inst, pc);
    match flow {
        Flow::Sequential => Resolution {
            jump: false,
            branch: false,
            jump_target: 0,
            branch_target,
        },
        Flow::Jal => Resolution {
            jump: true,
            branch: false,
            jump_target: jal_target(inst, pc),
            branch_target,
        },
        Flow::Jalr => Resolution {
            jump: true,
            branch: false,
            jump_target: jalr_target(inst, rs1),
            branch_target,
        },
        Flow::Branch => Resolution {
            jump: false,
            branch: branch_taken(inst.funct3(), rs1, rs2),
            jump_target: 0,
            branch_target,
        },
    }
}
