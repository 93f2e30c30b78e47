//! Trace disassembler for RV32IM + Zicsr.
//!
//! Renders an instruction word as assembly text for per-cycle decode traces and
//! test diagnostics. The rendering is computed after the fact from the raw word
//! and never feeds back into the control word.
//!
//! Mnemonics live in one flat table keyed like the decode table, each entry
//! carrying the operand layout used to print it.
//!
//! # Usage
//!
//! ```
//! use rv32hls_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A0_0513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s};
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{funct3 as m_f3, opcodes as m_op};

/// ABI register names for x0-x31.
const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Operand layout of an assembly line.
#[derive(Clone, Copy)]
enum Operands {
    /// `rd, rs1, rs2`
    Reg,
    /// `rd, rs1, imm`
    Imm,
    /// `rd, rs1, shamt`
    Shift,
    /// `rd, imm(rs1)`
    Load,
    /// `rs2, imm(rs1)`
    Store,
    /// `rs1, rs2, offset`
    Branch,
    /// `rd, imm20`
    Upper,
    /// `rd, offset`
    Jump,
    /// `rd, csr, rs1`
    Csr,
    /// `rd, csr, zimm`
    CsrImm,
}

/// One mnemonic. `None` fields match any value.
struct Entry {
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
    name: &'static str,
    operands: Operands,
}

const fn entry(
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
    name: &'static str,
    operands: Operands,
) -> Entry {
    Entry {
        opcode,
        funct3,
        funct7,
        name,
        operands,
    }
}

const fn reg(f3: u32, f7: u32, name: &'static str) -> Entry {
    entry(i_op::OP_REG, Some(f3), Some(f7), name, Operands::Reg)
}

const fn imm(f3: u32, name: &'static str) -> Entry {
    entry(i_op::OP_IMM, Some(f3), None, name, Operands::Imm)
}

const fn shift(f3: u32, f7: u32, name: &'static str) -> Entry {
    entry(i_op::OP_IMM, Some(f3), Some(f7), name, Operands::Shift)
}

const fn load(f3: u32, name: &'static str) -> Entry {
    entry(i_op::OP_LOAD, Some(f3), None, name, Operands::Load)
}

const fn store(f3: u32, name: &'static str) -> Entry {
    entry(i_op::OP_STORE, Some(f3), None, name, Operands::Store)
}

const fn branch(f3: u32, name: &'static str) -> Entry {
    entry(i_op::OP_BRANCH, Some(f3), None, name, Operands::Branch)
}

const fn system(f3: u32, name: &'static str, operands: Operands) -> Entry {
    entry(sys_op::OP_SYSTEM, Some(f3), None, name, operands)
}

const MNEMONICS: &[Entry] = &[
    reg(i_f3::ADD_SUB, i_f7::DEFAULT, "add"),
    reg(i_f3::ADD_SUB, i_f7::ALT, "sub"),
    reg(i_f3::SLL, i_f7::DEFAULT, "sll"),
    reg(i_f3::SLT, i_f7::DEFAULT, "slt"),
    reg(i_f3::SLTU, i_f7::DEFAULT, "sltu"),
    reg(i_f3::XOR, i_f7::DEFAULT, "xor"),
    reg(i_f3::SRL_SRA, i_f7::DEFAULT, "srl"),
    reg(i_f3::SRL_SRA, i_f7::ALT, "sra"),
    reg(i_f3::OR, i_f7::DEFAULT, "or"),
    reg(i_f3::AND, i_f7::DEFAULT, "and"),
    reg(m_f3::MUL, m_op::M_EXTENSION, "mul"),
    reg(m_f3::MULH, m_op::M_EXTENSION, "mulh"),
    reg(m_f3::MULHSU, m_op::M_EXTENSION, "mulhsu"),
    reg(m_f3::MULHU, m_op::M_EXTENSION, "mulhu"),
    reg(m_f3::DIV, m_op::M_EXTENSION, "div"),
    reg(m_f3::DIVU, m_op::M_EXTENSION, "divu"),
    reg(m_f3::REM, m_op::M_EXTENSION, "rem"),
    reg(m_f3::REMU, m_op::M_EXTENSION, "remu"),
    shift(i_f3::SLL, i_f7::DEFAULT, "slli"),
    shift(i_f3::SRL_SRA, i_f7::DEFAULT, "srli"),
    shift(i_f3::SRL_SRA, i_f7::ALT, "srai"),
    imm(i_f3::ADD_SUB, "addi"),
    imm(i_f3::SLT, "slti"),
    imm(i_f3::SLTU, "sltiu"),
    imm(i_f3::XOR, "xori"),
    imm(i_f3::OR, "ori"),
    imm(i_f3::AND, "andi"),
    load(i_f3::LB, "lb"),
    load(i_f3::LH, "lh"),
    load(i_f3::LW, "lw"),
    load(i_f3::LBU, "lbu"),
    load(i_f3::LHU, "lhu"),
    store(i_f3::SB, "sb"),
    store(i_f3::SH, "sh"),
    store(i_f3::SW, "sw"),
    branch(i_f3::BEQ, "beq"),
    branch(i_f3::BNE, "bne"),
    branch(i_f3::BLT, "blt"),
    branch(i_f3::BGE, "bge"),
    branch(i_f3::BLTU, "bltu"),
    branch(i_f3::BGEU, "bgeu"),
    entry(i_op::OP_LUI, None, None, "lui", Operands::Upper),
    entry(i_op::OP_AUIPC, None, None, "auipc", Operands::Upper),
    entry(i_op::OP_JAL, None, None, "jal", Operands::Jump),
    entry(i_op::OP_JALR, Some(i_f3::JALR), None, "jalr", Operands::Load),
    system(sys_op::CSRRW, "csrrw", Operands::Csr),
    system(sys_op::CSRRS, "csrrs", Operands::Csr),
    system(sys_op::CSRRC, "csrrc", Operands::Csr),
    system(sys_op::CSRRWI, "csrrwi", Operands::CsrImm),
    system(sys_op::CSRRSI, "csrrsi", Operands::CsrImm),
    system(sys_op::CSRRCI, "csrrci", Operands::CsrImm),
];

/// Returns the ABI name for an integer register index.
fn abi(idx: usize) -> &'static str {
    ABI_NAMES.get(idx).copied().unwrap_or("x??")
}

fn lookup(inst: u32) -> Option<&'static Entry> {
    let (opcode, f3, f7) = (inst.opcode(), inst.funct3(), inst.funct7());
    MNEMONICS.iter().find(|e| {
        e.opcode == opcode
            && e.funct3.is_none_or(|v| v == f3)
            && e.funct7.is_none_or(|v| v == f7)
    })
}

/// Disassembles a 32-bit RISC-V instruction into assembly text.
///
/// Returns a line like `"add a0, a1, a2"`, `"bubble"` for the all-zero word, or
/// `"unknown (0x...)"` for anything the decoder would reject.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    match inst {
        0 => return "bubble".to_string(),
        sys_op::ECALL => return "ecall".to_string(),
        sys_op::EBREAK => return "ebreak".to_string(),
        _ => {}
    }

    let Some(e) = lookup(inst) else {
        return format!("unknown ({inst:#010x})");
    };

    let (rd, rs1, rs2) = (abi(inst.rd()), abi(inst.rs1()), abi(inst.rs2()));
    let name = e.name;
    match e.operands {
        Operands::Reg => format!("{name} {rd}, {rs1}, {rs2}"),
        Operands::Imm => format!("{name} {rd}, {rs1}, {}", imm_i(inst) as i32),
        Operands::Shift => format!("{name} {rd}, {rs1}, {}", inst.rs2()),
        Operands::Load => format!("{name} {rd}, {}({rs1})", imm_i(inst) as i32),
        Operands::Store => format!("{name} {rs2}, {}({rs1})", imm_s(inst) as i32),
        Operands::Branch => format!("{name} {rs1}, {rs2}, {}", imm_b(inst) as i32),
        Operands::Upper => format!("{name} {rd}, {:#x}", inst.upper()),
        Operands::Jump => format!("{name} {rd}, {}", imm_j(inst) as i32),
        Operands::Csr => format!("{name} {rd}, {:#05x}, {rs1}", inst.csr()),
        Operands::CsrImm => format!("{name} {rd}, {:#05x}, {}", inst.csr(), inst.rs1()),
    }
}
