//! Decode Table.
//!
//! This module maps a 32-bit instruction word to its control word. It provides:
//! 1. **Table Construction:** One closed table keyed by `(opcode, funct3, funct7)`,
//!    built once from the enabled extensions.
//! 2. **Lookup:** Exact match first, then a `funct7` wildcard, then an opcode-wide wildcard.
//! 3. **Trap Words:** ECALL/EBREAK and decode faults become a non-committing CSRRWI
//!    aimed at `mcause`, with the cause in the zimm field.
//!
//! Instructions of a disabled extension stay in the table as explicit
//! [`Slot::Disabled`] entries, so they fault as
//! [`DecodeError::UnimplementedFeature`] rather than as illegal.

use std::collections::{HashMap, HashSet};

use crate::common::constants::CSR_MCAUSE;
use crate::common::error::{DecodeError, Feature, Trap};
use crate::config::IsaConfig;
use crate::core::pipeline::signals::{AluOp, AluSrc, ControlWord, LoadKind, StoreKind};
use crate::core::units::bru::Flow;
use crate::isa::decode::{ImmFormat, immediate};
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{funct3 as m_f3, opcodes as m_op};

/// Bit position of the CSR address within `imm_u` (instruction bits 31:20).
const IMM_U_CSR_SHIFT: u32 = 8;

/// Bit position of the zimm field within `imm_u` (instruction bits 19:15).
const IMM_U_ZIMM_SHIFT: u32 = 3;

/// Low `imm_u` bits left untouched by a trap rewrite (instruction bits 14:12).
const IMM_U_FUNCT3_MASK: u32 = 0x7;

/// Control signals shared by every instruction that maps to a table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlTemplate {
    /// ALU operation.
    pub alu_op: AluOp,
    /// ALU second-operand source.
    pub alu_src: AluSrc,
    /// Load kind.
    pub load: LoadKind,
    /// Store kind.
    pub store: StoreKind,
    /// Register write enable.
    pub regwrite: bool,
    /// Write the loaded value instead of the ALU result.
    pub memtoreg: bool,
    /// Immediate format.
    pub format: ImmFormat,
    /// Control-flow class.
    pub flow: Flow,
}

impl ControlTemplate {
    /// Register-writing ALU operation.
    const fn alu(alu_op: AluOp, alu_src: AluSrc, format: ImmFormat) -> Self {
        Self {
            alu_op,
            alu_src,
            load: LoadKind::None,
            store: StoreKind::None,
            regwrite: true,
            memtoreg: false,
            format,
            flow: Flow::Sequential,
        }
    }

    const fn load(kind: LoadKind) -> Self {
        Self {
            load: kind,
            memtoreg: true,
            ..Self::alu(AluOp::Add, AluSrc::ImmI, ImmFormat::I)
        }
    }

    const fn store(kind: StoreKind) -> Self {
        Self {
            store: kind,
            regwrite: false,
            ..Self::alu(AluOp::Add, AluSrc::ImmS, ImmFormat::S)
        }
    }

    const fn jump(alu_op: AluOp, format: ImmFormat, flow: Flow) -> Self {
        Self {
            flow,
            ..Self::alu(alu_op, AluSrc::Rs2, format)
        }
    }

    const fn branch() -> Self {
        Self {
            regwrite: false,
            flow: Flow::Branch,
            ..Self::alu(AluOp::Null, AluSrc::Rs2, ImmFormat::B)
        }
    }

    /// Instantiates the template for one instruction.
    pub fn instantiate(&self, inst: u32, pc: u32) -> ControlWord {
        ControlWord {
            alu_op: self.alu_op,
            alu_src: self.alu_src,
            load: self.load,
            store: self.store,
            regwrite: self.regwrite,
            memtoreg: self.memtoreg,
            dest_reg: inst.rd(),
            imm_u: inst.upper(),
            imm: immediate(inst, self.format),
            pc,
        }
    }
}

/// One decode table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Ordinary instruction.
    Op(ControlTemplate),
    /// ECALL or EBREAK, told apart by bit 20.
    Environment,
    /// Recognized instruction of a disabled extension.
    Disabled(Feature),
}

/// Table key. `None` matches any value of that field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Key {
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
}

impl Key {
    const fn new(opcode: u32, funct3: Option<u32>, funct7: Option<u32>) -> Self {
        Self {
            opcode,
            funct3,
            funct7,
        }
    }
}

/// Result of decoding one instruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Control word for execute.
    pub ctrl: ControlWord,
    /// Control-flow class for the branch resolver.
    pub flow: Flow,
    /// Trap signaled by the instruction itself (ECALL/EBREAK).
    pub trap: Option<Trap>,
}

/// Instruction decode table built from the enabled extensions.
#[derive(Clone, Debug)]
pub struct DecodeTable {
    slots: HashMap<Key, Slot>,
    opcodes: HashSet<u32>,
}

impl DecodeTable {
    /// Builds the table.
    ///
    /// # Arguments
    ///
    /// * `isa` - Which optional extensions decode normally.
    pub fn new(isa: &IsaConfig) -> Self {
        let mut table = Self {
            slots: HashMap::new(),
            opcodes: HashSet::new(),
        };

        // ── U-type and jumps ──────────────────────────────
        table.insert(
            Key::new(i_op::OP_LUI, None, None),
            Slot::Op(ControlTemplate::alu(AluOp::Lui, AluSrc::ImmU, ImmFormat::U)),
        );
        table.insert(
            Key::new(i_op::OP_AUIPC, None, None),
            Slot::Op(ControlTemplate::alu(AluOp::Auipc, AluSrc::ImmU, ImmFormat::U)),
        );
        table.insert(
            Key::new(i_op::OP_JAL, None, None),
            Slot::Op(ControlTemplate::jump(AluOp::Jal, ImmFormat::J, Flow::Jal)),
        );
        table.insert(
            Key::new(i_op::OP_JALR, Some(i_f3::JALR), None),
            Slot::Op(ControlTemplate::jump(AluOp::Jalr, ImmFormat::I, Flow::Jalr)),
        );

        // ── Branches: every funct3 decodes, unknown ones resolve not-taken ──
        table.insert(
            Key::new(i_op::OP_BRANCH, None, None),
            Slot::Op(ControlTemplate::branch()),
        );

        // ── Loads and stores ──────────────────────────────
        for (f3, kind) in [
            (i_f3::LB, LoadKind::Byte),
            (i_f3::LH, LoadKind::Half),
            (i_f3::LW, LoadKind::Word),
            (i_f3::LBU, LoadKind::ByteUnsigned),
            (i_f3::LHU, LoadKind::HalfUnsigned),
        ] {
            table.insert(
                Key::new(i_op::OP_LOAD, Some(f3), None),
                Slot::Op(ControlTemplate::load(kind)),
            );
        }
        for (f3, kind) in [
            (i_f3::SB, StoreKind::Byte),
            (i_f3::SH, StoreKind::Half),
            (i_f3::SW, StoreKind::Word),
        ] {
            table.insert(
                Key::new(i_op::OP_STORE, Some(f3), None),
                Slot::Op(ControlTemplate::store(kind)),
            );
        }

        // ── OP-IMM ────────────────────────────────────────
        for (f3, op) in [
            (i_f3::ADD_SUB, AluOp::Add),
            (i_f3::SLT, AluOp::Slt),
            (i_f3::SLTU, AluOp::Sltu),
            (i_f3::XOR, AluOp::Xor),
            (i_f3::OR, AluOp::Or),
            (i_f3::AND, AluOp::And),
        ] {
            table.insert(
                Key::new(i_op::OP_IMM, Some(f3), None),
                Slot::Op(ControlTemplate::alu(op, AluSrc::ImmI, ImmFormat::I)),
            );
        }
        for (f3, f7, op) in [
            (i_f3::SLL, i_f7::DEFAULT, AluOp::Sll),
            (i_f3::SRL_SRA, i_f7::DEFAULT, AluOp::Srl),
            (i_f3::SRL_SRA, i_f7::ALT, AluOp::Sra),
        ] {
            table.insert(
                Key::new(i_op::OP_IMM, Some(f3), Some(f7)),
                Slot::Op(ControlTemplate::alu(op, AluSrc::Shamt, ImmFormat::I)),
            );
        }

        // ── OP (register-register) ────────────────────────
        for (f3, f7, op) in [
            (i_f3::ADD_SUB, i_f7::DEFAULT, AluOp::Add),
            (i_f3::ADD_SUB, i_f7::ALT, AluOp::Sub),
            (i_f3::SLL, i_f7::DEFAULT, AluOp::Sll),
            (i_f3::SLT, i_f7::DEFAULT, AluOp::Slt),
            (i_f3::SLTU, i_f7::DEFAULT, AluOp::Sltu),
            (i_f3::XOR, i_f7::DEFAULT, AluOp::Xor),
            (i_f3::SRL_SRA, i_f7::DEFAULT, AluOp::Srl),
            (i_f3::SRL_SRA, i_f7::ALT, AluOp::Sra),
            (i_f3::OR, i_f7::DEFAULT, AluOp::Or),
            (i_f3::AND, i_f7::DEFAULT, AluOp::And),
        ] {
            table.insert(
                Key::new(i_op::OP_REG, Some(f3), Some(f7)),
                Slot::Op(ControlTemplate::alu(op, AluSrc::Rs2, ImmFormat::None)),
            );
        }

        // ── M extension ───────────────────────────────────
        for (f3, op) in [
            (m_f3::MUL, AluOp::Mul),
            (m_f3::MULH, AluOp::Mulh),
            (m_f3::MULHSU, AluOp::Mulhsu),
            (m_f3::MULHU, AluOp::Mulhu),
            (m_f3::DIV, AluOp::Div),
            (m_f3::DIVU, AluOp::Divu),
            (m_f3::REM, AluOp::Rem),
            (m_f3::REMU, AluOp::Remu),
        ] {
            let slot = if isa.m_extension {
                Slot::Op(ControlTemplate::alu(op, AluSrc::Rs2, ImmFormat::None))
            } else {
                Slot::Disabled(Feature::M)
            };
            table.insert(Key::new(i_op::OP_REG, Some(f3), Some(m_op::M_EXTENSION)), slot);
        }

        // ── SYSTEM ────────────────────────────────────────
        if isa.zicsr {
            table.insert(
                Key::new(sys_op::OP_SYSTEM, Some(sys_op::PRIV), None),
                Slot::Environment,
            );
            for (f3, op) in [
                (sys_op::CSRRW, AluOp::Csrrw),
                (sys_op::CSRRS, AluOp::Csrrs),
                (sys_op::CSRRC, AluOp::Csrrc),
                (sys_op::CSRRWI, AluOp::Csrrwi),
                (sys_op::CSRRSI, AluOp::Csrrsi),
                (sys_op::CSRRCI, AluOp::Csrrci),
            ] {
                table.insert(
                    Key::new(sys_op::OP_SYSTEM, Some(f3), None),
                    Slot::Op(ControlTemplate::alu(op, AluSrc::Rs2, ImmFormat::I)),
                );
            }
        } else {
            table.insert(
                Key::new(sys_op::OP_SYSTEM, None, None),
                Slot::Disabled(Feature::Zicsr),
            );
        }

        table
    }

    fn insert(&mut self, key: Key, slot: Slot) {
        let _ = self.opcodes.insert(key.opcode);
        let _ = self.slots.insert(key, slot);
    }

    /// Finds the table entry for an instruction word.
    ///
    /// # Errors
    ///
    /// [`DecodeError::IllegalInstruction`] if no entry matches.
    pub fn lookup(&self, inst: u32) -> Result<Slot, DecodeError> {
        let opcode = inst.opcode();
        let f3 = inst.funct3();
        let f7 = inst.funct7();

        [
            Key::new(opcode, Some(f3), Some(f7)),
            Key::new(opcode, Some(f3), None),
            Key::new(opcode, None, None),
        ]
        .iter()
        .find_map(|key| self.slots.get(key).copied())
        .ok_or(DecodeError::IllegalInstruction {
            inst,
            reason: if self.opcodes.contains(&opcode) {
                "unknown funct3/funct7"
            } else {
                "unknown opcode"
            },
        })
    }

    /// Decodes one instruction word into its control word.
    ///
    /// # Arguments
    ///
    /// * `inst` - Raw instruction word (must not be the all-zero bubble).
    /// * `pc` - Its program counter.
    ///
    /// # Errors
    ///
    /// [`DecodeError::IllegalInstruction`] for unknown encodings and
    /// [`DecodeError::UnimplementedFeature`] for disabled extensions. The caller
    /// substitutes [`trap_control_word`] in both cases.
    pub fn decode(&self, inst: u32, pc: u32) -> Result<Decoded, DecodeError> {
        match self.lookup(inst)? {
            Slot::Op(template) => Ok(Decoded {
                ctrl: template.instantiate(inst, pc),
                flow: template.flow,
                trap: None,
            }),
            Slot::Environment => {
                let trap = if inst.bit(sys_op::EBREAK_BIT) {
                    Trap::Breakpoint(pc)
                } else {
                    Trap::EnvironmentCall(pc)
                };
                Ok(Decoded {
                    ctrl: trap_control_word(inst, pc, trap),
                    flow: Flow::Sequential,
                    trap: Some(trap),
                })
            }
            Slot::Disabled(feature) => Err(DecodeError::UnimplementedFeature { inst, feature }),
        }
    }
}

/// Builds the trap-marked, non-committing control word for an instruction.
///
/// The word is a CSRRWI aimed at `mcause` (`imm_u[19:8]`) carrying the cause
/// code in the zimm field (`imm_u[7:3]`), with register write, load and store
/// disabled.
///
/// # Arguments
///
/// * `inst` - Raw instruction word.
/// * `pc` - Its program counter.
/// * `trap` - The trap being signaled.
pub fn trap_control_word(inst: u32, pc: u32, trap: Trap) -> ControlWord {
    ControlWord {
        alu_op: AluOp::Csrrwi,
        alu_src: AluSrc::Rs2,
        load: LoadKind::None,
        store: StoreKind::None,
        regwrite: false,
        memtoreg: false,
        dest_reg: inst.rd(),
        imm_u: (CSR_MCAUSE << IMM_U_CSR_SHIFT)
            | (trap.code() << IMM_U_ZIMM_SHIFT)
            | (inst.upper() & IMM_U_FUNCT3_MASK),
        imm: 0,
        pc,
    }
}
