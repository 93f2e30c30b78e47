//! Pipeline control signals and operation types.
//!
//! This module defines the control word the decode stage hands to execute. It performs:
//! 1. **Operation Classification:** Integer ALU, multiply/divide, jump and CSR operations.
//! 2. **Operand Selection:** Which value feeds the ALU's second input.
//! 3. **Memory Control:** Load kind (width and signedness) and store kind.
//! 4. **Bubbling:** Turning any control word into a non-committing no-op.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// No operation (bubbles and branches).
    #[default]
    Null,

    /// Integer addition (also address generation for loads and stores).
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Load upper immediate.
    Lui,

    /// Add upper immediate to PC.
    Auipc,

    /// Jump and link: `rd = pc + 4`.
    Jal,

    /// Jump and link register: `rd = pc + 4`.
    Jalr,

    /// Integer multiply (low bits).
    Mul,

    /// Integer multiply (high bits, signed × signed).
    Mulh,

    /// Integer multiply (high bits, signed × unsigned).
    Mulhsu,

    /// Integer multiply (high bits, unsigned × unsigned).
    Mulhu,

    /// Integer divide (signed).
    Div,

    /// Integer divide (unsigned).
    Divu,

    /// Integer remainder (signed).
    Rem,

    /// Integer remainder (unsigned).
    Remu,

    /// CSR atomic read/write.
    Csrrw,

    /// CSR atomic read and set bits.
    Csrrs,

    /// CSR atomic read and clear bits.
    Csrrc,

    /// CSR atomic read/write with immediate.
    Csrrwi,

    /// CSR atomic read and set bits with immediate.
    Csrrsi,

    /// CSR atomic read and clear bits with immediate.
    Csrrci,
}

/// Source for the ALU's second operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluSrc {
    /// The second register operand.
    #[default]
    Rs2,
    /// Sign-extended I-type immediate.
    ImmI,
    /// Sign-extended S-type immediate.
    ImmS,
    /// Upper immediate (bits 31:12).
    ImmU,
    /// 5-bit shift amount from the I-type immediate.
    Shamt,
}

/// Load kind requested from the writeback stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoadKind {
    /// No load.
    #[default]
    None,
    /// LB: byte, sign-extended.
    Byte,
    /// LH: halfword, sign-extended.
    Half,
    /// LW: full word.
    Word,
    /// LBU: byte, zero-extended.
    ByteUnsigned,
    /// LHU: halfword, zero-extended.
    HalfUnsigned,
}

impl LoadKind {
    /// Returns `true` for any actual load.
    pub const fn is_load(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Store kind requested from the writeback stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// No store.
    #[default]
    None,
    /// SB: low byte of rs2.
    Byte,
    /// SH: low halfword of rs2.
    Half,
    /// SW: all of rs2.
    Word,
}

impl StoreKind {
    /// Returns `true` for any actual store.
    pub const fn is_store(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Control word produced by the decoder for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlWord {
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
    /// Destination register index.
    pub dest_reg: usize,
    /// Instruction bits 31:12 verbatim. Execute slices CSR addresses and zimm from it.
    pub imm_u: u32,
    /// Format-appropriate sign-extended immediate.
    pub imm: u32,
    /// Program counter of the instruction.
    pub pc: u32,
}

impl ControlWord {
    /// Turns this word into a non-committing no-op.
    ///
    /// Register write, load and store are disabled and the ALU op is nulled.
    /// The PC and immediates are left intact for tracing.
    pub const fn bubble(&mut self) {
        self.alu_op = AluOp::Null;
        self.load = LoadKind::None;
        self.store = StoreKind::None;
        self.regwrite = false;
    }

    /// Returns `true` if this word can have no architectural effect (bubbles, branches).
    pub const fn is_inert(&self) -> bool {
        matches!(self.alu_op, AluOp::Null)
            && !self.regwrite
            && !self.load.is_load()
            && !self.store.is_store()
    }
}
