use rv32hls_core::isa::privileged::opcodes::{EBREAK, ECALL, OP_SYSTEM};
use rv32hls_core::isa::rv32i::opcodes::*;

pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            opcode: 0,
            rd: 0,
            funct3: 0,
            rs1: 0,
            rs2: 0,
            funct7: 0,
            imm: 0,
        }
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    // --- Helpers for Common Instructions ---

    fn r_type(mut self, rd: u32, rs1: u32, rs2: u32, funct3: u32, funct7: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3;
        self.funct7 = funct7;
        self
    }

    fn i_type(mut self, opcode: u32, rd: u32, rs1: u32, funct3: u32, imm: i32) -> Self {
        self.opcode = opcode;
        self.rd = rd;
        self.rs1 = rs1;
        self.funct3 = funct3;
        self.imm = imm;
        self
    }

    fn s_type(mut self, rs1: u32, rs2: u32, funct3: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3;
        self.imm = imm;
        self
    }

    fn b_type(mut self, rs1: u32, rs2: u32, funct3: u32, imm: i32) -> Self {
        self.opcode = OP_BRANCH;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3;
        self.imm = imm;
        self
    }

    // R-type: ADD, SUB, AND, OR, XOR, SLL, SRL, SRA, SLT, SLTU

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b000, 0b0000000)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b000, 0b0100000)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b111, 0b0000000)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b110, 0b0000000)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b100, 0b0000000)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b001, 0b0000000)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b101, 0b0000000)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b101, 0b0100000)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b010, 0b0000000)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b011, 0b0000000)
    }

    // RV32M

    pub fn mul(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b000, 0b0000001)
    }

    pub fn divu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(rd, rs1, rs2, 0b101, 0b0000001)
    }

    // I-type: ADDI, ANDI, ORI, XORI, SLTI, SLTIU, shifts

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b000, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b111, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b110, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b100, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b010, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b011, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b001, (shamt & 0x1F) as i32)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b101, (shamt & 0x1F) as i32)
    }

    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, rd, rs1, 0b101, (0x400 | (shamt & 0x1F)) as i32)
    }

    // Loads and stores

    pub fn lb(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, rd, rs1, 0b000, imm)
    }

    pub fn lh(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, rd, rs1, 0b001, imm)
    }

    pub fn lw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, rd, rs1, 0b010, imm)
    }

    pub fn lbu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, rd, rs1, 0b100, imm)
    }

    pub fn lhu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, rd, rs1, 0b101, imm)
    }

    pub fn sb(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(rs1, rs2, 0b000, imm)
    }

    pub fn sh(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(rs1, rs2, 0b001, imm)
    }

    pub fn sw(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(rs1, rs2, 0b010, imm)
    }

    // Branches: BEQ, BNE, BLT, BGE, BLTU, BGEU

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b000, imm)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b001, imm)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b100, imm)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b101, imm)
    }

    pub fn bltu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b110, imm)
    }

    pub fn bgeu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(rs1, rs2, 0b111, imm)
    }

    // Jumps and upper immediates

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn jalr(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_JALR, rd, rs1, 0b000, imm)
    }

    pub fn lui(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn auipc(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_AUIPC;
        self.rd = rd;
        self.imm = imm;
        self
    }

    // Zicsr

    pub fn csrrw(self, rd: u32, csr: u32, rs1: u32) -> Self {
        self.i_type(OP_SYSTEM, rd, rs1, 0b001, (csr & 0xFFF) as i32)
    }

    pub fn csrrsi(self, rd: u32, csr: u32, zimm: u32) -> Self {
        self.i_type(OP_SYSTEM, rd, zimm, 0b110, (csr & 0xFFF) as i32)
    }

    /// NOP is ADDI x0, x0, 0
    pub fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    pub fn build(self) -> u32 {
        let opcode = self.opcode & 0x7F;
        let rd = (self.rd & 0x1F) << 7;
        let funct3 = (self.funct3 & 0x7) << 12;
        let rs1 = (self.rs1 & 0x1F) << 15;
        let rs2 = (self.rs2 & 0x1F) << 20;
        let funct7 = (self.funct7 & 0x7F) << 25;

        match opcode {
            OP_REG => {
                // R-type: funct7 | rs2 | rs1 | funct3 | rd | opcode
                funct7 | rs2 | rs1 | funct3 | rd | opcode
            }
            OP_IMM | OP_LOAD | OP_JALR | OP_SYSTEM => {
                // I-type: imm[11:0] | rs1 | funct3 | rd | opcode
                let imm_val = (self.imm as u32) & 0xFFF;
                (imm_val << 20) | rs1 | funct3 | rd | opcode
            }
            OP_STORE => {
                // S-type: imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode
                let imm_val = self.imm as u32;
                let imm_11_5 = ((imm_val >> 5) & 0x7F) << 25;
                let imm_4_0 = (imm_val & 0x1F) << 7;
                imm_11_5 | rs2 | rs1 | funct3 | imm_4_0 | opcode
            }
            OP_BRANCH => {
                // B-type: imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode
                let imm_val = self.imm as u32;
                let bit_12 = ((imm_val >> 12) & 0x1) << 31;
                let bits_10_5 = ((imm_val >> 5) & 0x3F) << 25;
                let bits_4_1 = ((imm_val >> 1) & 0xF) << 8;
                let bit_11 = ((imm_val >> 11) & 0x1) << 7;
                bit_12 | bits_10_5 | rs2 | rs1 | funct3 | bits_4_1 | bit_11 | opcode
            }
            OP_LUI | OP_AUIPC => {
                // U-type: imm[31:12] | rd | opcode. `imm` is the 20-bit field, unshifted.
                let imm_val = (self.imm as u32) & 0xFFFFF;
                (imm_val << 12) | rd | opcode
            }
            OP_JAL => {
                // J-type: imm[20|10:1|11|19:12] | rd | opcode
                let imm_val = self.imm as u32;
                let bit_20 = ((imm_val >> 20) & 0x1) << 31;
                let bits_10_1 = ((imm_val >> 1) & 0x3FF) << 21;
                let bit_11 = ((imm_val >> 11) & 0x1) << 20;
                let bits_19_12 = ((imm_val >> 12) & 0xFF) << 12;
                bit_20 | bits_10_1 | bit_11 | bits_19_12 | rd | opcode
            }
            _ => panic!("Unsupported opcode: {:#x}", opcode),
        }
    }
}

/// `ECALL` encoding.
pub const fn ecall() -> u32 {
    ECALL
}

/// `EBREAK` encoding.
pub const fn ebreak() -> u32 {
    EBREAK
}
