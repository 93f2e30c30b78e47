//! Instruction field extraction.
//!
//! Every RV32 instruction field is a contiguous bit range, so each accessor is
//! one shift and one mask. Fields are described by their low bit and width.

/// A contiguous bit range of an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Position of the least significant bit.
    pub lo: u32,
    /// Number of bits.
    pub width: u32,
}

impl Field {
    /// Extracts this field from `word`, right-aligned.
    #[inline(always)]
    pub const fn get(self, word: u32) -> u32 {
        (word >> self.lo) & ((1 << self.width) - 1)
    }
}

/// Major opcode, bits 6:0.
pub const OPCODE: Field = Field { lo: 0, width: 7 };
/// Destination register, bits 11:7.
pub const RD: Field = Field { lo: 7, width: 5 };
/// Minor opcode, bits 14:12.
pub const FUNCT3: Field = Field { lo: 12, width: 3 };
/// First source register, bits 19:15.
pub const RS1: Field = Field { lo: 15, width: 5 };
/// Second source register (or shift amount), bits 24:20.
pub const RS2: Field = Field { lo: 20, width: 5 };
/// Alternate-encoding selector, bits 31:25.
pub const FUNCT7: Field = Field { lo: 25, width: 7 };
/// CSR address, bits 31:20.
pub const CSR: Field = Field { lo: 20, width: 12 };
/// Upper immediate field, bits 31:12.
pub const UPPER: Field = Field { lo: 12, width: 20 };

/// Named field accessors on a raw instruction word.
pub trait InstructionBits {
    /// Major opcode. Selects the format and the decode table row.
    fn opcode(&self) -> u32;

    /// Destination register index.
    fn rd(&self) -> usize;

    /// First source register index.
    fn rs1(&self) -> usize;

    /// Second source register index.
    fn rs2(&self) -> usize;

    /// `funct3` minor opcode.
    fn funct3(&self) -> u32;

    /// `funct7`: tells ADD from SUB and SRL from SRA, and selects the M extension.
    fn funct7(&self) -> u32;

    /// 12-bit CSR address.
    fn csr(&self) -> u32;

    /// Bits 31:12 right-aligned.
    ///
    /// The unshifted U-type immediate. Execute also slices CSR addresses and
    /// zimm values out of it.
    fn upper(&self) -> u32;

    /// Whether bit `n` is set.
    fn bit(&self, n: u32) -> bool;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        OPCODE.get(*self)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        RD.get(*self) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        RS1.get(*self) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        RS2.get(*self) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        FUNCT3.get(*self)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        FUNCT7.get(*self)
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        CSR.get(*self)
    }

    #[inline(always)]
    fn upper(&self) -> u32 {
        UPPER.get(*self)
    }

    #[inline(always)]
    fn bit(&self, n: u32) -> bool {
        Field { lo: n, width: 1 }.get(*self) == 1
    }
}
