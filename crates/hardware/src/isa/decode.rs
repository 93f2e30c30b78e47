//! RISC-V Immediate Decoder.
//!
//! Each immediate format is described as a list of scattered instruction
//! fields and the bit they land on in the assembled immediate. Assembly ORs
//! the pieces together and sign-extends from the format's top bit.

use super::instruction::{Field, UPPER};

/// One slice of an immediate: where it sits in the instruction and where it
/// goes in the immediate.
#[derive(Clone, Copy, Debug)]
struct Piece {
    src: Field,
    dst: u32,
}

const fn piece(lo: u32, width: u32, dst: u32) -> Piece {
    Piece {
        src: Field { lo, width },
        dst,
    }
}

/// `imm[11:0]` in bits 31:20.
const I_PIECES: &[Piece] = &[piece(20, 12, 0)];
/// `imm[4:0]` in 11:7, `imm[11:5]` in 31:25.
const S_PIECES: &[Piece] = &[piece(7, 5, 0), piece(25, 7, 5)];
/// `imm[4:1]` in 11:8, `imm[10:5]` in 30:25, `imm[11]` in 7, `imm[12]` in 31.
const B_PIECES: &[Piece] = &[piece(8, 4, 1), piece(25, 6, 5), piece(7, 1, 11), piece(31, 1, 12)];
/// `imm[10:1]` in 30:21, `imm[11]` in 20, `imm[19:12]` in 19:12, `imm[20]` in 31.
const J_PIECES: &[Piece] = &[piece(21, 10, 1), piece(20, 1, 11), piece(12, 8, 12), piece(31, 1, 20)];

/// Width of the I- and S-type immediates.
const IS_IMM_BITS: u32 = 12;

/// Total number of bits in B-Type immediate (13 bits, sign-extended).
pub const B_IMM_BITS: u32 = 13;

/// Total number of bits in J-Type immediate (21 bits, sign-extended).
pub const J_IMM_BITS: u32 = 21;

/// Instruction formats that carry an immediate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImmFormat {
    /// R-type: no immediate.
    #[default]
    None,
    /// Loads, JALR, OP-IMM, SYSTEM.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// LUI, AUIPC.
    U,
    /// JAL.
    J,
}

/// Extracts the sign-extended immediate for the given format.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
/// * `format` - The format the opcode implies.
///
/// # Returns
///
/// The immediate as a two's-complement 32-bit value (zero for R-type).
pub const fn immediate(inst: u32, format: ImmFormat) -> u32 {
    match format {
        ImmFormat::None => 0,
        ImmFormat::I => imm_i(inst),
        ImmFormat::S => imm_s(inst),
        ImmFormat::B => imm_b(inst),
        ImmFormat::U => imm_u(inst),
        ImmFormat::J => imm_j(inst),
    }
}

const fn gather(inst: u32, pieces: &[Piece]) -> u32 {
    let mut imm = 0;
    let mut i = 0;
    while i < pieces.len() {
        imm |= pieces[i].src.get(inst) << pieces[i].dst;
        i += 1;
    }
    imm
}

/// Loads, JALR, OP-IMM and SYSTEM.
pub const fn imm_i(inst: u32) -> u32 {
    sign_extend(gather(inst, I_PIECES), IS_IMM_BITS)
}

/// Stores.
pub const fn imm_s(inst: u32) -> u32 {
    sign_extend(gather(inst, S_PIECES), IS_IMM_BITS)
}

/// Conditional branches. Bit 0 is always zero.
pub const fn imm_b(inst: u32) -> u32 {
    sign_extend(gather(inst, B_PIECES), B_IMM_BITS)
}

/// LUI and AUIPC, already shifted into place.
pub const fn imm_u(inst: u32) -> u32 {
    UPPER.get(inst) << UPPER.lo
}

/// JAL. Bit 0 is always zero.
pub const fn imm_j(inst: u32) -> u32 {
    sign_extend(gather(inst, J_PIECES), J_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to 32 bits.
///
/// # Arguments
///
/// * `val` - The value to extend. Bits above `bits` are ignored.
/// * `bits` - The number of valid bits in `val` (1-32).
///
/// # Returns
///
/// `val` with bit `bits - 1` replicated into every higher bit.
pub const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = u32::BITS - bits;
    ((val << shift) as i32 >> shift) as u32
}
