//! Load/Store Unit (LSU).
//!
//! Lane handling for the writeback stage's word-addressed data memory. It provides:
//! 1. **Addressing:** Word address and byte/halfword lane offsets of a byte address.
//! 2. **Loads:** Slicing a byte or halfword out of a word and sign- or zero-extending it.
//! 3. **Stores:** Shifting the stored value into its lane and computing the byte enable.
//! 4. **Alignment:** Detecting misaligned halfword and word accesses.
//!
//! Only naturally aligned accesses are modeled. A misaligned halfword uses the
//! halfword lane containing it, and a misaligned word uses the whole word.

use crate::common::constants::{BYTE_BITS, BYTE_ENABLE_ALL};
use crate::core::pipeline::signals::{LoadKind, StoreKind};
use crate::isa::decode::sign_extend;

/// Word address of a byte address.
pub const fn word_address(addr: u32) -> u32 {
    addr >> 2
}

/// Bit offset of the byte lane addressed by `addr`.
pub const fn byte_lane(addr: u32) -> u32 {
    (addr & 0x3) * BYTE_BITS
}

/// Bit offset of the halfword lane addressed by `addr`.
pub const fn half_lane(addr: u32) -> u32 {
    (addr & 0x2) * BYTE_BITS
}

/// Natural alignment mask for an access of `bytes` bytes.
const fn alignment_mask(bytes: u32) -> u32 {
    bytes - 1
}

/// Returns `true` if a load of this kind at `addr` is not naturally aligned.
pub const fn load_misaligned(addr: u32, kind: LoadKind) -> bool {
    match kind {
        LoadKind::Half | LoadKind::HalfUnsigned => addr & alignment_mask(2) != 0,
        LoadKind::Word => addr & alignment_mask(4) != 0,
        LoadKind::None | LoadKind::Byte | LoadKind::ByteUnsigned => false,
    }
}

/// Returns `true` if a store of this kind at `addr` is not naturally aligned.
pub const fn store_misaligned(addr: u32, kind: StoreKind) -> bool {
    match kind {
        StoreKind::Half => addr & alignment_mask(2) != 0,
        StoreKind::Word => addr & alignment_mask(4) != 0,
        StoreKind::None | StoreKind::Byte => false,
    }
}

/// Extracts and extends the loaded value from a memory word.
///
/// # Arguments
///
/// * `word` - The full word read from data memory.
/// * `addr` - The byte address of the load.
/// * `kind` - Width and signedness.
///
/// # Returns
///
/// The 32-bit register value (zero for [`LoadKind::None`]).
pub const fn extract_load(word: u32, addr: u32, kind: LoadKind) -> u32 {
    match kind {
        LoadKind::None => 0,
        LoadKind::Byte => sign_extend((word >> byte_lane(addr)) & 0xFF, BYTE_BITS),
        LoadKind::ByteUnsigned => (word >> byte_lane(addr)) & 0xFF,
        LoadKind::Half => sign_extend((word >> half_lane(addr)) & 0xFFFF, 2 * BYTE_BITS),
        LoadKind::HalfUnsigned => (word >> half_lane(addr)) & 0xFFFF,
        LoadKind::Word => word,
    }
}

/// A store positioned within its memory word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreLane {
    /// Store data shifted into its lane.
    pub data: u32,
    /// One bit per byte lane, bit 0 = lowest address.
    pub byte_enable: u8,
}

/// Positions a store value within its memory word.
///
/// # Arguments
///
/// * `value` - The rs2 value; only its low byte/halfword is used for SB/SH.
/// * `addr` - The byte address of the store.
/// * `kind` - Store width.
///
/// # Returns
///
/// The lane-aligned data and the byte enable. [`StoreKind::None`] enables no lane.
pub const fn position_store(value: u32, addr: u32, kind: StoreKind) -> StoreLane {
    match kind {
        StoreKind::None => StoreLane {
            data: 0,
            byte_enable: 0,
        },
        StoreKind::Byte => StoreLane {
            data: (value & 0xFF) << byte_lane(addr),
            byte_enable: 0b0001 << (addr & 0x3),
        },
        StoreKind::Half => StoreLane {
            data: (value & 0xFFFF) << half_lane(addr),
            byte_enable: 0b0011 << (addr & 0x2),
        },
        StoreKind::Word => StoreLane {
            data: value,
            byte_enable: BYTE_ENABLE_ALL,
        },
    }
}

/// Expands a byte enable into a bit mask over the word.
pub const fn byte_enable_mask(byte_enable: u8) -> u32 {
    let mut mask = 0;
    let mut lane = 0;
    while lane < 4 {
        if byte_enable & (1 << lane) != 0 {
            mask |= 0xFF << (lane * BYTE_BITS);
        }
        lane += 1;
    }
    mask
}
