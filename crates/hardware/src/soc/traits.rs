//! Data memory trait.
//!
//! This module defines the `DataMemory` trait the writeback stage talks to. It provides:
//! 1. **Read:** Whole-word reads at a word address.
//! 2. **Write:** Byte-enabled writes, so sub-word stores leave neighboring lanes intact.
//!
//! Addresses are word addresses (`byte_address >> 2`); lane selection and
//! sign extension happen in the writeback stage.

/// Word-addressed data memory behind the writeback stage.
pub trait DataMemory {
    /// Reads the word at `word_addr`.
    fn read_word(&mut self, word_addr: u32) -> u32;

    /// Writes the lanes of `data` selected by `byte_enable` at `word_addr`.
    ///
    /// Bit `n` of `byte_enable` selects bits `8n..8n+8` of `data`.
    fn write_word(&mut self, word_addr: u32, data: u32, byte_enable: u8);
}
