//! Flat Data Memory.
//!
//! This module implements a simple array-backed [`DataMemory`]. It provides:
//! 1. **Storage:** A zero-initialized vector of words sized from [`MemoryConfig`].
//! 2. **Byte-Enable Merge:** Partial writes update only the enabled lanes.
//! 3. **Bounds Handling:** Out-of-range accesses are logged and read as zero / dropped.

use tracing::warn;

use crate::common::constants::WORD_BYTES;
use crate::config::MemoryConfig;
use crate::core::units::lsu::byte_enable_mask;
use crate::soc::traits::DataMemory;

/// Array-backed word memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatMemory {
    words: Vec<u32>,
}

impl FlatMemory {
    /// Creates a zeroed memory of `size_bytes` bytes (rounded down to whole words).
    pub fn new(size_bytes: usize) -> Self {
        Self {
            words: vec![0; size_bytes / WORD_BYTES as usize],
        }
    }

    /// Creates a memory sized by the configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.size_bytes)
    }

    /// Number of words in the memory.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Copies `words` into memory starting at `word_addr`.
    ///
    /// Words that fall past the end are dropped with a warning.
    pub fn load_words(&mut self, word_addr: u32, words: &[u32]) {
        for (offset, &word) in words.iter().enumerate() {
            self.write_word(word_addr.wrapping_add(offset as u32), word, u8::MAX);
        }
    }
}

impl DataMemory for FlatMemory {
    fn read_word(&mut self, word_addr: u32) -> u32 {
        self.words.get(word_addr as usize).copied().unwrap_or_else(|| {
            warn!(word_addr, "data memory read out of range");
            0
        })
    }

    fn write_word(&mut self, word_addr: u32, data: u32, byte_enable: u8) {
        let mask = byte_enable_mask(byte_enable);
        match self.words.get_mut(word_addr as usize) {
            Some(slot) => *slot = (*slot & !mask) | (data & mask),
            None => warn!(word_addr, "data memory write out of range dropped"),
        }
    }
}
