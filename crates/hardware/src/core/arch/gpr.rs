//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file owned by the decode stage.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 32 bits each.
//! 2. **Invariant Enforcement:** Writes to `x0` are dropped, so it always reads zero.
//! 3. **Debugging:** Provides a compact dump of the register state for traces.

use std::fmt;

use crate::common::constants::REG_COUNT;

/// General-Purpose Register file.
///
/// `x0` is guarded at write time rather than at storage time: the slot exists
/// but no write path ever reaches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; REG_COUNT],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    ///
    /// # Returns
    ///
    /// A new `Gpr` instance with all registers set to 0.
    pub const fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    pub const fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Zeroes every register.
    pub const fn reset(&mut self) {
        self.regs = [0; REG_COUNT];
    }
}

impl fmt::Display for Gpr {
    /// Renders registers in pairs with hexadecimal formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..REG_COUNT).step_by(2) {
            writeln!(
                f,
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}
