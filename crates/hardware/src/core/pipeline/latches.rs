//! Channel payload structures for inter-stage communication.
//!
//! This module defines the entries carried between the stages surrounding the core:
//! Fetch → Decode → Execute → Writeback, plus the feedback paths Execute → Decode
//! (forwarding), Writeback → Decode (register write) and Decode → Fetch (redirect).
//!
//! 1. **Instruction Flow:** Fetch packet, instruction word, decoded bundle, execute result.
//! 2. **Feedback:** Forward token, writeback feedback, redirect message.
//! 3. **Trap Propagation:** Decoded bundles carry the trap the decoder signaled.

use std::fmt;

use crate::common::error::Trap;
use crate::core::pipeline::signals::{ControlWord, LoadKind, StoreKind};

/// Pipeline tag assigned to each instruction dispatched from decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    /// Returns the tag after this one, wrapping on overflow.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fetch stage → decode: the PC of the fetched instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchPacket {
    /// Program counter the word was fetched from.
    pub pc: u32,
}

/// Instruction memory → decode: the fetched instruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImemWord {
    /// Raw 32-bit encoding.
    pub instr: u32,
}

/// Execute → decode: the value execute produced this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardToken {
    /// PC of the producing instruction.
    pub pc: u32,
    /// Value it will write.
    pub data: u32,
    /// Set for loads and stores: the value is an address, not the result.
    pub is_load_store: bool,
}

/// Decode → execute: control word plus operand values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOut {
    /// Control signals.
    pub ctrl: ControlWord,
    /// First operand (possibly forwarded).
    pub rs1: u32,
    /// Second operand (possibly forwarded).
    pub rs2: u32,
    /// Pipeline tag.
    pub tag: Tag,
    /// Trap the decoder signaled for this instruction, if any.
    pub trap: Option<Trap>,
}

/// Decode → fetch: hold, redirect, or neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchRedirect {
    /// Hold the PC (fetch keeps presenting `address`).
    pub freeze: bool,
    /// Resume fetching at `address`.
    pub redirect: bool,
    /// Target address.
    pub address: u32,
}

/// Execute → writeback: one executed instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteResult {
    /// ALU result; the byte address for loads and stores.
    pub alu_res: u32,
    /// Value to store (rs2).
    pub store_data: u32,
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
    /// Pipeline tag.
    pub tag: Tag,
    /// Program counter of the instruction.
    pub pc: u32,
}

/// Writeback → decode: the register write for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WbFeedback {
    /// Register write enable.
    pub regwrite: bool,
    /// Destination register index.
    pub rd: usize,
    /// Value to write.
    pub data: u32,
    /// Pipeline tag.
    pub tag: Tag,
    /// PC of the writing instruction; matched against the sentinel.
    pub pc: u32,
}
