//! # Disassembler Tests
//!
//! The disassembler only feeds traces, but its output must be stable and
//! never panic on arbitrary words.

use crate::common::builder::instruction::{InstructionBuilder, ebreak, ecall};
use proptest::prelude::*;
use rstest::rstest;
use rv32hls_core::isa::disasm::disassemble;

#[rstest]
#[case::add(InstructionBuilder::new().add(10, 11, 12).build(), "add a0, a1, a2")]
#[case::sub(InstructionBuilder::new().sub(5, 6, 7).build(), "sub t0, t1, t2")]
#[case::addi(InstructionBuilder::new().addi(1, 2, -1).build(), "addi ra, sp, -1")]
#[case::srai(InstructionBuilder::new().srai(3, 4, 7).build(), "srai gp, tp, 7")]
#[case::lw(InstructionBuilder::new().lw(8, 2, 16).build(), "lw s0, 16(sp)")]
#[case::sb(InstructionBuilder::new().sb(2, 9, -4).build(), "sb s1, -4(sp)")]
#[case::beq(InstructionBuilder::new().beq(1, 2, 8).build(), "beq ra, sp, 8")]
#[case::jal(InstructionBuilder::new().jal(0, 0).build(), "jal zero, 0")]
#[case::mul(InstructionBuilder::new().mul(10, 10, 11).build(), "mul a0, a0, a1")]
#[case::ecall(ecall(), "ecall")]
#[case::ebreak(ebreak(), "ebreak")]
#[case::bubble(0, "bubble")]
fn renders_mnemonic(#[case] inst: u32, #[case] expected: &str) {
    assert_eq!(disassemble(inst), expected);
}

#[test]
fn unknown_opcode_shows_raw_word() {
    assert_eq!(disassemble(0x0000_007F), "unknown (0x0000007f)");
}

proptest! {
    #[test]
    fn never_panics(inst in any::<u32>()) {
        prop_assert!(!disassemble(inst).is_empty());
    }
}
