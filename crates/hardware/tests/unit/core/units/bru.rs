//! # Branch Resolution Tests
//!
//! Verifies jump targets, branch targets and the six branch conditions,
//! including the not-taken default for unknown comparison codes.

use crate::common::builder::instruction::InstructionBuilder;
use rstest::rstest;
use rv32hls_core::core::units::bru::{Flow, Resolution, branch_taken, resolve};
use rv32hls_core::isa::rv32i::opcodes::OP_BRANCH;

#[test]
fn jal_at_0x100_targets_0x200() {
    let inst = InstructionBuilder::new().jal(1, 0x100).build();
    let r = resolve(inst, 0x100, 0, 0, Flow::Jal);
    assert!(r.jump);
    assert!(!r.branch);
    assert_eq!(r.jump_target, 0x200);
    assert_eq!(r.taken_target(), Some(0x200));
}

#[test]
fn jalr_clears_bit_zero() {
    let inst = InstructionBuilder::new().jalr(1, 5, 3).build();
    let r = resolve(inst, 0x40, 0x1000, 0, Flow::Jalr);
    assert!(r.jump);
    assert_eq!(r.jump_target, 0x1002);
}

#[test]
fn sequential_flow_is_neither_jump_nor_branch() {
    let inst = InstructionBuilder::new().addi(1, 1, 1).build();
    let r = resolve(inst, 0x40, 7, 7, Flow::Sequential);
    assert_eq!(r.taken_target(), None);
}

#[test]
fn backward_branch_target_wraps_below_pc() {
    let inst = InstructionBuilder::new().beq(1, 2, -16).build();
    let r = resolve(inst, 0x20, 5, 5, Flow::Branch);
    assert!(r.branch);
    assert_eq!(r.branch_target, 0x10);
}

#[test]
fn unknown_branch_funct3_is_not_taken() {
    // funct3 = 0b010 is not a branch comparison.
    let inst = InstructionBuilder::new()
        .opcode(OP_BRANCH)
        .funct3(0b010)
        .rs1(1)
        .rs2(1)
        .imm(8)
        .build();
    for (a, b) in [(0, 0), (1, 2), (u32::MAX, 0)] {
        let r = resolve(inst, 0x100, a, b, Flow::Branch);
        assert_eq!(
            r,
            Resolution {
                jump: false,
                branch: false,
                jump_target: 0,
                branch_target: 0x108,
            }
        );
    }
}

#[rstest]
#[case::beq_equal(0b000, 5, 5, true)]
#[case::beq_differ(0b000, 5, 6, false)]
#[case::bne(0b001, 5, 6, true)]
#[case::blt_signed(0b100, (-1i32) as u32, 1, true)]
#[case::bge_signed(0b101, (-1i32) as u32, 1, false)]
#[case::bge_equal(0b101, 3, 3, true)]
#[case::bltu_unsigned(0b110, (-1i32) as u32, 1, false)]
#[case::bgeu_unsigned(0b111, (-1i32) as u32, 1, true)]
#[case::unknown_011(0b011, 0, 0, false)]
fn branch_conditions(#[case] f3: u32, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(branch_taken(f3, a, b), taken);
}
