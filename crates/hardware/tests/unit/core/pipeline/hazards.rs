//! # Forwarding Tests
//!
//! Property tests for operand forwarding: a token only ever replaces the
//! register file value of the register whose pending writer it belongs to.

use proptest::prelude::*;
use rv32hls_core::core::arch::gpr::Gpr;
use rv32hls_core::core::pipeline::hazards::{has_hazard, read_operand};
use rv32hls_core::core::pipeline::latches::ForwardToken;
use rv32hls_core::core::pipeline::scoreboard::Scoreboard;

proptest! {
    #[test]
    fn forwarding_selects_matching_writer(
        reg in 1usize..32,
        reg_value in any::<u32>(),
        writer_pc in any::<u32>(),
        token_pc in any::<u32>(),
        data in any::<u32>(),
        is_load_store in any::<bool>(),
    ) {
        let mut gpr = Gpr::new();
        gpr.write(reg, reg_value);
        let mut sentinels = Scoreboard::new();
        sentinels.set_pending(reg, writer_pc);
        let fwd = ForwardToken { pc: token_pc, data, is_load_store };

        let read = read_operand(&gpr, &sentinels, &fwd, reg);
        let expect_forward = token_pc == writer_pc && !is_load_store;
        prop_assert_eq!(read.forwarded, expect_forward);
        prop_assert_eq!(read.value, if expect_forward { data } else { reg_value });
        prop_assert_eq!(has_hazard(&sentinels, reg, read.forwarded), !expect_forward);
    }

    #[test]
    fn idle_register_never_hazards(
        reg in 0usize..32,
        pc in any::<u32>(),
        data in any::<u32>(),
    ) {
        let sentinels = Scoreboard::new();
        let fwd = ForwardToken { pc, data, is_load_store: false };
        let read = read_operand(&Gpr::new(), &sentinels, &fwd, reg);
        prop_assert!(!read.forwarded);
        prop_assert_eq!(read.value, 0);
        prop_assert!(!has_hazard(&sentinels, reg, false));
    }

    #[test]
    fn one_sentinel_per_register(writes in prop::collection::vec((0usize..32, any::<u32>()), 0..64)) {
        let mut sentinels = Scoreboard::new();
        let mut live = std::collections::HashMap::new();
        for (reg, pc) in writes {
            sentinels.set_pending(reg, pc);
            if reg != 0 {
                let _ = live.insert(reg, pc);
            }
        }
        prop_assert_eq!(sentinels.pending_count(), live.len());
        for (reg, pc) in live {
            prop_assert_eq!(sentinels.pending(reg), Some(pc));
        }
    }
}

#[test]
fn sticky_success_masks_pending_register() {
    let mut sentinels = Scoreboard::new();
    sentinels.set_pending(9, 0x20);
    assert!(has_hazard(&sentinels, 9, false));
    assert!(!has_hazard(&sentinels, 9, true));
}
