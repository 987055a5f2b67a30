//! Property-based tests for rondo-synth.
//!
//! Voice rotation, stage-selection bounds, isolation of unselected stages
//! and the chain's output bound, over random parameters and button scripts.

use proptest::prelude::*;
use rondo_core::Processor;
use rondo_synth::{ParamId, ParameterBank, StageChain, StageParams, TriggerSequencer, VoiceBank};

fn stage_params() -> impl Strategy<Value = StageParams> {
    (0.0f32..=4.0, 0.0f32..=4.0, 0.0f32..=4.0, 100.0f32..=8000.0, 0.0f32..=4.0).prop_map(
        |(gain, high_amp, mid_amp, mid_freq, low_amp)| StageParams {
            gain,
            high_amp,
            mid_amp,
            mid_freq,
            low_amp,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The k-th fire (0-based) from start voice s triggers voice (s + k) mod N.
    #[test]
    fn rotation_follows_start_plus_count(start in 0usize..8, rate in 50.0f32..500.0) {
        let mut voices = VoiceBank::<8>::new(1000.0);
        let mut seq = TriggerSequencer::<8>::new(1000.0);
        seq.set_current_voice(start);
        seq.set_rate(rate);
        let mut k = 0usize;
        for _ in 0..200 {
            if let Some(fired) = seq.advance(&mut voices) {
                prop_assert_eq!(fired, (start + k) % 8);
                k += 1;
            }
        }
        prop_assert_eq!(seq.current_voice(), (start + k) % 8);
        prop_assert_eq!(seq.fire_count(), k as u64);
    }

    /// Any forward/backward script keeps the selection within [0, M).
    #[test]
    fn selection_stays_in_range(script in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut chain = StageChain::<4>::new(48000.0);
        let mut expected = 0usize;
        for forward in script {
            if forward {
                chain.select_next();
                expected = (expected + 1) % 4;
            } else {
                chain.select_previous();
                expected = expected.saturating_sub(1);
            }
            prop_assert!(chain.active_index() < 4);
            prop_assert_eq!(chain.active_index(), expected);
        }
    }

    /// Applying the bank only ever changes the selected stage.
    #[test]
    fn apply_leaves_other_stages_untouched(
        selected in 0usize..3,
        gain in 0.0f32..=4.0,
        mid_freq in 100.0f32..=8000.0,
    ) {
        let mut chain = StageChain::<3>::new(48000.0);
        for _ in 0..selected {
            chain.select_next();
        }
        let mut bank = ParameterBank::default();
        bank.set(ParamId::StageGain, gain);
        bank.set(ParamId::StageMidFreq, mid_freq);
        chain.apply_to_selected(&bank);

        for i in 0..3 {
            let params = *chain.params(i).expect("in range");
            if i == selected {
                prop_assert_eq!(params, StageParams::from_bank(&bank));
            } else {
                prop_assert_eq!(params, StageParams::default());
            }
        }
    }

    /// Chain output magnitude stays below 1 for any stage settings and input.
    #[test]
    fn chain_output_below_unity(
        first in stage_params(),
        second in stage_params(),
        input in prop::array::uniform32(
            prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO
        ),
    ) {
        let mut chain = StageChain::<2>::new(48000.0);
        chain.set_stage_params(0, first);
        chain.set_stage_params(1, second);
        for _ in 0..16 {
            for &x in &input {
                let y = chain.process(x);
                prop_assert!(y.is_finite() && y.abs() < 1.0, "{} -> {}", x, y);
            }
        }
    }
}
