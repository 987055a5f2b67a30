//! Property-based tests for rondo-core primitives.
//!
//! Saturation bound, filter stability across the knob ranges the engine
//! uses, envelope range, and clock spacing.

use proptest::prelude::*;
use rondo_core::{AdEnvelope, Metro, StateVariableFilter, saturate};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any finite input saturates strictly inside the unit interval.
    #[test]
    fn saturate_strictly_bounded(x in prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO) {
        let y = saturate(x);
        prop_assert!(y.abs() < 1.0, "saturate({}) = {}", x, y);
    }

    /// Saturation preserves sign.
    #[test]
    fn saturate_preserves_sign(x in -1.0e6f32..1.0e6f32) {
        let y = saturate(x);
        prop_assert!(x == 0.0 || y.signum() == x.signum() || y == 0.0);
    }

    /// For cutoffs across the mid-band knob range and any resonance, every
    /// SVF output stays finite for random bounded input.
    #[test]
    fn svf_stability(
        freq in 1.0f32..24000.0f32,
        res in 0.0f32..=1.0f32,
        input in prop::array::uniform32(-4.0f32..=4.0f32),
    ) {
        let mut svf = StateVariableFilter::new(48000.0);
        svf.set_frequency(freq);
        svf.set_resonance(res);
        for _ in 0..32 {
            for &x in &input {
                let out = svf.process(x);
                prop_assert!(
                    out.low.is_finite() && out.band.is_finite() && out.high.is_finite(),
                    "freq={} res={} produced {:?}", freq, res, out
                );
            }
        }
    }

    /// Envelope output never leaves `[min, max]` for any curve in the
    /// panel knob range.
    #[test]
    fn envelope_stays_in_range(
        attack in 0.0f32..0.01,
        decay in 0.0f32..0.05,
        curve in -10.0f32..2.0,
        max in 0.0f32..1000.0,
    ) {
        let mut env = AdEnvelope::new(48000.0);
        env.set_attack_time(attack);
        env.set_decay_time(decay);
        env.set_curve(curve);
        env.set_max(max);
        env.trigger();
        for _ in 0..3000 {
            let v = env.advance();
            prop_assert!(v >= -1e-3 && v <= max + 1e-3, "value {} outside [0, {}]", v, max);
        }
        prop_assert!(!env.is_running());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Clock ticks are evenly spaced to within one sample.
    #[test]
    fn metro_spacing(freq in 0.2f32..10.0f32) {
        let mut metro = Metro::new(48000.0);
        metro.set_frequency(freq);
        let period = 48000.0 / freq;
        let mut last = 0usize;
        let mut seen = 0;
        for n in 1..=((period * 3.0) as usize + 4) {
            if metro.process() {
                let gap = (n - last) as f32;
                prop_assert!((gap - period).abs() <= 1.5, "gap {} vs period {}", gap, period);
                last = n;
                seen += 1;
            }
        }
        prop_assert!(seen >= 3);
    }
}
