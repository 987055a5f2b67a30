//! Fixed output high-pass.

use rondo_core::{Processor, StateVariableFilter};

/// Corner frequency in Hz.
pub const POST_FILTER_HZ: f32 = 10.0;
/// Normalized resonance.
pub const POST_FILTER_RESONANCE: f32 = 0.1;

/// 10 Hz high-pass applied after the stage chain. Not control-updatable.
#[derive(Debug, Clone)]
pub struct PostFilter {
    svf: StateVariableFilter,
}

impl PostFilter {
    /// Create the filter.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = StateVariableFilter::new(sample_rate);
        svf.set_frequency(POST_FILTER_HZ);
        svf.set_resonance(POST_FILTER_RESONANCE);
        Self { svf }
    }
}

impl Processor for PostFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.svf.process(input).high
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.svf.set_sample_rate(sample_rate);
        self.svf.set_frequency(POST_FILTER_HZ);
    }

    fn reset(&mut self) {
        self.svf.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_dc_offset() {
        let mut hp = PostFilter::new(48000.0);
        let mut out = 1.0;
        for _ in 0..96000 {
            out = hp.process(0.5);
        }
        assert!(out.abs() < 1e-3, "DC leaked: {out}");
    }

    #[test]
    fn test_passes_audio_band() {
        let mut hp = PostFilter::new(48000.0);
        let mut peak = 0.0f32;
        for i in 0..48000 {
            let x = (core::f32::consts::TAU * 440.0 * i as f32 / 48000.0).sin();
            let y = hp.process(x);
            if i > 24000 {
                peak = peak.max(y.abs());
            }
        }
        assert!((peak - 1.0).abs() < 0.05, "peak {peak}");
    }
}
