//! Serial 3-band tone-shaping stages.
//!
//! Each [`Stage`] scales its input, splits it through three band-pass
//! filters (fixed high and low bands, a movable mid band), recombines the
//! bands with per-band levels and saturates:
//!
//! ```text
//! x' = x · gain
//! y  = high_amp·band_12k(x') + mid_amp·band_mid(x') + low_amp·band_80(x')
//! out = tanh(y)                  |out| < 1
//! ```
//!
//! A [`StageChain`] runs `M` stages in series. One stage at a time is
//! selected for live editing; [`StageChain::apply_to_selected`] copies the
//! bank's stage parameters into that stage only, so every other stage
//! keeps whatever it was last given.

use rondo_core::{Processor, StateVariableFilter, saturate};
use rondo_platform::PageSelector;

use crate::params::{ParamId, ParameterBank};

/// Center of the fixed high band in Hz.
pub const HIGH_BAND_HZ: f32 = 12_000.0;
/// Center of the fixed low band in Hz.
pub const LOW_BAND_HZ: f32 = 80.0;
/// Resonance of all three band filters.
pub const BAND_RESONANCE: f32 = 0.2;
/// Magnitude the scaled input is clamped to before it reaches the band
/// filters, so filter state stays finite for any finite input.
pub const INPUT_LIMIT: f32 = 1.0e6;

/// Live-editable settings of one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageParams {
    /// Input gain.
    pub gain: f32,
    /// High band level.
    pub high_amp: f32,
    /// Mid band level.
    pub mid_amp: f32,
    /// Mid band center frequency in Hz.
    pub mid_freq: f32,
    /// Low band level.
    pub low_amp: f32,
}

impl StageParams {
    /// Read the selected-stage parameters out of the bank.
    pub fn from_bank(bank: &ParameterBank) -> Self {
        Self {
            gain: bank.get(ParamId::StageGain),
            high_amp: bank.get(ParamId::StageHighAmp),
            mid_amp: bank.get(ParamId::StageMidAmp),
            mid_freq: bank.get(ParamId::StageMidFreq),
            low_amp: bank.get(ParamId::StageLowAmp),
        }
    }
}

impl Default for StageParams {
    fn default() -> Self {
        Self::from_bank(&ParameterBank::default())
    }
}

/// One split/recombine/saturate unit.
#[derive(Debug, Clone)]
pub struct Stage {
    params: StageParams,
    high: StateVariableFilter,
    mid: StateVariableFilter,
    low: StateVariableFilter,
}

impl Stage {
    /// Create a stage with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let band = |freq: f32| {
            let mut svf = StateVariableFilter::new(sample_rate);
            svf.set_frequency(freq);
            svf.set_resonance(BAND_RESONANCE);
            svf
        };
        let params = StageParams::default();
        Self {
            params,
            high: band(HIGH_BAND_HZ),
            mid: band(params.mid_freq),
            low: band(LOW_BAND_HZ),
        }
    }

    /// Replace the stage's parameters.
    pub fn set_params(&mut self, params: StageParams) {
        if params.mid_freq != self.params.mid_freq {
            self.mid.set_frequency(params.mid_freq);
        }
        self.params = params;
    }

    /// Current parameters.
    #[inline]
    pub fn params(&self) -> &StageParams {
        &self.params
    }

    /// Effective mid band cutoff after clamping.
    pub fn mid_cutoff(&self) -> f32 {
        self.mid.frequency()
    }

    /// Effective high band cutoff after clamping.
    pub fn high_cutoff(&self) -> f32 {
        self.high.frequency()
    }

    /// Effective low band cutoff after clamping.
    pub fn low_cutoff(&self) -> f32 {
        self.low.frequency()
    }
}

impl Processor for Stage {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let p = &self.params;
        let x = (input * p.gain).clamp(-INPUT_LIMIT, INPUT_LIMIT);
        let high = self.high.process(x).band;
        let mid = self.mid.process(x).band;
        let low = self.low.process(x).band;
        saturate(p.high_amp * high + p.mid_amp * mid + p.low_amp * low)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.high.set_sample_rate(sample_rate);
        self.mid.set_sample_rate(sample_rate);
        self.low.set_sample_rate(sample_rate);
        // Re-clamp against the new Nyquist.
        self.mid.set_frequency(self.params.mid_freq);
        self.high.set_frequency(HIGH_BAND_HZ);
        self.low.set_frequency(LOW_BAND_HZ);
    }

    fn reset(&mut self) {
        self.high.reset();
        self.mid.reset();
        self.low.reset();
    }
}

/// `M` stages in series with a selected stage for editing.
///
/// # Example
///
/// ```rust
/// use rondo_core::Processor;
/// use rondo_synth::{ParamId, ParameterBank, StageChain};
///
/// let mut chain = StageChain::<3>::new(48000.0);
/// let mut bank = ParameterBank::default();
///
/// chain.select_next();
/// bank.set(ParamId::StageGain, 2.5);
/// chain.apply_to_selected(&bank);
///
/// assert_eq!(chain.params(1).map(|p| p.gain), Some(2.5));
/// assert_eq!(chain.params(0).map(|p| p.gain), Some(1.0));
/// assert!(chain.process(100.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct StageChain<const M: usize> {
    stages: [Stage; M],
    selector: PageSelector<M>,
}

impl<const M: usize> StageChain<M> {
    /// Create `M` default stages with stage 0 selected.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            stages: core::array::from_fn(|_| Stage::new(sample_rate)),
            selector: PageSelector::new(),
        }
    }

    /// Number of stages.
    #[inline]
    pub const fn len(&self) -> usize {
        M
    }

    /// True when `M == 0`; never, since the selector requires `M ≥ 1`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        M == 0
    }

    /// Index of the stage receiving live writes. Always in `0..M`.
    #[inline]
    pub fn active_index(&self) -> usize {
        self.selector.active()
    }

    /// Select the next stage, wrapping from the last to 0.
    pub fn select_next(&mut self) -> usize {
        self.selector.next()
    }

    /// Select the previous stage; stays at 0.
    pub fn select_previous(&mut self) -> usize {
        self.selector.previous()
    }

    /// Copy the bank's stage parameters into the selected stage only.
    pub fn apply_to_selected(&mut self, bank: &ParameterBank) {
        let params = StageParams::from_bank(bank);
        self.stages[self.selector.active()].set_params(params);
    }

    /// Write parameters into a specific stage. Out-of-range indices are ignored.
    pub fn set_stage_params(&mut self, index: usize, params: StageParams) {
        if let Some(stage) = self.stages.get_mut(index) {
            stage.set_params(params);
        }
    }

    /// Parameters of stage `index`.
    pub fn params(&self, index: usize) -> Option<&StageParams> {
        self.stages.get(index).map(Stage::params)
    }

    /// Stage by index.
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

impl<const M: usize> Processor for StageChain<M> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(input, |signal, stage| stage.process(signal))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        for stage in &mut self.stages {
            stage.set_sample_rate(sample_rate);
        }
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_params(seed: f32) -> StageParams {
        StageParams {
            gain: 0.5 + seed,
            high_amp: 0.1 * seed,
            mid_amp: 2.0 - 0.1 * seed,
            mid_freq: 200.0 + 300.0 * seed,
            low_amp: 3.0,
        }
    }

    #[test]
    fn test_output_is_bounded() {
        let mut stage = Stage::new(48000.0);
        stage.set_params(StageParams {
            gain: 4.0,
            high_amp: 4.0,
            mid_amp: 4.0,
            mid_freq: 8000.0,
            low_amp: 4.0,
        });
        for i in 0..4800 {
            let x = if i % 2 == 0 { 1.0e4 } else { -1.0e4 };
            let y = stage.process(x);
            assert!(y.abs() < 1.0, "sample {i}: {y}");
        }
    }

    #[test]
    fn test_huge_input_leaves_filters_finite() {
        let mut chain = StageChain::<1>::new(48000.0);
        chain.set_stage_params(
            0,
            StageParams {
                gain: 4.0,
                ..StageParams::default()
            },
        );
        for x in [1.0e38, f32::MAX, -f32::MAX, 3.0e38] {
            let y = chain.process(x);
            assert!(y.is_finite() && y.abs() < 1.0, "{x} -> {y}");
        }
        for i in 0..1000 {
            let y = chain.process(0.1);
            assert!(y.is_finite() && y.abs() < 1.0, "sample {i}: {y}");
        }
    }

    #[test]
    fn test_sample_rate_round_trip_restores_fixed_bands() {
        let mut stage = Stage::new(48000.0);
        stage.set_sample_rate(100.0);
        assert!(stage.low_cutoff() < LOW_BAND_HZ);
        assert!(stage.high_cutoff() < HIGH_BAND_HZ);

        stage.set_sample_rate(48000.0);
        assert_eq!(stage.low_cutoff(), LOW_BAND_HZ);
        assert_eq!(stage.high_cutoff(), HIGH_BAND_HZ);
        assert_eq!(stage.mid_cutoff(), 1000.0);
    }

    #[test]
    fn test_zero_gain_is_silent() {
        let mut stage = Stage::new(48000.0);
        stage.set_params(StageParams {
            gain: 0.0,
            ..StageParams::default()
        });
        for _ in 0..100 {
            assert_eq!(stage.process(0.7), 0.0);
        }
    }

    #[test]
    fn test_mid_freq_moves_filter() {
        let mut stage = Stage::new(48000.0);
        stage.set_params(distinct_params(2.0));
        assert_eq!(stage.mid_cutoff(), 800.0);
    }

    #[test]
    fn test_apply_only_touches_selected() {
        let mut chain = StageChain::<4>::new(48000.0);
        for i in 0..4 {
            chain.set_stage_params(i, distinct_params(i as f32));
        }
        let before: Vec<StageParams> = (0..4).filter_map(|i| chain.params(i).copied()).collect();

        chain.select_next();
        chain.select_next();
        let mut bank = ParameterBank::default();
        bank.set(ParamId::StageMidFreq, 5000.0);
        chain.apply_to_selected(&bank);

        for i in [0, 1, 3] {
            assert_eq!(chain.params(i), Some(&before[i]));
        }
        assert_eq!(chain.params(2), Some(&StageParams::from_bank(&bank)));
    }

    #[test]
    fn test_selection_wraps_forward_and_clamps_backward() {
        let mut chain = StageChain::<2>::new(48000.0);
        assert_eq!(chain.select_previous(), 0);
        assert_eq!(chain.select_next(), 1);
        assert_eq!(chain.select_next(), 0);
        assert_eq!(chain.active_index(), 0);
    }

    #[test]
    fn test_single_stage_chain_matches_stage() {
        let mut chain = StageChain::<1>::new(48000.0);
        let mut stage = Stage::new(48000.0);
        for i in 0..256 {
            let x = (i as f32 * 0.05).sin();
            assert_eq!(chain.process(x), stage.process(x));
        }
    }

    #[test]
    fn test_chain_is_serial() {
        let mut chain = StageChain::<2>::new(48000.0);
        let mut first = Stage::new(48000.0);
        let mut second = Stage::new(48000.0);
        for i in 0..256 {
            let x = (i as f32 * 0.05).sin();
            assert_eq!(chain.process(x), second.process(first.process(x)));
        }
    }
}
