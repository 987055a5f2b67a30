//! State Variable Filter.
//!
//! Topology-Preserving Transform (TPT) SVF after Zavalishin, "The Art of VA
//! Filter Design" (2012), Chapter 3. A single [`process`](StateVariableFilter::process)
//! call computes low-pass, band-pass, high-pass and notch from the same
//! state update; all four are kept so callers can read whichever band they
//! need afterwards.
//!
//! # Resonance
//!
//! Resonance is normalized to `[0, 1]`. It maps onto the damping term as
//! `k = 2·(1 − res^¼)`, clamped to `[0.02, 2]`: 0 is critically damped
//! (Q = 0.5), values near 1 ring.

use core::f32::consts::PI;
use libm::{powf, tanf};

use crate::flush_denormal;

/// Lowest accepted cutoff in Hz.
const MIN_CUTOFF: f32 = 1.0;
/// Highest accepted cutoff as a fraction of the sample rate.
const MAX_CUTOFF_RATIO: f32 = 0.49;
const MIN_DAMPING: f32 = 0.02;
const MAX_DAMPING: f32 = 2.0;

/// All outputs of one SVF step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvfOutputs {
    /// Low-pass output.
    pub low: f32,
    /// Band-pass output, peak gain `1/k` at the cutoff.
    pub band: f32,
    /// High-pass output.
    pub high: f32,
    /// Notch output (`low + high`).
    pub notch: f32,
}

/// 2-pole (12 dB/oct) state variable filter.
///
/// ## Parameters
///
/// - `frequency`: cutoff in Hz (1.0 to sr×0.49, default 1000.0)
/// - `resonance`: normalized 0.0 to 1.0 (default 0.0)
///
/// # Example
///
/// ```rust
/// use rondo_core::StateVariableFilter;
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_frequency(80.0);
/// svf.set_resonance(0.2);
///
/// let out = svf.process(0.5);
/// assert_eq!(out.band, svf.band());
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    ic1eq: f32,
    ic2eq: f32,

    g: f32,
    k: f32,

    sample_rate: f32,
    frequency: f32,
    resonance: f32,

    outputs: SvfOutputs,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Create a filter at 1 kHz with zero resonance.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: MAX_DAMPING,
            sample_rate,
            frequency: 1000.0,
            resonance: 0.0,
            outputs: SvfOutputs::default(),
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff in Hz. Clamped to `[1, 0.49 × sample_rate]`.
    pub fn set_frequency(&mut self, freq: f32) {
        self.frequency = freq.clamp(MIN_CUTOFF, self.sample_rate * MAX_CUTOFF_RATIO);
        self.update_coefficients();
    }

    /// Current cutoff in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set normalized resonance in `[0, 1]`. Values are clamped.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 1.0);
        self.update_coefficients();
    }

    /// Current normalized resonance.
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Change the sample rate; the cutoff is re-clamped against the new Nyquist.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_frequency(self.frequency);
    }

    /// Clear integrator state and the stored outputs.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
        self.outputs = SvfOutputs::default();
    }

    /// Advance one sample and return every output.
    #[inline]
    pub fn process(&mut self, input: f32) -> SvfOutputs {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        let high = input - self.k * v1 - v2;
        self.outputs = SvfOutputs {
            low: v2,
            band: v1,
            high,
            notch: v2 + high,
        };
        self.outputs
    }

    /// Low-pass output of the last [`process`](Self::process) call.
    pub fn low(&self) -> f32 {
        self.outputs.low
    }

    /// Band-pass output of the last [`process`](Self::process) call.
    pub fn band(&self) -> f32 {
        self.outputs.band
    }

    /// High-pass output of the last [`process`](Self::process) call.
    pub fn high(&self) -> f32 {
        self.outputs.high
    }

    /// Notch output of the last [`process`](Self::process) call.
    pub fn notch(&self) -> f32 {
        self.outputs.notch
    }

    fn update_coefficients(&mut self) {
        self.g = tanf(PI * self.frequency / self.sample_rate);
        self.k = (2.0 * (1.0 - powf(self.resonance, 0.25))).clamp(MIN_DAMPING, MAX_DAMPING);
    }
}
