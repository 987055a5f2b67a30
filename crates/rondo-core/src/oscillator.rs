//! Phase-accumulating oscillator.
//!
//! Phase runs over `[0, 1)`. Non-sinusoidal shapes are corrected with a
//! two-sample PolyBLEP residual at each discontinuity.

use core::f32::consts::TAU;
use libm::sinf;

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Pure sine.
    #[default]
    Sine,
    /// Triangle, integrated from a band-limited square.
    Triangle,
    /// Rising sawtooth.
    Saw,
    /// 50% duty square.
    Square,
}

/// Audio-rate oscillator with a per-sample amplitude scalar.
///
/// Frequency and amplitude may be rewritten every sample; the voice bank
/// does exactly that from its envelopes.
///
/// # Example
///
/// ```rust
/// use rondo_core::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(48000.0);
/// osc.set_waveform(Waveform::Sine);
/// osc.set_frequency(1000.0);
/// osc.set_amplitude(0.5);
///
/// // Phase 0 of a sine is silence.
/// assert_eq!(osc.advance(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
    frequency: f32,
    amplitude: f32,
    waveform: Waveform,
    /// Leaky integrator state for the triangle.
    integrator: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Oscillator {
    /// Create a sine oscillator at 1 kHz, full amplitude, phase 0.
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
            frequency: 1000.0,
            amplitude: 1.0,
            waveform: Waveform::Sine,
            integrator: -1.0,
        };
        osc.update_increment();
        osc
    }

    /// Set frequency in Hz. Negative values are treated as 0.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.update_increment();
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the linear output amplitude.
    #[inline]
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude;
    }

    /// Current output amplitude.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Set the waveform.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Change the sample rate, keeping frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_increment();
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return to the canonical start point (phase 0).
    pub fn reset(&mut self) {
        self.phase = 0.0;
        // Triangle minimum sits at phase 0.
        self.integrator = -1.0;
    }

    /// Produce the sample at the current phase, then step the phase.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let value = self.shape();
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value * self.amplitude
    }

    fn update_increment(&mut self) {
        // Above Nyquist the phase would alias backwards; cap it there.
        self.phase_inc = (self.frequency / self.sample_rate).min(0.5);
    }

    #[inline]
    fn shape(&mut self) -> f32 {
        let t = self.phase;
        let dt = self.phase_inc;
        match self.waveform {
            Waveform::Sine => sinf(t * TAU),
            Waveform::Saw => 2.0 * t - 1.0 - blep(t, dt),
            Waveform::Square => square(t, dt),
            Waveform::Triangle => {
                let leak = 1.0 - dt.min(0.1);
                self.integrator = leak * self.integrator + 4.0 * dt * square(t, dt);
                self.integrator
            }
        }
    }
}

#[inline]
fn square(t: f32, dt: f32) -> f32 {
    let naive = if t < 0.5 { 1.0 } else { -1.0 };
    let mut falling = t + 0.5;
    if falling >= 1.0 {
        falling -= 1.0;
    }
    naive + blep(t, dt) - blep(falling, dt)
}

/// Two-sample polynomial band-limited step residual at phase 0.
#[inline]
fn blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if t < dt {
        let x = t / dt;
        2.0 * x - x * x - 1.0
    } else if t > 1.0 - dt {
        let x = (t - 1.0) / dt;
        x * x + 2.0 * x + 1.0
    } else {
        0.0
    }
}
