//! Voices and the fixed-size voice bank.
//!
//! A [`Voice`] is one sine oscillator with two attack/decay envelopes: one
//! scales its amplitude, the other adds a decaying offset in Hz to its
//! frequency. Every sample each voice computes
//!
//! ```text
//! freq = midi_to_freq(base_pitch) + pitch_env
//! amp  = amp_env · amp_level
//! ```
//!
//! and the bank sums all voices into one mono signal. Envelope shape is
//! shared across voices; voices differ only in when they were triggered.

use rondo_core::{AdEnvelope, Oscillator, midi_to_freq};

use crate::params::{ParamId, ParameterBank};

/// Attack time of both envelopes, in seconds.
pub const ATTACK_SECONDS: f32 = 0.001;

/// Envelope settings shared by every voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    /// Amplitude decay in seconds.
    pub amp_decay: f32,
    /// Amplitude curve scalar.
    pub amp_curve: f32,
    /// Pitch decay in seconds.
    pub pitch_decay: f32,
    /// Pitch curve scalar.
    pub pitch_curve: f32,
    /// Pitch envelope peak in Hz.
    pub pitch_depth: f32,
}

impl EnvelopeShape {
    /// Read the shape out of the parameter bank.
    pub fn from_bank(bank: &ParameterBank) -> Self {
        Self {
            amp_decay: bank.get(ParamId::AmpDecay),
            amp_curve: bank.get(ParamId::AmpCurve),
            pitch_decay: bank.get(ParamId::PitchDecay),
            pitch_curve: bank.get(ParamId::PitchCurve),
            pitch_depth: bank.get(ParamId::PitchDepth),
        }
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::from_bank(&ParameterBank::default())
    }
}

/// One oscillator with amplitude and pitch envelopes.
#[derive(Debug, Clone)]
pub struct Voice {
    osc: Oscillator,
    amp_env: AdEnvelope,
    pitch_env: AdEnvelope,
}

impl Voice {
    /// Create a silent voice with the default envelope shape.
    pub fn new(sample_rate: f32) -> Self {
        let mut voice = Self {
            osc: Oscillator::new(sample_rate),
            amp_env: AdEnvelope::new(sample_rate),
            pitch_env: AdEnvelope::new(sample_rate),
        };
        voice.amp_env.set_attack_time(ATTACK_SECONDS);
        voice.pitch_env.set_attack_time(ATTACK_SECONDS);
        voice.set_shape(&EnvelopeShape::default());
        voice
    }

    /// Restart the oscillator at phase 0 and fire both envelopes.
    pub fn trigger(&mut self) {
        self.osc.reset();
        self.amp_env.trigger();
        self.pitch_env.trigger();
    }

    /// Apply shared envelope settings.
    pub fn set_shape(&mut self, shape: &EnvelopeShape) {
        self.amp_env.set_decay_time(shape.amp_decay);
        self.amp_env.set_curve(shape.amp_curve);
        self.amp_env.set_min(0.0);
        self.amp_env.set_max(1.0);

        self.pitch_env.set_decay_time(shape.pitch_decay);
        self.pitch_env.set_curve(shape.pitch_curve);
        self.pitch_env.set_min(0.0);
        self.pitch_env.set_max(shape.pitch_depth);
    }

    /// Produce one sample at `base_freq + pitch_env`, scaled by
    /// `amp_env · level`.
    #[inline]
    pub fn process(&mut self, base_freq: f32, level: f32) -> f32 {
        let freq = base_freq + self.pitch_env.advance();
        let amp = self.amp_env.advance() * level;
        self.osc.set_frequency(freq);
        self.osc.set_amplitude(amp);
        self.osc.advance()
    }

    /// True while the amplitude envelope is running.
    pub fn is_active(&self) -> bool {
        self.amp_env.is_running()
    }

    /// Amplitude envelope.
    pub fn amp_envelope(&self) -> &AdEnvelope {
        &self.amp_env
    }

    /// Pitch envelope.
    pub fn pitch_envelope(&self) -> &AdEnvelope {
        &self.pitch_env
    }

    /// Oscillator.
    pub fn oscillator(&self) -> &Oscillator {
        &self.osc
    }

    /// Change the sample rate of every component.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.osc.set_sample_rate(sample_rate);
        self.amp_env.set_sample_rate(sample_rate);
        self.pitch_env.set_sample_rate(sample_rate);
    }

    /// Silence the voice.
    pub fn reset(&mut self) {
        self.osc.reset();
        self.amp_env.reset();
        self.pitch_env.reset();
    }
}

/// `N` voices summed to mono.
///
/// # Example
///
/// ```rust
/// use rondo_synth::{ParameterBank, VoiceBank};
///
/// let bank = ParameterBank::default();
/// let mut voices = VoiceBank::<8>::new(48000.0);
/// voices.refresh(&bank);
///
/// assert_eq!(voices.process(), 0.0);
/// voices.trigger(3);
/// assert_eq!(voices.active_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VoiceBank<const N: usize> {
    voices: [Voice; N],
    base_freq: f32,
    level: f32,
    /// Bank revision the voices were last refreshed from.
    seen_revision: Option<u32>,
}

impl<const N: usize> VoiceBank<N> {
    /// Create `N` idle voices.
    pub fn new(sample_rate: f32) -> Self {
        let defaults = ParameterBank::default();
        Self {
            voices: core::array::from_fn(|_| Voice::new(sample_rate)),
            base_freq: midi_to_freq(defaults.get(ParamId::BasePitch)),
            level: defaults.get(ParamId::AmpLevel),
            seen_revision: None,
        }
    }

    /// Number of voices.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// True when `N == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Trigger one voice. Out-of-range indices are ignored.
    #[inline]
    pub fn trigger(&mut self, index: usize) {
        if let Some(voice) = self.voices.get_mut(index) {
            voice.trigger();
        }
    }

    /// Pull envelope shape, base pitch and level from the bank.
    ///
    /// Does nothing if the bank's revision equals the one seen on the last
    /// call. Revisions are only comparable within one bank, so a voice bank
    /// fed from a different [`ParameterBank`] needs [`force_refresh`](Self::force_refresh)
    /// first.
    pub fn refresh(&mut self, bank: &ParameterBank) {
        if self.seen_revision == Some(bank.revision()) {
            return;
        }
        self.force_refresh(bank);
    }

    /// Pull everything from `bank` regardless of its revision.
    pub fn force_refresh(&mut self, bank: &ParameterBank) {
        self.seen_revision = Some(bank.revision());

        let shape = EnvelopeShape::from_bank(bank);
        for voice in &mut self.voices {
            voice.set_shape(&shape);
        }
        self.base_freq = midi_to_freq(bank.get(ParamId::BasePitch));
        self.level = bank.get(ParamId::AmpLevel);
    }

    /// Sum of every voice's next sample.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let (base_freq, level) = (self.base_freq, self.level);
        self.voices
            .iter_mut()
            .map(|voice| voice.process(base_freq, level))
            .sum()
    }

    /// Base frequency in Hz currently applied.
    pub fn base_freq(&self) -> f32 {
        self.base_freq
    }

    /// Voice by index.
    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }

    /// All voices.
    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    /// Voices whose amplitude envelope is running.
    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Change the sample rate of every voice.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Silence every voice.
    pub fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
    }
}
