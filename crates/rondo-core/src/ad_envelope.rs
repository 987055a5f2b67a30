//! Attack/decay envelope generator.
//!
//! A one-shot envelope: [`trigger`](AdEnvelope::trigger) starts the attack,
//! the attack runs into the decay, and the decay ends idle at the minimum.
//! There is no sustain and no gate.
//!
//! # Curve
//!
//! Both segments share one curve scalar `c` applied to normalized segment
//! time `t ∈ [0, 1]`:
//!
//! ```text
//! shape(t) = (1 - e^(c·t)) / (1 - e^c)      |c| ≥ 0.001
//! shape(t) = t                               otherwise
//! ```
//!
//! The attack follows `shape`, the decay follows `1 - shape`. Negative `c`
//! moves fast first and settles slowly (the percussive setting), positive
//! `c` starts slowly and accelerates, and `c = 0` is a straight line.

use libm::expf;

/// Envelope segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeSegment {
    /// Not running. Output sits at the minimum.
    #[default]
    Idle,
    /// Rising toward the maximum.
    Attack,
    /// Falling toward the minimum.
    Decay,
}

/// Curve magnitudes below this are treated as linear.
const LINEAR_THRESHOLD: f32 = 0.001;

/// Attack/decay envelope with adjustable curve and output range.
///
/// Output maps the internal normalized level onto `[min, max]`, so the same
/// type drives an amplitude (range 0..1) or a pitch offset in Hz
/// (range 0..depth).
///
/// # Example
///
/// ```rust
/// use rondo_core::{AdEnvelope, EnvelopeSegment};
///
/// let mut env = AdEnvelope::new(1000.0);
/// env.set_attack_time(0.002);
/// env.set_decay_time(0.010);
/// env.trigger();
///
/// assert_eq!(env.segment(), EnvelopeSegment::Attack);
/// for _ in 0..12 {
///     env.advance();
/// }
/// assert_eq!(env.segment(), EnvelopeSegment::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct AdEnvelope {
    sample_rate: f32,
    segment: EnvelopeSegment,

    attack_secs: f32,
    decay_secs: f32,
    attack_samples: u32,
    decay_samples: u32,

    /// Samples elapsed in the current segment.
    position: u32,
    /// Normalized level at the moment the attack began.
    attack_start: f32,
    /// Normalized level in `[0, 1]`.
    level: f32,

    min: f32,
    max: f32,
    curve: f32,
}

impl Default for AdEnvelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl AdEnvelope {
    /// Create an idle envelope: 1 ms attack, 400 ms decay, range 0..1, linear.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            sample_rate,
            segment: EnvelopeSegment::Idle,
            attack_secs: 0.001,
            decay_secs: 0.4,
            attack_samples: 1,
            decay_samples: 1,
            position: 0,
            attack_start: 0.0,
            level: 0.0,
            min: 0.0,
            max: 1.0,
            curve: 0.0,
        };
        env.recalculate();
        env
    }

    /// Start (or restart) the attack.
    ///
    /// A retrigger while running rises from the current level instead of
    /// jumping to the minimum.
    pub fn trigger(&mut self) {
        self.attack_start = self.level;
        self.position = 0;
        self.segment = EnvelopeSegment::Attack;
    }

    /// Set the duration of one segment in seconds.
    pub fn set_time(&mut self, segment: EnvelopeSegment, seconds: f32) {
        match segment {
            EnvelopeSegment::Attack => self.set_attack_time(seconds),
            EnvelopeSegment::Decay => self.set_decay_time(seconds),
            EnvelopeSegment::Idle => {}
        }
    }

    /// Set attack duration in seconds. Zero yields a single-sample attack.
    pub fn set_attack_time(&mut self, seconds: f32) {
        self.attack_secs = seconds.max(0.0);
        self.attack_samples = self.samples_for(self.attack_secs);
    }

    /// Set decay duration in seconds. Zero yields a single-sample decay.
    pub fn set_decay_time(&mut self, seconds: f32) {
        self.decay_secs = seconds.max(0.0);
        self.decay_samples = self.samples_for(self.decay_secs);
    }

    /// Attack duration in seconds.
    pub fn attack_time(&self) -> f32 {
        self.attack_secs
    }

    /// Decay duration in seconds.
    pub fn decay_time(&self) -> f32 {
        self.decay_secs
    }

    /// Output value while idle and at the end of the decay.
    pub fn set_min(&mut self, min: f32) {
        self.min = min;
    }

    /// Output value at the attack peak.
    pub fn set_max(&mut self, max: f32) {
        self.max = max;
    }

    /// Current `(min, max)` output range.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Set the curve scalar shared by both segments.
    pub fn set_curve(&mut self, curve: f32) {
        self.curve = curve;
    }

    /// Current curve scalar.
    pub fn curve(&self) -> f32 {
        self.curve
    }

    /// Change the sample rate, preserving segment durations in seconds.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Current segment.
    pub fn segment(&self) -> EnvelopeSegment {
        self.segment
    }

    /// True from trigger until the decay completes.
    pub fn is_running(&self) -> bool {
        self.segment != EnvelopeSegment::Idle
    }

    /// Most recent output without advancing.
    pub fn value(&self) -> f32 {
        self.min + self.level * (self.max - self.min)
    }

    /// Force the envelope idle at its minimum.
    pub fn reset(&mut self) {
        self.segment = EnvelopeSegment::Idle;
        self.position = 0;
        self.level = 0.0;
        self.attack_start = 0.0;
    }

    /// Step one sample and return the output.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.segment {
            EnvelopeSegment::Idle => {}
            EnvelopeSegment::Attack => {
                self.position += 1;
                if self.position >= self.attack_samples {
                    self.level = 1.0;
                    self.position = 0;
                    self.segment = EnvelopeSegment::Decay;
                } else {
                    let t = self.position as f32 / self.attack_samples as f32;
                    self.level = self.attack_start + (1.0 - self.attack_start) * self.shape(t);
                }
            }
            EnvelopeSegment::Decay => {
                self.position += 1;
                if self.position >= self.decay_samples {
                    self.level = 0.0;
                    self.position = 0;
                    self.segment = EnvelopeSegment::Idle;
                } else {
                    let t = self.position as f32 / self.decay_samples as f32;
                    self.level = 1.0 - self.shape(t);
                }
            }
        }
        self.value()
    }

    #[inline]
    fn shape(&self, t: f32) -> f32 {
        if self.curve.abs() < LINEAR_THRESHOLD {
            t
        } else {
            (1.0 - expf(self.curve * t)) / (1.0 - expf(self.curve))
        }
    }

    fn samples_for(&self, seconds: f32) -> u32 {
        let samples = seconds * self.sample_rate + 0.5;
        if samples < 1.0 {
            1
        } else if samples >= u32::MAX as f32 {
            u32::MAX
        } else {
            samples as u32
        }
    }

    fn recalculate(&mut self) {
        self.attack_samples = self.samples_for(self.attack_secs);
        self.decay_samples = self.samples_for(self.decay_secs);
    }
}
