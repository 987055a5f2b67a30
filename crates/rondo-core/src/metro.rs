//! Phase-accumulating clock.

/// Periodic clock that reports each period wrap.
///
/// Phase is accumulated in `f64` so long runs at low rates do not drift:
/// at 1 Hz and 48 kHz the wrap lands within one sample of every 48 000th
/// call, indefinitely. The first wrap happens one full period after
/// construction or [`reset`](Metro::reset).
///
/// # Example
///
/// ```rust
/// use rondo_core::Metro;
///
/// let mut clock = Metro::new(48000.0);
/// clock.set_frequency(4.0);
///
/// // One second plus a little slack for accumulated rounding.
/// let ticks = (0..48_100).filter(|_| clock.process()).count();
/// assert_eq!(ticks, 4);
/// ```
#[derive(Debug, Clone)]
pub struct Metro {
    phase: f64,
    phase_inc: f64,
    frequency: f32,
    sample_rate: f32,
}

impl Default for Metro {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Metro {
    /// Create a clock at 1 Hz.
    pub fn new(sample_rate: f32) -> Self {
        let mut metro = Self {
            phase: 0.0,
            phase_inc: 0.0,
            frequency: 1.0,
            sample_rate,
        };
        metro.update_increment();
        metro
    }

    /// Set the tick rate in Hz. Negative rates stop the clock.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.update_increment();
    }

    /// Current tick rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Change the sample rate, keeping the tick rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_increment();
    }

    /// Restart the current period.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Fraction of the current period elapsed, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance one sample. Returns `true` on the sample where the period wraps.
    #[inline]
    pub fn process(&mut self) -> bool {
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            // Rates above the sample rate collapse to one tick per sample.
            if self.phase >= 1.0 {
                self.phase = 0.0;
            }
            true
        } else {
            false
        }
    }

    fn update_increment(&mut self) {
        self.phase_inc = f64::from(self.frequency) / f64::from(self.sample_rate);
    }
}
