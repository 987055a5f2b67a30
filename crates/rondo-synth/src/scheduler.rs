//! Control-rate decimation.

/// Decides which audio samples also run a control tick.
///
/// With decimation `K`, the first sample and every `K`th sample after it
/// are control samples, so across `K·n` samples exactly `n` control ticks
/// run. `K = 1` ticks on every sample.
///
/// # Example
///
/// ```rust
/// use rondo_synth::ControlScheduler;
///
/// let mut sched = ControlScheduler::new(4);
/// let ticks: Vec<bool> = (0..8).map(|_| sched.tick()).collect();
/// assert_eq!(ticks, [true, false, false, false, true, false, false, false]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheduler {
    decimation: u32,
    countdown: u32,
}

impl Default for ControlScheduler {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ControlScheduler {
    /// Create a scheduler. `decimation` is raised to at least 1.
    pub const fn new(decimation: u32) -> Self {
        let decimation = if decimation == 0 { 1 } else { decimation };
        Self {
            decimation,
            countdown: 0,
        }
    }

    /// Samples per control tick.
    #[inline]
    pub const fn decimation(&self) -> u32 {
        self.decimation
    }

    /// Control rate in Hz for an audio rate.
    #[inline]
    pub fn control_rate(&self, sample_rate: f32) -> f32 {
        sample_rate / self.decimation as f32
    }

    /// Advance one audio sample. Returns `true` if a control tick is due.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.countdown == 0 {
            self.countdown = self.decimation - 1;
            true
        } else {
            self.countdown -= 1;
            false
        }
    }

    /// Make the next sample a control sample.
    pub fn reset(&mut self) {
        self.countdown = 0;
    }
}
