//! Round-robin trigger sequencer.
//!
//! A [`Metro`] clock ticks at the clock-rate parameter. On each tick the
//! sequencer triggers the voice at its rotation index and moves the index
//! forward by one, wrapping at `N`. There is no priority and no stealing:
//! after `k` ticks the index is `(start + k) mod N`, and any `N`
//! consecutive ticks trigger every voice exactly once.

use rondo_core::Metro;

use crate::voice::VoiceBank;

/// Clock plus rotating voice index.
///
/// # Example
///
/// ```rust
/// use rondo_synth::{TriggerSequencer, VoiceBank};
///
/// let mut voices = VoiceBank::<4>::new(1000.0);
/// let mut seq = TriggerSequencer::<4>::new(1000.0);
/// seq.set_rate(100.0);
///
/// let fired: Vec<usize> = (0..100).filter_map(|_| seq.advance(&mut voices)).collect();
/// assert_eq!(&fired[..5], &[0, 1, 2, 3, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct TriggerSequencer<const N: usize> {
    clock: Metro,
    current: usize,
    fires: u64,
}

impl<const N: usize> TriggerSequencer<N> {
    /// Create a sequencer at 1 Hz, rotation at voice 0.
    pub fn new(sample_rate: f32) -> Self {
        const { assert!(N > 0, "the sequencer needs at least one voice") };
        Self {
            clock: Metro::new(sample_rate),
            current: 0,
            fires: 0,
        }
    }

    /// Set the clock rate in Hz.
    #[inline]
    pub fn set_rate(&mut self, hz: f32) {
        if hz != self.clock.frequency() {
            self.clock.set_frequency(hz);
        }
    }

    /// Current clock rate in Hz.
    pub fn rate(&self) -> f32 {
        self.clock.frequency()
    }

    /// Voice the next tick will trigger. Always in `0..N`.
    #[inline]
    pub fn current_voice(&self) -> usize {
        self.current
    }

    /// Place the rotation at `index mod N`.
    pub fn set_current_voice(&mut self, index: usize) {
        self.current = index % N;
    }

    /// Ticks fired since construction.
    pub fn fire_count(&self) -> u64 {
        self.fires
    }

    /// Advance the clock one sample. On a tick, trigger the current voice,
    /// rotate, and return the triggered index.
    #[inline]
    pub fn advance(&mut self, voices: &mut VoiceBank<N>) -> Option<usize> {
        if !self.clock.process() {
            return None;
        }
        let fired = self.current;
        voices.trigger(fired);
        self.current = (fired + 1) % N;
        self.fires += 1;
        Some(fired)
    }

    /// Change the clock's sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.clock.set_sample_rate(sample_rate);
    }

    /// Restart the clock period and the rotation.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.current = 0;
        self.fires = 0;
    }
}
