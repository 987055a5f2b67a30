//! Smoothed analog control.
//!
//! Each poll moves the reported value toward the latest raw reading:
//!
//! ```text
//! y[n] = y[n-1] + coeff * (x[n] - y[n-1])
//! coeff = 1 - exp(-1 / (slew_seconds * update_rate))
//! ```
//!
//! so `slew_seconds` is the time constant (63.2% of a step) at the rate the
//! control is polled.

use libm::expf;

/// One knob: raw reading in, smoothed normalized value out.
///
/// # Example
///
/// ```rust
/// use rondo_platform::AnalogControl;
///
/// let mut knob = AnalogControl::new(1000.0, 0.1);
/// knob.set_raw(1.0);
/// for _ in 0..100 {
///     knob.process();
/// }
/// // One time constant: ~63% of the way there.
/// assert!((knob.value() - 0.632).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct AnalogControl {
    raw: f32,
    value: f32,
    coeff: f32,
    update_rate: f32,
    slew_seconds: f32,
    flip: bool,
}

impl Default for AnalogControl {
    fn default() -> Self {
        Self::new(48000.0, crate::DEFAULT_SLEW_SECONDS)
    }
}

impl AnalogControl {
    /// Create a control polled at `update_rate` Hz with the given time constant.
    pub fn new(update_rate: f32, slew_seconds: f32) -> Self {
        let mut control = Self {
            raw: 0.0,
            value: 0.0,
            coeff: 1.0,
            update_rate,
            slew_seconds,
            flip: false,
        };
        control.recalculate_coeff();
        control
    }

    /// Report `1 - reading` (for pots wired in reverse).
    pub fn set_flip(&mut self, flip: bool) {
        self.flip = flip;
    }

    /// Change the smoothing time constant.
    pub fn set_slew_seconds(&mut self, slew_seconds: f32) {
        self.slew_seconds = slew_seconds;
        self.recalculate_coeff();
    }

    /// Change the poll rate.
    pub fn set_update_rate(&mut self, update_rate: f32) {
        self.update_rate = update_rate;
        self.recalculate_coeff();
    }

    /// Store the latest raw reading, clamped to `[0, 1]`.
    #[inline]
    pub fn set_raw(&mut self, raw: f32) {
        self.raw = raw.clamp(0.0, 1.0);
    }

    /// Jump straight to `raw`, bypassing the smoothing.
    pub fn snap(&mut self, raw: f32) {
        self.set_raw(raw);
        self.value = self.raw;
    }

    /// Advance the smoother one poll and return the new value.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.value += self.coeff * (self.raw - self.value);
        self.value()
    }

    /// Smoothed value as of the last poll, in `[0, 1]`.
    #[inline]
    pub fn value(&self) -> f32 {
        if self.flip { 1.0 - self.value } else { self.value }
    }

    fn recalculate_coeff(&mut self) {
        let steps = self.slew_seconds * self.update_rate;
        self.coeff = if steps <= 0.0 {
            1.0
        } else {
            1.0 - expf(-1.0 / steps)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_to_target() {
        let mut knob = AnalogControl::new(48000.0, 0.1);
        knob.set_raw(0.8);
        for _ in 0..48000 {
            knob.process();
        }
        assert!((knob.value() - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_zero_slew_is_instant() {
        let mut knob = AnalogControl::new(48000.0, 0.0);
        knob.set_raw(0.3);
        assert_eq!(knob.process(), 0.3);
    }

    #[test]
    fn test_raw_is_clamped() {
        let mut knob = AnalogControl::new(48000.0, 0.0);
        knob.set_raw(7.0);
        assert_eq!(knob.process(), 1.0);
        knob.set_raw(-2.0);
        assert_eq!(knob.process(), 0.0);
    }

    #[test]
    fn test_snap_and_flip() {
        let mut knob = AnalogControl::new(48000.0, 0.1);
        knob.snap(0.25);
        assert_eq!(knob.value(), 0.25);
        knob.set_flip(true);
        assert_eq!(knob.value(), 0.75);
        // Holding still keeps the value put.
        assert_eq!(knob.process(), 0.75);
    }
}
