//! Scalar helpers used across the signal path.

use libm::{exp2f, tanhf};

/// Largest `f32` strictly below 1.0.
///
/// [`saturate`] clamps to this so the bound `|y| < 1` holds even where
/// `tanhf` rounds to exactly one.
pub const SATURATION_CEILING: f32 = 1.0 - f32::EPSILON / 2.0;

/// Convert a MIDI note number to frequency in Hz (A4 = note 69 = 440 Hz).
///
/// Fractional notes are allowed, which is how continuous pitch knobs land
/// between semitones.
///
/// ```rust
/// use rondo_core::midi_to_freq;
///
/// assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-3);
/// assert!((midi_to_freq(81.0) - 880.0).abs() < 1e-2);
/// ```
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    440.0 * exp2f((note - 69.0) / 12.0)
}

/// Hyperbolic tangent saturation with a strict unit bound.
///
/// For every finite input the result satisfies `|y| < 1`.
///
/// ```rust
/// use rondo_core::saturate;
///
/// assert!(saturate(1.0e6) < 1.0);
/// assert!(saturate(-1.0e6) > -1.0);
/// assert_eq!(saturate(0.0), 0.0);
/// ```
#[inline]
pub fn saturate(x: f32) -> f32 {
    tanhf(x).clamp(-SATURATION_CEILING, SATURATION_CEILING)
}

/// Flush subnormal values to zero.
///
/// Filter integrators decaying toward silence would otherwise spend
/// thousands of samples in the subnormal range.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_to_freq_reference_points() {
        assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-3);
        assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-3);
        // Lowest knob position: note 1
        let low = midi_to_freq(1.0);
        assert!(low > 8.0 && low < 9.0, "note 1 should be ~8.66 Hz, got {low}");
    }

    #[test]
    fn test_saturate_is_odd_and_bounded() {
        for &x in &[0.1f32, 0.5, 1.0, 3.0, 10.0, 1e9, f32::MAX] {
            let pos = saturate(x);
            let neg = saturate(-x);
            assert!(pos < 1.0, "saturate({x}) = {pos}");
            assert!(neg > -1.0, "saturate(-{x}) = {neg}");
            assert_eq!(pos, -neg);
        }
    }

    #[test]
    fn test_saturate_small_signal_is_near_linear() {
        let y = saturate(0.01);
        assert!((y - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_ceiling_is_below_one() {
        assert!(SATURATION_CEILING < 1.0);
        assert!(1.0 - SATURATION_CEILING < 1e-7);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
    }
}
