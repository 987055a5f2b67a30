//! Mono processing trait.
//!
//! [`Processor`] is the seam between the engine's serial stages: each stage
//! consumes one sample and produces one sample, and the chain is the
//! composition of those calls in order.

/// A mono, stateful, per-sample signal processor.
///
/// Implementors must be callable from the audio callback: no allocation and
/// no blocking inside any method.
///
/// # Example
///
/// ```rust
/// use rondo_core::Processor;
///
/// struct Trim {
///     gain: f32,
/// }
///
/// impl Processor for Trim {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut trim = Trim { gain: 0.5 };
/// let mut buf = [1.0, -1.0];
/// trim.process_block_inplace(&mut buf);
/// assert_eq!(buf, [0.5, -0.5]);
/// ```
pub trait Processor {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a buffer in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Recompute sample-rate dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal history without touching parameters.
    fn reset(&mut self);
}
