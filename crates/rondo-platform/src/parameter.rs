//! Normalized-to-engineering parameter mapping.

use libm::{expf, logf};

/// Response curve from a normalized `[0, 1]` input to `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// `min + x·(max − min)`
    #[default]
    Linear,
    /// `min + x²·(max − min)`. More resolution at the bottom of the travel.
    Exponential,
    /// Equal ratios per unit of travel. `min` must be positive; smaller
    /// values are raised to a floor.
    Logarithmic,
    /// `min + x³·(max − min)`.
    Cube,
}

impl Curve {
    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::Exponential => "exponential",
            Curve::Logarithmic => "logarithmic",
            Curve::Cube => "cube",
        }
    }
}

/// Floor substituted for non-positive bounds on a logarithmic curve.
const LOG_FLOOR: f32 = 1.0e-7;

/// A `(min, max, curve)` mapping.
///
/// Input outside `[0, 1]` is clamped first, so no physical reading can map
/// outside `[min, max]`.
///
/// # Example
///
/// ```rust
/// use rondo_platform::{Curve, Parameter};
///
/// let depth = Parameter::new(0.0, 1000.0, Curve::Linear);
/// assert_eq!(depth.process(0.5), 500.0);
/// assert_eq!(depth.process(3.0), 1000.0);
///
/// let pitch = Parameter::new(1.0, 64.0, Curve::Exponential);
/// assert_eq!(pitch.process(0.5), 1.0 + 0.25 * 63.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    /// Output at input 0.
    pub min: f32,
    /// Output at input 1.
    pub max: f32,
    /// Response curve.
    pub curve: Curve,
}

impl Parameter {
    /// Create a mapping.
    pub const fn new(min: f32, max: f32, curve: Curve) -> Self {
        Self { min, max, curve }
    }

    /// Shorthand for a linear mapping.
    pub const fn linear(min: f32, max: f32) -> Self {
        Self::new(min, max, Curve::Linear)
    }

    /// Map a normalized input.
    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        let x = input.clamp(0.0, 1.0);
        let span = self.max - self.min;
        match self.curve {
            Curve::Linear => self.min + x * span,
            Curve::Exponential => self.min + x * x * span,
            Curve::Cube => self.min + x * x * x * span,
            Curve::Logarithmic => {
                let lmin = logf(self.min.max(LOG_FLOOR));
                let lmax = logf(self.max.max(LOG_FLOOR));
                expf(lmin + x * (lmax - lmin))
            }
        }
    }

    /// Inverse of [`process`](Self::process): the input that produces
    /// `value`, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        let x = match self.curve {
            Curve::Linear => (value - self.min) / span,
            Curve::Exponential => libm::sqrtf(((value - self.min) / span).max(0.0)),
            Curve::Cube => libm::cbrtf((value - self.min) / span),
            Curve::Logarithmic => {
                let lmin = logf(self.min.max(LOG_FLOOR));
                let lmax = logf(self.max.max(LOG_FLOOR));
                (logf(value.max(LOG_FLOOR)) - lmin) / (lmax - lmin)
            }
        };
        x.clamp(0.0, 1.0)
    }
}
