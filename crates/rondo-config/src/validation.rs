//! Rig validation.
//!
//! [`validate_rig`] checks every section of a [`RigConfig`] and reports all
//! problems at once: a single error as itself, several as
//! [`ValidationError::Multiple`].
//!
//! # Example
//!
//! ```rust
//! use rondo_config::{RigConfig, ValidationError, validate_rig};
//!
//! let mut rig = RigConfig::default();
//! assert!(validate_rig(&rig).is_ok());
//!
//! rig.engine.control_decimation = 0;
//! assert!(matches!(validate_rig(&rig), Err(ValidationError::Zero { .. })));
//! ```

use rondo_synth::ParamId;
use thiserror::Error;

use crate::rig::RigConfig;
use crate::scene::Scene;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A count or rate that must be positive is zero.
    #[error("'{field}' must be greater than zero")]
    Zero {
        /// Dotted path of the field.
        field: String,
    },

    /// A value outside its allowed range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted path of the field.
        field: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Knob entry naming no known parameter.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Button press scheduled at a negative or non-finite time.
    #[error("press {index} has invalid time {at}")]
    InvalidPressTime {
        /// Position in the press list.
        index: usize,
        /// The offending time in seconds.
        at: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn fold(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn nonzero(errors: &mut Vec<ValidationError>, field: &str, value: u64) {
    if value == 0 {
        errors.push(ValidationError::Zero {
            field: field.to_string(),
        });
    }
}

fn scene_errors(scene: &Scene, errors: &mut Vec<ValidationError>) {
    for (name, &position) in &scene.knobs {
        if ParamId::from_name(name).is_none() {
            errors.push(ValidationError::UnknownParameter(name.clone()));
        } else if !(0.0..=1.0).contains(&position) {
            errors.push(ValidationError::OutOfRange {
                field: format!("scene.knobs.{name}"),
                value: position,
                min: 0.0,
                max: 1.0,
            });
        }
    }
    for (index, press) in scene.presses.iter().enumerate() {
        if !press.at.is_finite() || press.at < 0.0 {
            errors.push(ValidationError::InvalidPressTime {
                index,
                at: press.at,
            });
        }
    }
}

/// Validate a scene on its own.
pub fn validate_scene(scene: &Scene) -> ValidationResult<()> {
    let mut errors = Vec::new();
    scene_errors(scene, &mut errors);
    fold(errors)
}

/// Validate a whole rig: engine section, telemetry section and scene.
pub fn validate_rig(rig: &RigConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let engine = &rig.engine;

    nonzero(&mut errors, "engine.sample_rate", u64::from(engine.sample_rate));
    nonzero(&mut errors, "engine.block_size", engine.block_size as u64);
    nonzero(&mut errors, "engine.channels", u64::from(engine.channels));
    nonzero(
        &mut errors,
        "engine.control_decimation",
        u64::from(engine.control_decimation),
    );
    if !engine.analog_slew_seconds.is_finite() || engine.analog_slew_seconds < 0.0 {
        errors.push(ValidationError::OutOfRange {
            field: "engine.analog_slew_seconds".to_string(),
            value: engine.analog_slew_seconds,
            min: 0.0,
            max: f32::MAX,
        });
    }
    if let Some(rate) = rig.telemetry.log_rate {
        nonzero(&mut errors, "telemetry.log_rate", u64::from(rate));
    }

    scene_errors(&rig.scene, &mut errors);
    fold(errors)
}
