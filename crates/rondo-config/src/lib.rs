//! Configuration and scenes for the rondo host tools.
//!
//! A [`RigConfig`] describes how a host runs the engine: sample rate, block
//! size, channel count, control decimation, knob smoothing, telemetry, and
//! the [`Scene`] (knob positions plus timed button presses) that stands in
//! for a performer at the panel.
//!
//! # Features
//!
//! - **Rig files**: load and save TOML, validated on load
//! - **Scenes**: knob positions by parameter name, presses by time
//! - **Validation**: every problem reported at once
//! - **Factory scenes**: built-in starting points
//!
//! # Example
//!
//! ```rust
//! use rondo_config::{RigConfig, get_factory_scene};
//! use rondo_synth::Engine;
//!
//! let scene = get_factory_scene("rattle").expect("factory scene");
//! let rig = RigConfig::with_scene(scene);
//!
//! let engine = Engine::new(rig.engine_settings());
//! let mut surface = engine.surface(rig.engine.analog_slew_seconds);
//! rig.scene.apply_knobs(&mut surface);
//! ```

mod error;
mod rig;
mod scene;

/// Rig and scene validation.
pub mod validation;

/// Factory scenes bundled with the library.
pub mod factory_scenes;

pub use error::ConfigError;
pub use factory_scenes::{
    FACTORY_SCENE_NAMES, factory_scenes, get_factory_scene, is_factory_scene,
};
pub use rig::{EngineSection, RigConfig, TelemetrySection};
pub use scene::{ButtonPress, PressSchedule, Scene};
pub use validation::{ValidationError, ValidationResult, validate_rig, validate_scene};
