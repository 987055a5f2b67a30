//! Rig file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use rondo_synth::EngineSettings;

use crate::error::ConfigError;
use crate::scene::Scene;
use crate::validation::validate_rig;

/// Audio and control-rate settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Audio sample rate in Hz. Live playback uses the device rate instead.
    pub sample_rate: u32,
    /// Frames per processing block.
    pub block_size: usize,
    /// Output channels; every channel carries the same signal.
    pub channels: u16,
    /// Audio samples per control tick.
    pub control_decimation: u32,
    /// Knob smoothing time in seconds.
    pub analog_slew_seconds: f32,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            block_size: 256,
            channels: 2,
            control_decimation: 1,
            analog_slew_seconds: rondo_platform::DEFAULT_SLEW_SECONDS,
        }
    }
}

/// Engine telemetry settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    /// Emit periodic engine reports.
    pub enabled: bool,
    /// Samples between reports; one eighth of the sample rate when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_rate: Option<u32>,
}

/// A complete host configuration.
///
/// # TOML Format
///
/// ```toml
/// [engine]
/// sample_rate = 48000
/// block_size = 256
/// channels = 2
/// control_decimation = 1
/// analog_slew_seconds = 0.1
///
/// [telemetry]
/// enabled = true
/// log_rate = 6000
///
/// [scene]
/// name = "init"
/// [scene.knobs]
/// clock_rate = 0.2
/// ```
///
/// Every section and field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigConfig {
    /// Audio and control-rate settings.
    #[serde(default)]
    pub engine: EngineSection,

    /// Telemetry settings.
    #[serde(default)]
    pub telemetry: TelemetrySection,

    /// Initial knob positions and scheduled presses.
    #[serde(default)]
    pub scene: Scene,
}

impl RigConfig {
    /// Default rig playing `scene`.
    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Load and validate a rig from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let rig = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), scene = %rig.scene.name, "loaded rig");
        Ok(rig)
    }

    /// Parse and validate a rig from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let rig: RigConfig = toml::from_str(toml_str)?;
        validate_rig(&rig)?;
        Ok(rig)
    }

    /// Save the rig to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the rig to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Samples between telemetry reports.
    pub fn log_rate(&self) -> u32 {
        self.telemetry
            .log_rate
            .unwrap_or(self.engine.sample_rate / 8)
            .max(1)
    }

    /// Engine construction settings at the configured sample rate.
    pub fn engine_settings(&self) -> EngineSettings {
        self.engine_settings_at(self.engine.sample_rate)
    }

    /// Engine construction settings at an externally imposed sample rate,
    /// such as an output device's. An unset log rate scales with it.
    pub fn engine_settings_at(&self, sample_rate: u32) -> EngineSettings {
        let interval = self
            .telemetry
            .log_rate
            .unwrap_or(sample_rate / 8)
            .max(1);
        EngineSettings {
            sample_rate: sample_rate as f32,
            control_decimation: self.engine.control_decimation,
            telemetry: self.telemetry.enabled,
            telemetry_interval: interval,
        }
    }
}
