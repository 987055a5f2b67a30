//! Scenes: knob positions and timed button presses.
//!
//! A scene is how a host drives the engine without a panel. Knob positions
//! are normalized `[0, 1]` and keyed by parameter name; knobs a scene does
//! not mention stay where the engine's defaults put them. Presses are
//! scheduled in seconds from the start of playback.
//!
//! # TOML Format
//!
//! ```toml
//! [scene]
//! name = "walk"
//! description = "Faster clock, page forward after two seconds"
//!
//! [scene.knobs]
//! clock_rate = 0.4
//! stage_gain = 0.5
//!
//! [[scene.presses]]
//! at = 2.0
//! button = "forward"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rondo_platform::{Button, VirtualSurface};
use rondo_synth::ParamId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::validate_scene;

/// One scheduled button press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonPress {
    /// Seconds from the start of playback.
    pub at: f64,
    /// Which button.
    #[serde(with = "button_name")]
    pub button: Button,
}

/// Knob positions and button presses for one performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Normalized knob positions by parameter name.
    #[serde(default)]
    pub knobs: BTreeMap<String, f32>,

    /// Scheduled presses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presses: Vec<ButtonPress>,
}

fn default_name() -> String {
    "init".to_string()
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(default_name())
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            knobs: BTreeMap::new(),
            presses: Vec::new(),
        }
    }

    /// Load and validate a standalone scene file (the `[scene]` table's
    /// contents at top level).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a standalone scene.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let scene: Scene = toml::from_str(toml_str)?;
        validate_scene(&scene)?;
        Ok(scene)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a knob to a normalized position.
    pub fn with_knob(mut self, id: ParamId, position: f32) -> Self {
        self.knobs.insert(id.name().to_string(), position);
        self
    }

    /// Set a knob to the position that yields `value` in the parameter's units.
    pub fn with_value(self, id: ParamId, value: f32) -> Self {
        let (_, parameter) = id.binding();
        self.with_knob(id, parameter.normalize(value))
    }

    /// Schedule a press.
    pub fn with_press(mut self, at: f64, button: Button) -> Self {
        self.presses.push(ButtonPress { at, button });
        self
    }

    /// Knob positions for known parameter names.
    pub fn knob_positions(&self) -> impl Iterator<Item = (ParamId, f32)> + '_ {
        self.knobs
            .iter()
            .filter_map(|(name, &position)| ParamId::from_name(name).map(|id| (id, position)))
    }

    /// Snap every knob this scene names to its position.
    pub fn apply_knobs(&self, surface: &mut VirtualSurface) {
        for (id, position) in self.knob_positions() {
            let (channel, _) = id.binding();
            surface.snap_knob(usize::from(channel), position);
        }
    }

    /// Time of the last scheduled press in seconds, or 0.
    pub fn last_press(&self) -> f64 {
        self.presses.iter().map(|p| p.at).fold(0.0, f64::max)
    }

    /// Convert the presses to a frame-indexed schedule.
    pub fn press_schedule(&self, sample_rate: u32) -> PressSchedule {
        let mut due: Vec<(u64, Button)> = self
            .presses
            .iter()
            .map(|p| ((p.at.max(0.0) * f64::from(sample_rate)).round() as u64, p.button))
            .collect();
        due.sort_by_key(|&(frame, _)| frame);
        PressSchedule { due, next: 0 }
    }
}

/// Presses ordered by the frame they fall on.
#[derive(Debug, Clone, Default)]
pub struct PressSchedule {
    due: Vec<(u64, Button)>,
    next: usize,
}

impl PressSchedule {
    /// Queue on `surface` every press due at or before `frame`.
    /// Returns how many were queued.
    pub fn queue_until(&mut self, frame: u64, surface: &mut VirtualSurface) -> usize {
        let start = self.next;
        while let Some(&(at, button)) = self.due.get(self.next) {
            if at > frame {
                break;
            }
            surface.press(button);
            self.next += 1;
        }
        self.next - start
    }

    /// Presses not yet queued.
    pub fn remaining(&self) -> usize {
        self.due.len() - self.next
    }

    /// True once every press has been queued.
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}

mod button_name {
    use rondo_platform::Button;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(button: &Button, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(button.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Button, D::Error> {
        let name = String::deserialize(deserializer)?;
        Button::from_name(&name).ok_or_else(|| {
            D::Error::custom(format!(
                "unknown button '{name}', expected one of: aux, forward, backward"
            ))
        })
    }
}
