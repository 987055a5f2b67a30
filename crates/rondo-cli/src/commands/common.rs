//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use rondo_config::{ConfigError, RigConfig, Scene, get_factory_scene, validate_rig};
use rondo_synth::ParamId;
use std::path::{Path, PathBuf};

/// Rig selection shared by `render` and `play`.
#[derive(Args, Debug)]
pub struct RigArgs {
    /// Rig file (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Factory scene name or scene file; replaces the rig's scene
    #[arg(short, long)]
    pub scene: Option<String>,

    /// Knob position override, 0-1 (e.g. "clock_rate=0.5")
    #[arg(long, value_parser = parse_knob, number_of_values = 1)]
    pub knob: Vec<(String, f32)>,

    /// Number of mixer stages
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub stages: u8,

    /// Audio samples per control tick
    #[arg(long)]
    pub decimation: Option<u32>,

    /// Emit engine telemetry (view with RUST_LOG=rondo::engine=debug)
    #[arg(long)]
    pub telemetry: bool,
}

impl RigArgs {
    /// Build the rig: file or defaults, then scene, then overrides.
    pub fn load(&self) -> anyhow::Result<RigConfig> {
        let mut rig = match &self.config {
            Some(path) => RigConfig::load(path)?,
            None => RigConfig::default(),
        };

        if let Some(name) = &self.scene {
            rig.scene = load_scene(name)?;
        }
        for (name, position) in &self.knob {
            rig.scene.knobs.insert(name.clone(), *position);
        }
        if let Some(decimation) = self.decimation {
            rig.engine.control_decimation = decimation;
        }
        if self.telemetry {
            rig.telemetry.enabled = true;
        }

        validate_rig(&rig)?;
        tracing::info!(scene = %rig.scene.name, stages = self.stages, "rig ready");
        Ok(rig)
    }
}

/// Parse a `name=position` knob override for clap's `value_parser`.
pub fn parse_knob(s: &str) -> Result<(String, f32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid knob format: '{s}' (expected name=position)"))?;
    if ParamId::from_name(name).is_none() {
        return Err(format!(
            "Unknown parameter '{name}'. Use 'rondo params' to list parameters."
        ));
    }
    let position: f32 = value
        .parse()
        .map_err(|_| format!("Invalid knob position '{value}' for '{name}'"))?;
    if !(0.0..=1.0).contains(&position) {
        return Err(format!(
            "Knob position {position} for '{name}' is outside 0-1"
        ));
    }
    Ok((name.to_string(), position))
}

/// Load a scene by factory name, then by file path.
pub fn load_scene(name: &str) -> anyhow::Result<Scene> {
    if let Some(scene) = get_factory_scene(name) {
        return Ok(scene);
    }

    let path = Path::new(name);
    if path.exists() {
        return Ok(Scene::load(path)?);
    }

    Err(ConfigError::SceneNotFound(name.to_string()))
        .context("Use 'rondo scenes' to see available scenes")
}

/// Call `$body` with `$m` bound to the stage count as a const generic.
macro_rules! with_stages {
    ($stages:expr, $m:ident => $body:expr) => {
        match $stages {
            1 => {
                const $m: usize = 1;
                $body
            }
            2 => {
                const $m: usize = 2;
                $body
            }
            3 => {
                const $m: usize = 3;
                $body
            }
            _ => {
                const $m: usize = 4;
                $body
            }
        }
    };
}
pub(crate) use with_stages;
