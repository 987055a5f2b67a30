//! Factory scenes bundled with rondo.
//!
//! Built-in scenes that are always available without external files. They
//! double as examples of the scene format.

use crate::Scene;

/// Names of the factory scenes, in listing order.
pub static FACTORY_SCENE_NAMES: &[&str] = &["init", "heartbeat", "rattle", "drive", "walk"];

static FACTORY_SCENES_TOML: &[(&str, &str)] = &[
    ("init", INIT_SCENE),
    ("heartbeat", HEARTBEAT_SCENE),
    ("rattle", RATTLE_SCENE),
    ("drive", DRIVE_SCENE),
    ("walk", WALK_SCENE),
];

/// Power-on panel: every knob at its default.
const INIT_SCENE: &str = r#"
name = "init"
description = "Power-on defaults: 1 Hz clock, 0.4 s decays, unity stage"
"#;

/// Slow, deep kick.
const HEARTBEAT_SCENE: &str = r#"
name = "heartbeat"
description = "Slow clock with a long, low kick and a steep pitch drop"

[knobs]
clock_rate = 0.1
amp_decay = 0.3
base_pitch = 0.55
pitch_decay = 0.02
pitch_curve = 0.2
pitch_depth = 0.6
"#;

/// Fast clicks.
const RATTLE_SCENE: &str = r#"
name = "rattle"
description = "Fast clock with short clicky hits"

[knobs]
clock_rate = 0.9
amp_decay = 0.02
amp_curve = 0.2
base_pitch = 0.9
pitch_decay = 0.005
pitch_depth = 1.0
"#;

/// Stage pushed into saturation.
const DRIVE_SCENE: &str = r#"
name = "drive"
description = "Hot stage gain with a lifted mid band"

[knobs]
clock_rate = 0.3
stage_gain = 1.0
stage_mid_freq = 0.1
stage_mid_amp = 0.75
stage_low_amp = 0.5
stage_high_amp = 0.1
"#;

/// Pages through stages while playing.
const WALK_SCENE: &str = r#"
name = "walk"
description = "Pages forward once a second, then back to the first stage"

[knobs]
clock_rate = 0.2

[[presses]]
at = 1.0
button = "forward"

[[presses]]
at = 2.0
button = "forward"

[[presses]]
at = 3.0
button = "backward"

[[presses]]
at = 4.0
button = "backward"
"#;

/// All factory scenes.
///
/// Scenes that fail to parse are skipped; the tests keep that set empty.
pub fn factory_scenes() -> Vec<Scene> {
    FACTORY_SCENES_TOML
        .iter()
        .filter_map(|(_, toml_str)| toml::from_str(toml_str).ok())
        .collect()
}

/// A factory scene by name.
pub fn get_factory_scene(name: &str) -> Option<Scene> {
    FACTORY_SCENES_TOML
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, toml_str)| toml::from_str(toml_str).ok())
}

/// True if `name` is a factory scene.
pub fn is_factory_scene(name: &str) -> bool {
    FACTORY_SCENE_NAMES.contains(&name)
}
