//! Parameter identifiers, defaults, and the knob layout.
//!
//! Every control-derived scalar the engine reads lives in one
//! [`ParameterBank`], indexed by [`ParamId`]. The bank is written at control
//! rate and read at audio rate.
//!
//! # Panel layout
//!
//! | Channel | Parameter | Range | Curve |
//! |---|---|---|---|
//! | 8 | clock rate | 0.2 – 10 Hz | linear |
//! | 9 | amp decay | 0 – 4 s | linear |
//! | 10 | base pitch | MIDI 1 – 64 | exponential |
//! | 11 | amp level | 0 – 4 | linear |
//! | 12 | amp curve | −7 – 2 | linear |
//! | 13 | pitch decay | 0 – 8 s | linear |
//! | 14 | pitch curve | −10 – 2 | linear |
//! | 15 | pitch mod depth | 0 – 1000 Hz | linear |
//! | 0 | stage high amp | 0 – 4 | linear |
//! | 1 | stage mid freq | 100 – 8000 Hz | linear |
//! | 2 | stage mid amp | 0 – 4 | linear |
//! | 3 | stage low amp | 0 – 4 | linear |
//! | 4 | stage gain | 0 – 4 | linear |

use rondo_platform::{ControlId, ControlMapper, Curve, KNOB_COUNT, Parameter};

/// Identifier for every entry in the [`ParameterBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Sequencer clock rate in Hz.
    ClockRate,
    /// Amplitude envelope decay in seconds.
    AmpDecay,
    /// Oscillator base pitch as a MIDI note number.
    BasePitch,
    /// Global amplitude scalar.
    AmpLevel,
    /// Amplitude envelope curve.
    AmpCurve,
    /// Pitch envelope decay in seconds.
    PitchDecay,
    /// Pitch envelope curve.
    PitchCurve,
    /// Pitch envelope peak offset in Hz.
    PitchDepth,
    /// Selected stage: high band level.
    StageHighAmp,
    /// Selected stage: mid band center frequency in Hz.
    StageMidFreq,
    /// Selected stage: mid band level.
    StageMidAmp,
    /// Selected stage: low band level.
    StageLowAmp,
    /// Selected stage: input gain.
    StageGain,
}

impl ParamId {
    /// Number of parameters.
    pub const COUNT: usize = 13;

    /// Every parameter in bank order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::ClockRate,
        ParamId::AmpDecay,
        ParamId::BasePitch,
        ParamId::AmpLevel,
        ParamId::AmpCurve,
        ParamId::PitchDecay,
        ParamId::PitchCurve,
        ParamId::PitchDepth,
        ParamId::StageHighAmp,
        ParamId::StageMidFreq,
        ParamId::StageMidAmp,
        ParamId::StageLowAmp,
        ParamId::StageGain,
    ];

    /// Slot in the bank.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in scene files and listings.
    pub const fn name(self) -> &'static str {
        match self {
            ParamId::ClockRate => "clock_rate",
            ParamId::AmpDecay => "amp_decay",
            ParamId::BasePitch => "base_pitch",
            ParamId::AmpLevel => "amp_level",
            ParamId::AmpCurve => "amp_curve",
            ParamId::PitchDecay => "pitch_decay",
            ParamId::PitchCurve => "pitch_curve",
            ParamId::PitchDepth => "pitch_depth",
            ParamId::StageHighAmp => "stage_high_amp",
            ParamId::StageMidFreq => "stage_mid_freq",
            ParamId::StageMidAmp => "stage_mid_amp",
            ParamId::StageLowAmp => "stage_low_amp",
            ParamId::StageGain => "stage_gain",
        }
    }

    /// Look up a parameter by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Display unit.
    pub const fn unit(self) -> &'static str {
        match self {
            ParamId::ClockRate | ParamId::PitchDepth | ParamId::StageMidFreq => "Hz",
            ParamId::AmpDecay | ParamId::PitchDecay => "s",
            ParamId::BasePitch => "note",
            _ => "",
        }
    }

    /// True for the five parameters written into the selected stage.
    pub const fn is_stage_param(self) -> bool {
        matches!(
            self,
            ParamId::StageHighAmp
                | ParamId::StageMidFreq
                | ParamId::StageMidAmp
                | ParamId::StageLowAmp
                | ParamId::StageGain
        )
    }

    /// Power-on value, used before the first control tick.
    pub const fn default_value(self) -> f32 {
        match self {
            ParamId::ClockRate => 1.0,
            ParamId::AmpDecay | ParamId::PitchDecay => 0.4,
            ParamId::BasePitch => 36.0,
            ParamId::AmpLevel => 1.0,
            ParamId::AmpCurve | ParamId::PitchCurve => 0.0,
            ParamId::PitchDepth => 1000.0,
            ParamId::StageMidFreq => 1000.0,
            ParamId::StageHighAmp
            | ParamId::StageMidAmp
            | ParamId::StageLowAmp
            | ParamId::StageGain => 1.0,
        }
    }

    /// Panel knob channel and mapping curve.
    pub const fn binding(self) -> (u8, Parameter) {
        match self {
            ParamId::ClockRate => (8, Parameter::linear(0.2, 10.0)),
            ParamId::AmpDecay => (9, Parameter::linear(0.0, 4.0)),
            ParamId::BasePitch => (10, Parameter::new(1.0, 64.0, Curve::Exponential)),
            ParamId::AmpLevel => (11, Parameter::linear(0.0, 4.0)),
            ParamId::AmpCurve => (12, Parameter::linear(-7.0, 2.0)),
            ParamId::PitchDecay => (13, Parameter::linear(0.0, 8.0)),
            ParamId::PitchCurve => (14, Parameter::linear(-10.0, 2.0)),
            ParamId::PitchDepth => (15, Parameter::linear(0.0, 1000.0)),
            ParamId::StageHighAmp => (0, Parameter::linear(0.0, 4.0)),
            ParamId::StageMidFreq => (1, Parameter::linear(100.0, 8000.0)),
            ParamId::StageMidAmp => (2, Parameter::linear(0.0, 4.0)),
            ParamId::StageLowAmp => (3, Parameter::linear(0.0, 4.0)),
            ParamId::StageGain => (4, Parameter::linear(0.0, 4.0)),
        }
    }
}

/// Knob-to-parameter table for the panel.
pub type PanelMapper = ControlMapper<ParamId, KNOB_COUNT>;

/// Build the panel's knob table from [`ParamId::binding`].
pub fn panel_mapper() -> PanelMapper {
    let mut mapper = PanelMapper::new();
    for id in ParamId::ALL {
        let (channel, parameter) = id.binding();
        mapper.map(ControlId::hardware(channel), id, parameter);
    }
    mapper
}

/// Current value of every parameter.
///
/// Writes that change a value bump [`revision`](Self::revision), so readers
/// can skip recomputation while nothing moved.
///
/// # Example
///
/// ```rust
/// use rondo_synth::{ParamId, ParameterBank};
///
/// let mut bank = ParameterBank::default();
/// assert_eq!(bank.get(ParamId::ClockRate), 1.0);
///
/// let rev = bank.revision();
/// bank.set(ParamId::ClockRate, 1.0);
/// assert_eq!(bank.revision(), rev);
/// bank.set(ParamId::ClockRate, 4.0);
/// assert_ne!(bank.revision(), rev);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBank {
    values: [f32; ParamId::COUNT],
    revision: u32,
}

impl Default for ParameterBank {
    fn default() -> Self {
        Self {
            values: ParamId::ALL.map(ParamId::default_value),
            revision: 0,
        }
    }
}

impl ParameterBank {
    /// Value of one parameter.
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Write one parameter.
    #[inline]
    pub fn set(&mut self, id: ParamId, value: f32) {
        let slot = &mut self.values[id.index()];
        if *slot != value {
            *slot = value;
            self.revision = self.revision.wrapping_add(1);
        }
    }

    /// Counter bumped on every effective change.
    #[inline]
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// `(id, value)` pairs in bank order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, f32)> + '_ {
        ParamId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_all_order() {
        for (i, id) in ParamId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for id in ParamId::ALL {
            assert_eq!(ParamId::from_name(id.name()), Some(id));
        }
        assert_eq!(ParamId::from_name("volume"), None);
    }

    #[test]
    fn test_defaults_are_within_knob_ranges() {
        for id in ParamId::ALL {
            let (_, p) = id.binding();
            let v = id.default_value();
            assert!(v >= p.min && v <= p.max, "{} default {v} outside range", id.name());
        }
    }

    #[test]
    fn test_panel_mapper_covers_every_parameter_once() {
        let mapper = panel_mapper();
        assert_eq!(mapper.len(), ParamId::COUNT);
        for id in ParamId::ALL {
            let (channel, _) = id.binding();
            assert_eq!(mapper.get_target(ControlId::hardware(channel)), Some(id));
        }
    }

    #[test]
    fn test_stage_params() {
        let stage: usize = ParamId::ALL.iter().filter(|id| id.is_stage_param()).count();
        assert_eq!(stage, 5);
        assert!(!ParamId::ClockRate.is_stage_param());
    }

    #[test]
    fn test_bank_iter() {
        let bank = ParameterBank::default();
        let collected: Vec<_> = bank.iter().collect();
        assert_eq!(collected.len(), ParamId::COUNT);
        assert_eq!(collected[0], (ParamId::ClockRate, 1.0));
    }
}
