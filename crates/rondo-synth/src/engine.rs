//! The per-sample orchestrator.
//!
//! [`AudioEngine`] owns every piece of synthesis state and runs it in a
//! fixed order each sample:
//!
//! 1. control tick, if the [`ControlScheduler`] says one is due:
//!    poll the surface, map knobs into the bank, apply button edges to the
//!    stage selection, copy the bank into the selected stage, set the clock
//!    rate
//! 2. sequencer advance (at most one voice triggered)
//! 3. envelope refresh from the bank
//! 4. voice summation
//! 5. stage chain
//! 6. post high-pass
//!
//! The result is written to every channel of the output frame.
//!
//! # Example
//!
//! ```rust
//! use rondo_synth::{Engine, EngineSettings};
//!
//! let settings = EngineSettings::default();
//! let mut engine = Engine::new(settings);
//! let mut surface = engine.surface(0.1);
//!
//! let mut block = [0.0f32; 2 * 64];
//! engine.process_block(&mut surface, &mut block, 2);
//! assert!(block.chunks_exact(2).all(|f| f[0] == f[1]));
//! ```

use rondo_core::Processor;
use rondo_platform::{Button, ControlSurface, VirtualSurface};

use crate::params::{PanelMapper, ParamId, ParameterBank, panel_mapper};
use crate::post_filter::PostFilter;
use crate::scheduler::ControlScheduler;
use crate::sequencer::TriggerSequencer;
use crate::stage::{StageChain, StageParams};
use crate::telemetry::{Snapshot, Telemetry};
use crate::voice::VoiceBank;

/// Voices on the shipped instrument.
pub const VOICE_COUNT: usize = 8;
/// Mixer stages on the shipped instrument.
pub const STAGE_COUNT: usize = 1;

/// The shipped configuration.
pub type Engine = AudioEngine<VOICE_COUNT, STAGE_COUNT>;

/// Construction-time settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,
    /// Audio samples per control tick (raised to at least 1).
    pub control_decimation: u32,
    /// Whether telemetry reports are produced.
    pub telemetry: bool,
    /// Samples between telemetry reports.
    pub telemetry_interval: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            control_decimation: 1,
            telemetry: false,
            telemetry_interval: 6000,
        }
    }
}

impl EngineSettings {
    /// Control rate in Hz.
    pub fn control_rate(&self) -> f32 {
        ControlScheduler::new(self.control_decimation).control_rate(self.sample_rate)
    }
}

/// Sequenced `N`-voice synthesizer with an `M`-stage mixer chain.
#[derive(Debug, Clone)]
pub struct AudioEngine<const N: usize, const M: usize> {
    settings: EngineSettings,
    bank: ParameterBank,
    mapper: PanelMapper,
    sequencer: TriggerSequencer<N>,
    voices: VoiceBank<N>,
    chain: StageChain<M>,
    post: PostFilter,
    scheduler: ControlScheduler,
    telemetry: Telemetry,
    last_fired: Option<usize>,
}

impl<const N: usize, const M: usize> AudioEngine<N, M> {
    /// Build an engine with default parameters and the panel knob layout.
    pub fn new(settings: EngineSettings) -> Self {
        let sr = settings.sample_rate;
        let bank = ParameterBank::default();
        let mut engine = Self {
            settings,
            mapper: panel_mapper(),
            sequencer: TriggerSequencer::new(sr),
            voices: VoiceBank::new(sr),
            chain: StageChain::new(sr),
            post: PostFilter::new(sr),
            scheduler: ControlScheduler::new(settings.control_decimation),
            telemetry: Telemetry::new(settings.telemetry, settings.telemetry_interval),
            last_fired: None,
            bank,
        };
        engine.sequencer.set_rate(engine.bank.get(ParamId::ClockRate));
        engine.voices.refresh(&engine.bank);
        engine
    }

    /// A [`VirtualSurface`] polled at this engine's control rate, with every
    /// mapped knob resting at the position of the bank's current value.
    pub fn surface(&self, slew_seconds: f32) -> VirtualSurface {
        let mut surface = VirtualSurface::new(self.settings.control_rate(), slew_seconds);
        for mapping in self.mapper.iter().filter(|m| m.control.is_hardware()) {
            let position = mapping.parameter.normalize(self.bank.get(mapping.target));
            surface.snap_knob(usize::from(mapping.control.index()), position);
        }
        surface
    }

    /// Replace the knob table.
    pub fn set_mapper(&mut self, mapper: PanelMapper) {
        self.mapper = mapper;
    }

    /// Knob table in use.
    pub fn mapper(&self) -> &PanelMapper {
        &self.mapper
    }

    /// Construction settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Parameter bank.
    pub fn bank(&self) -> &ParameterBank {
        &self.bank
    }

    /// Mutable parameter bank, for hosts writing parameters directly.
    pub fn bank_mut(&mut self) -> &mut ParameterBank {
        &mut self.bank
    }

    /// Stage receiving live writes.
    pub fn active_stage(&self) -> usize {
        self.chain.active_index()
    }

    /// Voice the next clock tick will trigger.
    pub fn current_voice(&self) -> usize {
        self.sequencer.current_voice()
    }

    /// Voice triggered on the most recent sample, if any.
    pub fn last_fired(&self) -> Option<usize> {
        self.last_fired
    }

    /// Stored parameters of stage `index`.
    pub fn stage_params(&self, index: usize) -> Option<&StageParams> {
        self.chain.params(index)
    }

    /// Sequencer.
    pub fn sequencer(&self) -> &TriggerSequencer<N> {
        &self.sequencer
    }

    /// Voice bank.
    pub fn voices(&self) -> &VoiceBank<N> {
        &self.voices
    }

    /// Stage chain.
    pub fn chain(&self) -> &StageChain<M> {
        &self.chain
    }

    /// Telemetry state.
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Run one control tick: poll, map, page, apply.
    pub fn control_tick<S: ControlSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.poll();

        let bank = &mut self.bank;
        self.mapper.read_into(&*surface, |id, value| bank.set(id, value));

        if surface.rising_edge(Button::Forward) {
            self.chain.select_next();
        }
        if surface.rising_edge(Button::Backward) {
            self.chain.select_previous();
        }

        self.chain.apply_to_selected(&self.bank);
        self.sequencer.set_rate(self.bank.get(ParamId::ClockRate));
    }

    /// Run one audio sample without a control tick.
    #[inline]
    pub fn audio_tick(&mut self) -> f32 {
        self.last_fired = self.sequencer.advance(&mut self.voices);
        self.voices.refresh(&self.bank);
        let mono = self.voices.process();
        let shaped = self.chain.process(mono);
        let out = self.post.process(shaped);

        if let Some(peak) = self.telemetry.observe(out) {
            let snapshot = Snapshot {
                active_stage: self.chain.active_index(),
                next_voice: self.sequencer.current_voice(),
                clock_hz: self.sequencer.rate(),
                peak,
                fires: self.sequencer.fire_count(),
            };
            self.telemetry.publish(&snapshot);
        }
        out
    }

    /// One sample, with a control tick first when one is due.
    #[inline]
    pub fn next_sample<S: ControlSurface + ?Sized>(&mut self, surface: &mut S) -> f32 {
        if self.scheduler.tick() {
            self.control_tick(surface);
        }
        self.audio_tick()
    }

    /// Fill an interleaved buffer of `channels`-wide frames, writing the
    /// same sample to every channel. A trailing partial frame is zeroed.
    pub fn process_block<S: ControlSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        output: &mut [f32],
        channels: usize,
    ) {
        let channels = channels.max(1);
        let mut frames = output.chunks_exact_mut(channels);
        for frame in &mut frames {
            let sample = self.next_sample(surface);
            frame.fill(sample);
        }
        frames.into_remainder().fill(0.0);
    }

    /// Change the sample rate of every component.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.settings.sample_rate = sample_rate;
        self.sequencer.set_sample_rate(sample_rate);
        self.voices.set_sample_rate(sample_rate);
        self.chain.set_sample_rate(sample_rate);
        self.post.set_sample_rate(sample_rate);
    }

    /// Silence voices and clear filter state. Parameters, stage settings
    /// and the stage selection are kept.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.voices.reset();
        self.chain.reset();
        self.post.reset();
        self.scheduler.reset();
        self.last_fired = None;
    }
}
