//! Integration tests for rondo-synth.
//!
//! End-to-end scenarios through the public engine API: trigger rotation,
//! clock accuracy, stage selection and isolation, output bounds, and
//! telemetry staying off the audio path.

use rondo_core::Processor;
use rondo_platform::{Button, ControlSurface, VirtualSurface};
use rondo_synth::{
    AudioEngine, Engine, EngineSettings, ParamId, ParameterBank, StageChain, StageParams,
    TriggerSequencer, VoiceBank,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Panel with knobs held at chosen positions and edges injected for one poll.
struct Panel {
    knobs: [f32; 16],
    pending: Vec<Button>,
    edges: Vec<Button>,
}

impl Panel {
    fn at_defaults() -> Self {
        let mut knobs = [0.0; 16];
        for id in ParamId::ALL {
            let (channel, parameter) = id.binding();
            knobs[channel as usize] = parameter.normalize(id.default_value());
        }
        Self {
            knobs,
            pending: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn set(&mut self, id: ParamId, value: f32) {
        let (channel, parameter) = id.binding();
        self.knobs[channel as usize] = parameter.normalize(value);
    }
}

impl ControlSurface for Panel {
    fn poll(&mut self) {
        self.edges = std::mem::take(&mut self.pending);
    }
    fn knob(&self, channel: usize) -> f32 {
        self.knobs.get(channel).copied().unwrap_or(0.0)
    }
    fn rising_edge(&self, button: Button) -> bool {
        self.edges.contains(&button)
    }
}

fn settings_at(sample_rate: f32) -> EngineSettings {
    EngineSettings {
        sample_rate,
        ..EngineSettings::default()
    }
}

// ============================================================================
// Sequencer
// ============================================================================

#[test]
fn eight_voices_rotate_once_per_cycle() {
    let mut engine = Engine::new(settings_at(1000.0));
    let mut panel = Panel::at_defaults();
    panel.set(ParamId::ClockRate, 10.0);

    let mut fired = Vec::new();
    for _ in 0..2000 {
        engine.next_sample(&mut panel);
        if let Some(v) = engine.last_fired() {
            fired.push(v);
        }
        if fired.len() == 8 {
            break;
        }
    }
    assert_eq!(fired, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(engine.current_voice(), 0);
}

#[test]
fn rotation_formula_holds_over_many_fires() {
    let mut voices = VoiceBank::<5>::new(1000.0);
    let mut seq = TriggerSequencer::<5>::new(1000.0);
    seq.set_current_voice(2);
    seq.set_rate(250.0);
    let mut k = 0usize;
    for _ in 0..4000 {
        if let Some(fired) = seq.advance(&mut voices) {
            assert_eq!(fired, (2 + k) % 5);
            k += 1;
            assert_eq!(seq.current_voice(), (2 + k) % 5);
        }
    }
    assert_eq!(k, 1000);
}

#[test]
fn one_hz_clock_fires_once_per_second_at_48k() {
    let mut engine = Engine::new(settings_at(48000.0));
    let mut panel = Panel::at_defaults();
    // No knob table: the bank's default 1 Hz rate stays exact.
    engine.set_mapper(rondo_synth::PanelMapper::new());
    engine.bank_mut().set(ParamId::ClockRate, 1.0);

    let mut fires: Vec<usize> = Vec::new();
    for n in 1..=48000 * 5 + 5 {
        engine.next_sample(&mut panel);
        if engine.last_fired().is_some() {
            fires.push(n);
        }
    }
    assert_eq!(fires.len(), 5);
    for (i, n) in fires.iter().enumerate() {
        let expected = 48000 * (i + 1);
        assert!(n.abs_diff(expected) <= 1, "fire {i} at {n}, expected {expected}");
    }
}

// ============================================================================
// Stage chain
// ============================================================================

#[test]
fn single_stage_selection_is_always_zero() {
    let mut engine = Engine::new(settings_at(48000.0));
    let mut panel = Panel::at_defaults();
    for button in [Button::Forward, Button::Backward, Button::Forward, Button::Aux] {
        panel.pending.push(button);
        engine.control_tick(&mut panel);
        assert_eq!(engine.active_stage(), 0);
    }
}

#[test]
fn knob_edits_land_only_in_selected_stage() {
    let mut engine = AudioEngine::<4, 3>::new(settings_at(48000.0));
    let mut panel = Panel::at_defaults();

    // Stage 0 gets gain 3.
    panel.set(ParamId::StageGain, 3.0);
    engine.control_tick(&mut panel);

    // Move to stage 1, dial a different mid frequency.
    panel.pending.push(Button::Forward);
    panel.set(ParamId::StageGain, 1.0);
    panel.set(ParamId::StageMidFreq, 4000.0);
    engine.control_tick(&mut panel);

    let stage0 = *engine.stage_params(0).expect("stage 0");
    let stage1 = *engine.stage_params(1).expect("stage 1");
    let stage2 = *engine.stage_params(2).expect("stage 2");
    assert!((stage0.gain - 3.0).abs() < 1e-5);
    assert!((stage0.mid_freq - 1000.0).abs() < 1e-2);
    assert!((stage1.mid_freq - 4000.0).abs() < 1e-2);
    assert!((stage1.gain - 1.0).abs() < 1e-5);
    assert_eq!(stage2, StageParams::default());

    // Backward twice clamps at 0 and edits stage 0 again.
    panel.pending.push(Button::Backward);
    engine.control_tick(&mut panel);
    panel.pending.push(Button::Backward);
    engine.control_tick(&mut panel);
    assert_eq!(engine.active_stage(), 0);
    assert!((engine.stage_params(0).expect("stage 0").mid_freq - 4000.0).abs() < 1e-2);
    assert_eq!(*engine.stage_params(1).expect("stage 1"), stage1);
}

#[test]
fn reapplying_identical_values_is_idempotent() {
    let mut chain = StageChain::<3>::new(48000.0);
    let mut bank = ParameterBank::default();
    bank.set(ParamId::StageLowAmp, 0.25);
    chain.select_next();
    chain.apply_to_selected(&bank);
    let snapshot: Vec<StageParams> = (0..3).filter_map(|i| chain.params(i).copied()).collect();

    for _ in 0..10 {
        chain.apply_to_selected(&bank);
    }
    let after: Vec<StageParams> = (0..3).filter_map(|i| chain.params(i).copied()).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn chain_output_stays_below_unity_for_hot_input() {
    let mut chain = StageChain::<2>::new(48000.0);
    let hot = StageParams {
        gain: 4.0,
        high_amp: 4.0,
        mid_amp: 4.0,
        mid_freq: 100.0,
        low_amp: 4.0,
    };
    chain.set_stage_params(0, hot);
    chain.set_stage_params(1, hot);
    for i in 0..48000 {
        let x = 50.0 * (i as f32 * 0.013).sin();
        assert!(chain.process(x).abs() < 1.0);
    }
}

// ============================================================================
// Whole engine
// ============================================================================

#[test]
fn engine_output_is_finite_at_knob_extremes() {
    for position in [0.0f32, 1.0] {
        let mut engine = AudioEngine::<8, 2>::new(settings_at(48000.0));
        let mut panel = Panel::at_defaults();
        panel.knobs = [position; 16];
        let mut out = vec![0.0f32; 48000];
        engine.process_block(&mut panel, &mut out, 1);
        assert!(out.iter().all(|s| s.is_finite()), "non-finite at knobs = {position}");
    }
}

#[test]
fn engine_produces_sound_after_first_tick() {
    let mut engine = Engine::new(settings_at(48000.0));
    let mut panel = Panel::at_defaults();
    panel.set(ParamId::ClockRate, 10.0);
    let mut out = vec![0.0f32; 9600];
    engine.process_block(&mut panel, &mut out, 1);
    let silent_prefix = out.iter().take(4700).all(|s| s.abs() < 1e-6);
    let loud_tail = out.iter().skip(4800).any(|s| s.abs() > 0.01);
    assert!(silent_prefix, "nothing should sound before the first tick");
    assert!(loud_tail, "the first tick should be audible");
}

#[test]
fn virtual_surface_drives_paging_through_debounce() {
    let mut engine = AudioEngine::<8, 3>::new(EngineSettings {
        control_decimation: 48,
        ..EngineSettings::default()
    });
    let mut surface: VirtualSurface = engine.surface(0.1);
    surface.press(Button::Forward);
    surface.press(Button::Forward);
    surface.press(Button::Forward);

    let mut out = vec![0.0f32; 48 * 100];
    engine.process_block(&mut surface, &mut out, 1);
    // Three forwards wrap 0 -> 1 -> 2 -> 0.
    assert!(surface.presses_idle());
    assert_eq!(engine.active_stage(), 0);

    surface.press(Button::Backward);
    engine.process_block(&mut surface, &mut out, 1);
    assert_eq!(engine.active_stage(), 0);

    surface.press(Button::Forward);
    engine.process_block(&mut surface, &mut out, 1);
    assert_eq!(engine.active_stage(), 1);
}

// ============================================================================
// Telemetry
// ============================================================================

/// Subscriber that counts events and accepts everything.
struct CountingSubscriber {
    events: Arc<AtomicUsize>,
}

impl tracing::Subscriber for CountingSubscriber {
    fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
        true
    }
    fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(1)
    }
    fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
    fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
    fn event(&self, _: &tracing::Event<'_>) {
        self.events.fetch_add(1, Ordering::SeqCst);
    }
    fn enter(&self, _: &tracing::span::Id) {}
    fn exit(&self, _: &tracing::span::Id) {}
}

#[test]
fn telemetry_reports_reach_mailbox_without_logging_on_audio_path() {
    let events = Arc::new(AtomicUsize::new(0));
    let subscriber = CountingSubscriber {
        events: Arc::clone(&events),
    };

    let mut engine = Engine::new(EngineSettings {
        telemetry: true,
        telemetry_interval: 1,
        ..EngineSettings::default()
    });
    let mailbox = engine.telemetry().share_mailbox();
    let mut panel = Panel::at_defaults();

    tracing::subscriber::with_default(subscriber, || {
        let mut out = [0.0f32; 2 * 64];
        engine.process_block(&mut panel, &mut out, 2);
    });

    assert_eq!(events.load(Ordering::SeqCst), 0);
    assert_eq!(engine.telemetry().reports(), 64);

    let snapshot = mailbox.take().expect("latest report");
    assert_eq!(snapshot.active_stage, 0);
    assert_eq!(snapshot.next_voice, engine.current_voice());
    assert_eq!(mailbox.take(), None);

    #[cfg(feature = "tracing")]
    {
        let subscriber = CountingSubscriber {
            events: Arc::clone(&events),
        };
        tracing::subscriber::with_default(subscriber, || snapshot.log());
        assert_eq!(events.load(Ordering::SeqCst), 1);
    }
}
