//! Rondo Synth - sequenced voice bank and paged mixer chain
//!
//! The synthesis core of a clock-driven percussion synthesizer. A periodic
//! clock triggers voices in strict rotation; each voice is a sine oscillator
//! with amplitude and pitch envelopes; the voice sum runs through a serial
//! chain of 3-band split/recombine/saturate stages and a fixed 10 Hz
//! high-pass.
//!
//! # Components
//!
//! - [`ParameterBank`] / [`ParamId`] - every control-derived scalar
//! - [`TriggerSequencer`] - round-robin voice triggering
//! - [`VoiceBank`] / [`Voice`] - oscillator + amplitude and pitch envelopes
//! - [`StageChain`] / [`Stage`] / [`StageParams`] - serial mixer stages with
//!   a selected stage for live editing
//! - [`PostFilter`] - fixed output high-pass
//! - [`ControlScheduler`] - control-rate decimation
//! - [`Telemetry`] / [`TelemetryMailbox`] - decimated reports handed to a
//!   host thread through a lock-free slot
//! - [`AudioEngine`] - per-sample orchestration; [`Engine`] is the shipped
//!   8-voice, 1-stage configuration
//!
//! # Real-time contract
//!
//! Everything is sized at compile time (`N` voices, `M` stages). Nothing in
//! the per-sample path allocates, blocks, or returns an error.
//!
//! # Example
//!
//! ```rust
//! use rondo_synth::{AudioEngine, EngineSettings};
//!
//! let mut engine = AudioEngine::<8, 2>::new(EngineSettings::default());
//! let mut surface = engine.surface(0.1);
//!
//! let mut out = [0.0f32; 256];
//! engine.process_block(&mut surface, &mut out, 1);
//! assert!(out.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Features
//!
//! - `std` (default): links the standard library; adds
//!   [`Telemetry::share_mailbox`] for cross-thread readers
//! - `tracing`: adds [`Snapshot::log`], which a host thread uses to turn
//!   taken reports into `tracing::debug!` events

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
pub mod params;
pub mod post_filter;
pub mod scheduler;
pub mod sequencer;
pub mod stage;
pub mod telemetry;
pub mod voice;

pub use engine::{AudioEngine, Engine, EngineSettings, STAGE_COUNT, VOICE_COUNT};
pub use params::{PanelMapper, ParamId, ParameterBank, panel_mapper};
pub use post_filter::PostFilter;
pub use scheduler::ControlScheduler;
pub use sequencer::TriggerSequencer;
pub use stage::{Stage, StageChain, StageParams};
pub use telemetry::{Snapshot, Telemetry, TelemetryMailbox};
pub use voice::{EnvelopeShape, Voice, VoiceBank};
