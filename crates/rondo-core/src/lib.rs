//! Rondo Core - signal primitives for the rondo synthesis engine
//!
//! Every type here runs inside a fixed-period audio callback: no allocation,
//! no blocking, one call per sample.
//!
//! # Primitives
//!
//! - [`Oscillator`] - Phase-accumulating oscillator (sine, triangle, saw, square)
//! - [`AdEnvelope`] - Attack/decay envelope with adjustable curve and output range
//! - [`StateVariableFilter`] - TPT state variable filter exposing all outputs at once
//! - [`Metro`] - Phase-accumulating clock that reports each period wrap
//!
//! ## Processing
//!
//! - [`Processor`] - Mono sample-in/sample-out trait shared by the engine's stages
//!
//! ## Utilities
//!
//! - [`midi_to_freq`], [`saturate`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! rondo-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rondo_core::{AdEnvelope, Oscillator};
//!
//! let mut osc = Oscillator::new(48000.0);
//! let mut env = AdEnvelope::new(48000.0);
//! env.trigger();
//!
//! osc.set_amplitude(env.advance());
//! let sample = osc.advance();
//! assert!(sample.abs() <= 1.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod ad_envelope;
pub mod math;
pub mod metro;
pub mod oscillator;
pub mod processor;
pub mod svf;

pub use ad_envelope::{AdEnvelope, EnvelopeSegment};
pub use math::{SATURATION_CEILING, flush_denormal, midi_to_freq, saturate};
pub use metro::Metro;
pub use oscillator::{Oscillator, Waveform};
pub use processor::Processor;
pub use svf::{StateVariableFilter, SvfOutputs};
