//! Audio I/O for the rondo host tools.
//!
//! - **WAV output**: [`WavStreamWriter`] for block-by-block rendering,
//!   [`write_wav`] / [`read_wav`] / [`read_wav_info`] for whole files
//! - **Live output**: [`OutputStream`] plays frames generated on the cpal
//!   audio thread until its run flag is cleared
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rondo_io::{WavSpec, WavStreamWriter};
//! use rondo_synth::{Engine, EngineSettings};
//!
//! let mut engine = Engine::new(EngineSettings::default());
//! let mut surface = engine.surface(0.1);
//! let mut writer = WavStreamWriter::create("kick.wav", WavSpec::default())?;
//!
//! let mut block = vec![0.0f32; 2 * 256];
//! for _ in 0..(48000 / 256) {
//!     engine.process_block(&mut surface, &mut block, 2);
//!     writer.write_block(&block)?;
//! }
//! writer.finalize()?;
//! # Ok::<(), rondo_io::Error>(())
//! ```

mod stream;
mod wav;

pub use stream::{AudioDevice, OutputStream, find_output_device, list_output_devices};
pub use wav::{WavInfo, WavSpec, WavStreamWriter, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The device's sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
