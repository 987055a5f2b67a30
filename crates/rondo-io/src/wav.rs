//! WAV file writing and reading.
//!
//! The renderer produces interleaved frames block by block, so writing goes
//! through [`WavStreamWriter`]; [`write_wav`] is the one-shot form.
//! Reading keeps the file's channel layout.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample: 32 writes IEEE float, 16 and 24 write PCM.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// WAV file metadata read without loading sample data.
#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    /// Channel count, sample rate and bit depth.
    pub spec: WavSpec,
    /// Total number of frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));
    Ok(WavInfo {
        spec,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
    })
}

/// Incremental WAV writer for interleaved `f32` frames.
///
/// # Example
///
/// ```rust,no_run
/// use rondo_io::{WavSpec, WavStreamWriter};
///
/// let mut writer = WavStreamWriter::create("out.wav", WavSpec::default())?;
/// writer.write_block(&[0.0; 512])?;
/// let frames = writer.finalize()?;
/// assert_eq!(frames, 256);
/// # Ok::<(), rondo_io::Error>(())
/// ```
pub struct WavStreamWriter {
    writer: WavWriter<BufWriter<File>>,
    spec: WavSpec,
    max_int: f32,
    samples: u64,
}

impl WavStreamWriter {
    /// Create (or truncate) `path` and write the header.
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> Result<Self> {
        let writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
        let max_int = if spec.bits_per_sample == 32 {
            0.0
        } else {
            (1i32 << (spec.bits_per_sample - 1)) as f32
        };
        Ok(Self {
            writer,
            spec,
            max_int,
            samples: 0,
        })
    }

    /// Format being written.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Append interleaved samples.
    pub fn write_block(&mut self, samples: &[f32]) -> Result<()> {
        if self.spec.bits_per_sample == 32 {
            for &sample in samples {
                self.writer.write_sample(sample)?;
            }
        } else {
            let max = self.max_int;
            for &sample in samples {
                self.writer
                    .write_sample((sample * max).clamp(-max, max - 1.0) as i32)?;
            }
        }
        self.samples += samples.len() as u64;
        Ok(())
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.samples / u64::from(self.spec.channels.max(1))
    }

    /// Patch the header and close the file. Returns the frame count.
    pub fn finalize(self) -> Result<u64> {
        let frames = self.frames_written();
        self.writer.finalize()?;
        Ok(frames)
    }
}

/// Write interleaved samples to a WAV file in one call.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut writer = WavStreamWriter::create(path, spec)?;
    writer.write_block(samples)?;
    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as interleaved `f32` samples along with its spec.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec))
}
