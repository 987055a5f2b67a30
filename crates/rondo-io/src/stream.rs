//! Real-time output streaming via cpal.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Position in the host's output device list.
    pub index: usize,
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub default_channels: u16,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

/// List every output device on the default host.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    let devices = outputs
        .enumerate()
        .filter_map(|(index, device)| {
            let name = device_name(&device).ok()?;
            let config = device.default_output_config().ok();
            Some(AudioDevice {
                index,
                is_default: default_name.as_deref() == Some(name.as_str()),
                default_sample_rate: config.as_ref().map_or(48000, |c| c.sample_rate()),
                default_channels: config.as_ref().map_or(2, |c| c.channels()),
                name,
            })
        })
        .collect();
    Ok(devices)
}

/// Find an output device by index, exact name, or case-insensitive
/// partial name, in that order.
pub fn find_output_device(name_or_index: &str) -> Result<Device> {
    let host = cpal::default_host();
    let devices: Vec<Device> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();
    let names: Vec<Option<String>> = devices.iter().map(|d| device_name(d).ok()).collect();

    let index = match_device(&names, name_or_index)?;
    devices
        .get(index)
        .cloned()
        .ok_or_else(|| Error::DeviceNotFound(name_or_index.to_string()))
}

/// Resolve a device query against a list of names. Unreadable names are
/// `None` and can only be picked by index.
fn match_device(names: &[Option<String>], query: &str) -> Result<usize> {
    if let Ok(index) = query.parse::<usize>() {
        return if index < names.len() {
            Ok(index)
        } else {
            Err(Error::DeviceNotFound(format!(
                "output device index {index} (only {} devices available)",
                names.len()
            )))
        };
    }

    if let Some(index) = names.iter().position(|n| n.as_deref() == Some(query)) {
        return Ok(index);
    }

    let needle = query.to_lowercase();
    let matches: Vec<(usize, &str)> = names
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.as_deref().map(|n| (i, n)))
        .filter(|(_, n)| n.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(Error::DeviceNotFound(format!(
            "no output device matching '{query}'"
        ))),
        [(index, _)] => Ok(*index),
        [(index, first), ..] => {
            let all: Vec<&str> = matches.iter().map(|(_, n)| *n).collect();
            tracing::warn!(query, candidates = ?all, chosen = *first, "ambiguous device name");
            Ok(*index)
        }
    }
}

/// Output-only audio stream.
///
/// The stream runs at the device's default configuration; callers size
/// their processing from [`sample_rate`](Self::sample_rate) and
/// [`channels`](Self::channels).
pub struct OutputStream {
    device: Device,
    config: cpal::SupportedStreamConfig,
    running: Arc<AtomicBool>,
    _stream: Option<Stream>,
}

impl OutputStream {
    /// Open the named output device, or the default one.
    pub fn new(device: Option<&str>) -> Result<Self> {
        let device = match device {
            Some(query) => find_output_device(query)?,
            None => cpal::default_host()
                .default_output_device()
                .ok_or(Error::NoDevice)?,
        };
        let config = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(Error::UnsupportedFormat(format!(
                "{:?}",
                config.sample_format()
            )));
        }

        let name = device_name(&device).unwrap_or_default();
        tracing::info!(
            device = %name,
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "opened output device"
        );

        Ok(Self {
            device,
            config,
            running: Arc::new(AtomicBool::new(false)),
            _stream: None,
        })
    }

    /// Device sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate()
    }

    /// Device channel count.
    pub fn channels(&self) -> u16 {
        self.config.channels()
    }

    /// Shared run flag. Clearing it from any thread makes [`run`](Self::run)
    /// return.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Play interleaved frames produced by `generate` until stopped.
    ///
    /// `generate` runs on the audio thread and must fill the whole buffer.
    /// This function blocks until the run flag is cleared.
    pub fn run<F>(&mut self, mut generate: F) -> Result<()>
    where
        F: FnMut(&mut [f32]) + Send + 'static,
    {
        self.running.store(true, Ordering::SeqCst);

        let output_running = Arc::clone(&self.running);
        let stream = self
            .device
            .build_output_stream(
                &self.config.config(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if output_running.load(Ordering::SeqCst) {
                        generate(data);
                    } else {
                        data.fill(0.0);
                    }
                },
                |err| tracing::warn!(%err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        self._stream = Some(stream);

        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        self._stream = None;
        tracing::info!("output stream stopped");
        Ok(())
    }

    /// Stop the stream.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the stream is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<Option<String>> {
        list.iter().map(|n| Some((*n).to_string())).collect()
    }

    #[test]
    fn test_match_by_index() {
        let list = names(&["Speakers", "Headphones"]);
        assert_eq!(match_device(&list, "1").unwrap(), 1);
        assert!(matches!(
            match_device(&list, "2"),
            Err(Error::DeviceNotFound(_))
        ));
    }

    #[test]
    fn test_exact_name_beats_partial() {
        let list = names(&["USB Audio Pro", "USB Audio"]);
        assert_eq!(match_device(&list, "USB Audio").unwrap(), 1);
    }

    #[test]
    fn test_partial_match_is_case_insensitive() {
        let list = names(&["Built-in Output", "Focusrite USB"]);
        assert_eq!(match_device(&list, "focus").unwrap(), 1);
    }

    #[test]
    fn test_ambiguous_picks_first() {
        let list = names(&["USB A", "USB B"]);
        assert_eq!(match_device(&list, "usb").unwrap(), 0);
    }

    #[test]
    fn test_unreadable_names_only_match_by_index() {
        let list = vec![None, Some("Speakers".to_string())];
        assert_eq!(match_device(&list, "0").unwrap(), 0);
        assert!(match_device(&list, "nothing").is_err());
    }
}
