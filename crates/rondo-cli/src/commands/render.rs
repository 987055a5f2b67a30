//! Offline rendering to WAV.

use super::common::{RigArgs, with_stages};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rondo_config::RigConfig;
use rondo_io::{WavSpec, WavStreamWriter};
use rondo_synth::AudioEngine;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    rig: RigArgs,

    /// Duration in seconds (default: 4 s, or one second past the last press)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Sample rate override
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Channel count override
    #[arg(long)]
    channels: Option<u16>,

    /// Bit depth (16, 24, or 32 for float)
    #[arg(long, default_value = "32", value_parser = ["16", "24", "32"])]
    bits: String,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// What a render produced.
#[derive(Debug, Clone, Copy)]
pub struct RenderSummary {
    /// Frames written.
    pub frames: u64,
    /// Largest absolute sample.
    pub peak: f32,
    /// Clock ticks fired.
    pub fires: u64,
    /// Stage selected when the render ended.
    pub final_stage: usize,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut rig = args.rig.load()?;
    if let Some(sr) = args.sample_rate {
        rig.engine.sample_rate = sr;
    }
    if let Some(ch) = args.channels {
        rig.engine.channels = ch;
    }
    rondo_config::validate_rig(&rig)?;

    let duration = args
        .duration
        .unwrap_or_else(|| (rig.scene.last_press() + 1.0).max(4.0));
    anyhow::ensure!(
        duration.is_finite() && duration > 0.0,
        "Duration must be positive"
    );
    let frames = (duration * f64::from(rig.engine.sample_rate)).round() as u64;
    let bits: u16 = args.bits.parse()?;

    println!(
        "Rendering '{}' for {:.2}s ({} Hz, {} ch, {} stage{})...",
        rig.scene.name,
        duration,
        rig.engine.sample_rate,
        rig.engine.channels,
        args.rig.stages,
        if args.rig.stages == 1 { "" } else { "s" }
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(frames);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("##-"),
        );
        pb
    };

    let summary = with_stages!(args.rig.stages, M => {
        render_to_file::<M>(&rig, &args.output, frames, bits, |n| pb.inc(n))?
    });
    pb.finish_and_clear();

    println!(
        "Wrote {} ({} frames, peak {:.3}, {} hits, final stage {})",
        args.output.display(),
        summary.frames,
        summary.peak,
        summary.fires,
        summary.final_stage
    );
    Ok(())
}

/// Render `frames` frames of `rig` through an 8-voice, `M`-stage engine
/// into a WAV file at `path`. `progress` receives frame counts per block.
pub fn render_to_file<const M: usize>(
    rig: &RigConfig,
    path: &Path,
    frames: u64,
    bits_per_sample: u16,
    mut progress: impl FnMut(u64),
) -> anyhow::Result<RenderSummary> {
    let channels = usize::from(rig.engine.channels);
    let block_size = rig.engine.block_size;
    let spec = WavSpec {
        channels: rig.engine.channels,
        sample_rate: rig.engine.sample_rate,
        bits_per_sample,
    };

    let mut engine = AudioEngine::<8, M>::new(rig.engine_settings());
    let mut surface = engine.surface(rig.engine.analog_slew_seconds);
    rig.scene.apply_knobs(&mut surface);
    let mut schedule = rig.scene.press_schedule(rig.engine.sample_rate);
    let mut writer = WavStreamWriter::create(path, spec)?;

    tracing::info!(path = %path.display(), frames, "render started");

    let mut block = vec![0.0f32; block_size * channels];
    let mut peak = 0.0f32;
    let mut done = 0u64;
    while done < frames {
        let n = (frames - done).min(block_size as u64);
        schedule.queue_until(done + n - 1, &mut surface);

        let out = &mut block[..n as usize * channels];
        engine.process_block(&mut surface, out, channels);
        peak = out.iter().fold(peak, |p, s| p.max(s.abs()));
        writer.write_block(out)?;
        if let Some(snapshot) = engine.telemetry().mailbox().take() {
            snapshot.log();
        }

        done += n;
        progress(n);
    }

    let frames = writer.finalize()?;
    if !schedule.is_finished() {
        tracing::warn!(
            unplayed = schedule.remaining(),
            "render ended before every scheduled press"
        );
    }
    tracing::info!(frames, peak, "render finished");

    Ok(RenderSummary {
        frames,
        peak,
        fires: engine.sequencer().fire_count(),
        final_stage: engine.active_stage(),
    })
}
