//! Live playback on an output device.

use super::common::{RigArgs, with_stages};
use clap::Args;
use rondo_config::RigConfig;
use rondo_io::OutputStream;
use rondo_synth::AudioEngine;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// How often the reporter thread drains engine telemetry.
const TELEMETRY_POLL: Duration = Duration::from_millis(50);

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    rig: RigArgs,

    /// Output device (index, exact name, or partial name)
    #[arg(short, long)]
    output: Option<String>,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(short, long)]
    duration: Option<f64>,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let rig = args.rig.load()?;
    let mut stream = OutputStream::new(args.output.as_deref())?;

    println!(
        "Playing '{}' at {} Hz, {} ch, {} stage(s). Press Ctrl+C to stop.",
        rig.scene.name,
        stream.sample_rate(),
        stream.channels(),
        args.rig.stages
    );

    let running = stream.running_flag();
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    if let Some(seconds) = args.duration {
        anyhow::ensure!(
            seconds.is_finite() && seconds > 0.0,
            "Duration must be positive"
        );
        let r = Arc::clone(&running);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs_f64(seconds));
            r.store(false, Ordering::SeqCst);
        });
    }

    with_stages!(args.rig.stages, M => play_engine::<M>(&rig, &mut stream))
}

fn play_engine<const M: usize>(rig: &RigConfig, stream: &mut OutputStream) -> anyhow::Result<()> {
    let sample_rate = stream.sample_rate();
    let channels = usize::from(stream.channels());

    let mut engine = AudioEngine::<8, M>::new(rig.engine_settings_at(sample_rate));
    let mut surface = engine.surface(rig.engine.analog_slew_seconds);
    rig.scene.apply_knobs(&mut surface);
    let mut schedule = rig.scene.press_schedule(sample_rate);
    let mut frame = 0u64;

    if engine.telemetry().is_enabled() {
        // Runs until the stream drops the engine and its mailbox handle.
        let mailbox = engine.telemetry().share_mailbox();
        std::thread::spawn(move || {
            while Arc::strong_count(&mailbox) > 1 {
                std::thread::sleep(TELEMETRY_POLL);
                if let Some(snapshot) = mailbox.take() {
                    snapshot.log();
                }
            }
        });
    }

    stream.run(move |data: &mut [f32]| {
        let frames = (data.len() / channels) as u64;
        if frames > 0 {
            schedule.queue_until(frame + frames - 1, &mut surface);
        }
        engine.process_block(&mut surface, data, channels);
        frame += frames;
    })?;
    Ok(())
}
