//! Rondo CLI - render, play, and inspect the rondo percussion synthesizer.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rondo")]
#[command(author, version, about = "Round-robin percussion synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene to a WAV file
    Render(commands::render::RenderArgs),

    /// Play a scene on an output device until Ctrl+C
    Play(commands::play::PlayArgs),

    /// Show the knob-to-parameter table
    Params(commands::params::ParamsArgs),

    /// List or show factory scenes
    Scenes(commands::scenes::ScenesArgs),

    /// List output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Scenes(args) => commands::scenes::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
