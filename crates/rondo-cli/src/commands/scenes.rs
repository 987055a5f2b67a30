//! Factory scene listing.

use super::common::load_scene;
use clap::{Args, Subcommand};
use rondo_config::{RigConfig, factory_scenes};

#[derive(Args, Debug)]
pub struct ScenesArgs {
    #[command(subcommand)]
    command: Option<ScenesCommand>,
}

#[derive(Subcommand, Debug)]
enum ScenesCommand {
    /// List factory scenes
    List,

    /// Print a scene as a complete rig file
    Show {
        /// Factory scene name or scene file
        name: String,
    },
}

pub fn run(args: ScenesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(ScenesCommand::List) {
        ScenesCommand::List => {
            println!("Factory Scenes");
            println!("==============\n");
            for scene in factory_scenes() {
                println!(
                    "  {:<12} {}",
                    scene.name,
                    scene.description.as_deref().unwrap_or("")
                );
            }
            println!("\nRender one with: rondo render out.wav --scene <NAME>");
        }
        ScenesCommand::Show { name } => {
            let rig = RigConfig::with_scene(load_scene(&name)?);
            print!("{}", rig.to_toml()?);
        }
    }
    Ok(())
}
