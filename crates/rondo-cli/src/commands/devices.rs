//! Output device listing.

use clap::Args;
use rondo_io::list_output_devices;

#[derive(Args, Debug)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_output_devices()?;

    if devices.is_empty() {
        println!("No output devices found.");
        return Ok(());
    }

    println!("Output Devices");
    println!("==============\n");
    for device in &devices {
        println!(
            "  [{}] {} ({} Hz, {} ch){}",
            device.index,
            device.name,
            device.default_sample_rate,
            device.default_channels,
            if device.is_default { " (default)" } else { "" }
        );
    }
    println!();
    println!("Tip: Use device index or partial name with --output:");
    println!("  rondo play --output 0");
    println!("  rondo play --output \"USB\"");
    Ok(())
}
