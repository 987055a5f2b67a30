//! Knob table listing.

use clap::Args;
use rondo_platform::Button;
use rondo_synth::ParamId;

#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Show a single parameter
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = args.name {
        let Some(id) = ParamId::from_name(&name) else {
            anyhow::bail!("Unknown parameter '{name}'. Run 'rondo params' for the list.");
        };
        print_detail(id);
        return Ok(());
    }

    println!("Panel Knobs");
    println!("===========\n");
    println!(
        "  {:<4} {:<16} {:>9} {:>9} {:<6} {:<12} {:>9}",
        "knob", "parameter", "min", "max", "unit", "curve", "default"
    );

    let mut ids = ParamId::ALL;
    ids.sort_by_key(|id| id.binding().0);
    for id in ids {
        let (channel, parameter) = id.binding();
        println!(
            "  {:<4} {:<16} {:>9.2} {:>9.2} {:<6} {:<12} {:>9.2}",
            channel,
            id.name(),
            parameter.min,
            parameter.max,
            id.unit(),
            parameter.curve.name(),
            id.default_value()
        );
    }

    println!("\nStage parameters (knobs 0-4) write into the selected stage only.");
    println!("\nButtons:");
    for button in Button::ALL {
        let action = match button {
            Button::Aux => "no action",
            Button::Forward => "select next stage (wraps)",
            Button::Backward => "select previous stage (stops at 0)",
        };
        println!("  {:<9} {}", button.name(), action);
    }
    Ok(())
}

fn print_detail(id: ParamId) {
    let (channel, parameter) = id.binding();
    println!("{}", id.name());
    println!("  Knob:    {channel}");
    println!(
        "  Range:   {} - {} {}",
        parameter.min,
        parameter.max,
        id.unit()
    );
    println!("  Curve:   {}", parameter.curve.name());
    println!(
        "  Default: {} (knob position {:.3})",
        id.default_value(),
        parameter.normalize(id.default_value())
    );
    if id.is_stage_param() {
        println!("  Scope:   selected stage");
    }
}
