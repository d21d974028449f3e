use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use hovertip::Script;
use hovertip::config::{load_config, load_config_from_path};

/// Replay a tooltip scenario script and print the event trace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario script (TOML)
    script: PathBuf,

    /// Config file to use instead of ~/.config/hovertip/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from_path(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };

    let script = Script::from_path(&args.script)
        .wrap_err_with(|| format!("Failed to read script {}", args.script.display()))?;
    let report = script.run(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
