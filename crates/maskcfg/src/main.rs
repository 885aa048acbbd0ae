//! Command-line tool for checking and inspecting override documents.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::info;
use maskcfg::MaskConfig;
use maskcfg::commands::{self, LookupKind};
use std::path::PathBuf;

/// Command-line options shared by every subcommand.
#[derive(Parser)]
#[command(name = "maskcfg", version, about)]
struct Cli {
    /// Override document applied as a user layer (repeatable; later files win)
    #[arg(long = "config", short = 'c')]
    configs: Vec<PathBuf>,
    /// Document whose values no other layer may override
    #[arg(long)]
    pin: Option<PathBuf>,
    /// Environment variable holding an override document
    #[arg(long)]
    env: Option<String>,
    /// Abort on the first unreadable or malformed layer
    #[arg(long)]
    strict: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the effective document against a property catalog
    Check {
        /// Catalog file (JSON5)
        #[arg(long)]
        schema: PathBuf,
    },
    /// Print one typed override, or `<unset>`
    Get {
        key: String,
        #[arg(long = "as", value_enum, default_value_t = LookupKind::String)]
        kind: LookupKind,
    },
    /// Print every configured structured feature as JSON
    Features,
    /// Print the layer stack
    Layers,
}

fn main() -> anyhow::Result<()> {
    maskcfg::init_logging();
    let cli = Cli::parse();

    let options =
        commands::layer_options(&cli.configs, cli.pin.as_deref(), cli.env.as_deref(), cli.strict);
    let layered = MaskConfig::load_layered(options).context("failed to load override layers")?;
    info!("effective overlay status: {:?}", layered.config.status());

    match cli.command {
        Command::Check { schema } => {
            let disabled = commands::disabled_layers(&layered.layers);
            if !disabled.is_empty() {
                for line in &disabled {
                    eprintln!("unreadable layer {line}");
                }
                bail!("{} layer(s) failed to load", disabled.len());
            }
            let report = commands::check(&layered.config, &schema)?;
            for violation in &report.violations {
                println!("{violation}");
            }
            if !report.is_valid() {
                bail!("{} schema violation(s)", report.violations.len());
            }
            println!("ok: {} properties checked", report.checked);
        }
        Command::Get { key, kind } => {
            let rendered = commands::lookup(&layered.config, &key, kind);
            println!("{}", rendered.as_deref().unwrap_or("<unset>"));
        }
        Command::Features => println!("{}", commands::features_json(&layered.config)?),
        Command::Layers => print!("{}", commands::render_layers(&layered.layers)),
    }
    Ok(())
}
