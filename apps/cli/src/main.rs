//! Spell optimizer command-line front end
//!
//! Collects spell inputs from flags, a JSON request file and the environment,
//! then prints either the best spell for the budget or a manual breakdown.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;

use commands::{Evaluate, Optimize};
use config::{CliConfig, OutputFormat};

/// Find the most damaging fire/frost/shock spell for a magicka budget
#[derive(Parser)]
#[command(name = "spell-optimizer")]
#[command(version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    Optimize(Optimize),
    Evaluate(Evaluate),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    match cli.command {
        Command::Optimize(cmd) => cmd.execute(&config, format),
        Command::Evaluate(cmd) => cmd.execute(&config, format),
    }
}
