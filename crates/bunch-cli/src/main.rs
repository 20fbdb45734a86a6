//! bunch CLI - Typed Bundle accessor generator
//!
//! Commands:
//! - `bunch generate` - Generate Kotlin sources from a template manifest
//! - `bunch check` - Validate a bunch.toml manifest
//! - `bunch describe` - Print the synthesized types as JSON

use bunch_core::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod codegen;
mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "bunch")]
#[command(author, version, about = "Typed Bundle accessor generator for Android", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Kotlin sources
    Generate {
        /// Path to bunch.toml
        #[arg(short, long, default_value = "bunch.toml")]
        input: PathBuf,

        /// Output directory for generated code
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate a bunch.toml manifest without writing anything
    Check {
        /// Path to bunch.toml
        #[arg(short, long, default_value = "bunch.toml")]
        input: PathBuf,
    },

    /// Print the synthesized types as JSON
    Describe {
        /// Path to bunch.toml
        #[arg(short, long, default_value = "bunch.toml")]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    bunch_logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Generate { input, output } => {
            generate::run(&input, &output)?;
        }
        Commands::Check { input } => {
            manifest::check(&input)?;
        }
        Commands::Describe { input } => {
            manifest::describe(&input)?;
        }
    }

    Ok(())
}
