// SPDX-License-Identifier: AGPL-3.0-or-later
//! `papaja` - format statistical results for APA manuscripts

use clap::Parser;
use papaja_core::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Format ANOVA tables and hypothesis tests as APA-style text and tables"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Configuration file (defaults to ./papaja.toml when present)
    #[clap(long, env = "PAPAJA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Table output format: markdown, latex or text
    #[clap(long, short, global = true, default_value = "markdown")]
    format: OutputFormat,

    /// Print the result bundle as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Whether to display debug logs (RUST_LOG takes precedence)
    #[clap(long, short, env = "PAPAJA_VERBOSE", global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommands {
    /// Format an ANOVA variance table
    Anova(commands::AnovaArgs),

    /// Format a single hypothesis test
    Htest(commands::HtestArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let app = App::parse();
    init_tracing(app.global.verbose);

    let output = match &app.command {
        SubCommands::Anova(args) => commands::anova(args, &app.global)?,
        SubCommands::Htest(args) => commands::htest(args, &app.global)?,
    };
    println!("{output}");
    Ok(())
}
