//! # chash
//!
//! Reads a command file, runs every command on its own worker thread in
//! priority order, and prints one result line per command followed by the
//! final store contents.
//!
//! ## Usage
//!
//! ```bash
//! chash --commands commands.txt --log-file hash.log
//! CHASH_OUTPUT=json chash
//! ```

use anyhow::{Context, Result};
use chash_runtime::{run_session, OutputFormat, RuntimeConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "chash")]
#[command(about = "Priority-ordered concurrent operations on a sorted record store")]
struct Args {
    /// Command file to execute
    #[arg(short, long)]
    commands: Option<PathBuf>,

    /// Event log to (re)create
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Diagnostic filter, e.g. `info` or `chash_runtime=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Result format: text or json
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Keep names longer than 49 bytes instead of truncating them
    #[arg(long)]
    no_truncate: bool,
}

impl Args {
    fn apply(self, mut config: RuntimeConfig) -> RuntimeConfig {
        if let Some(path) = self.commands {
            config.commands_path = path;
        }
        if let Some(path) = self.log_file {
            config.log_path = path;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.no_truncate {
            config.truncate_names = false;
        }
        config
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{level}'"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(config: &RuntimeConfig) -> Result<()> {
    let stdout = std::io::stdout();
    run_session(config, &mut stdout.lock()).context("Run failed")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.apply(RuntimeConfig::from_env());

    if let Err(err) = init_tracing(&config.log_level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
