//! streamcopy CLI
//!
//! Runs the copy strategies and the content comparison from the command line.

mod config;
mod format;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use streamcopy_files::{CopyOptions, Strategy, content_equals};

use config::Config;
use format::{format_bytes, format_duration, format_speed};

/// streamcopy - compare file copy strategies
#[derive(Parser)]
#[command(name = "streamcopy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Create the destination if it does not exist
    #[arg(long, global = true)]
    create_destination: bool,

    /// Do not write the end-of-input marker as a trailing blank line
    #[arg(long, global = true)]
    skip_line_marker: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a file with one strategy
    Copy {
        /// Strategy name (see `strategies`)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Source file
        source: PathBuf,

        /// Destination file
        destination: PathBuf,
    },

    /// Compare two files byte by byte
    Compare {
        /// First file
        source: PathBuf,

        /// Second file
        destination: PathBuf,
    },

    /// List available strategies
    Strategies,

    /// Time every strategy against the same source and destination
    Bench {
        /// Source file
        source: PathBuf,

        /// Destination file, overwritten by each strategy in turn
        destination: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::InitConfig { force } = cli.command {
        let path = cli.config.unwrap_or_else(Config::default_path);
        init_config(&path, force)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    config.validate()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        })
        .with_writer(std::io::stderr)
        .init();

    let options = config.copy_options(cli.create_destination, cli.skip_line_marker);

    match cli.command {
        Commands::Copy {
            strategy,
            source,
            destination,
        } => {
            let strategy = match strategy {
                Some(name) => name.parse::<Strategy>()?,
                None => config.default_strategy()?,
            };
            copy_file(strategy, &source, &destination, &options)?;
        }
        Commands::Compare {
            source,
            destination,
        } => {
            if !compare_files(&source, &destination)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Strategies => list_strategies(),
        Commands::Bench {
            source,
            destination,
        } => {
            bench_strategies(&source, &destination, &options)?;
        }
        Commands::InitConfig { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Write the default configuration to `path`
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Configuration written to: {}", path.display());
    Ok(())
}

/// Copy with a single strategy
fn copy_file(
    strategy: Strategy,
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> anyhow::Result<()> {
    tracing::info!(
        "Copying {} -> {} ({})",
        source.display(),
        destination.display(),
        strategy
    );

    let start = Instant::now();
    let count = strategy.run(source, destination, options)?;
    let elapsed = start.elapsed();

    println!("Strategy: {} ({})", strategy, strategy.capability());
    println!("Written: {} {}", count, strategy.unit());
    println!("Elapsed: {}", format_duration(elapsed));

    Ok(())
}

/// Compare two files, returning whether they are equal
fn compare_files(source: &Path, destination: &Path) -> anyhow::Result<bool> {
    let equal = content_equals(source, destination)?;

    if equal {
        println!("{} and {} are identical", source.display(), destination.display());
    } else {
        println!("{} and {} differ", source.display(), destination.display());
    }

    Ok(equal)
}

/// Print every strategy with its capability class
fn list_strategies() {
    println!("Available strategies:");
    println!();
    for strategy in Strategy::ALL {
        println!(
            "  {:<13} {:<24} {}",
            strategy.name(),
            strategy.capability(),
            strategy.description()
        );
    }
}

/// Run every strategy in turn and report timing and exactness
fn bench_strategies(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> anyhow::Result<()> {
    let size = std::fs::metadata(source)?.len();

    println!("Source: {} ({})", source.display(), format_bytes(size));
    println!("Destination: {}", destination.display());
    println!();
    println!(
        "{:<13} {:>14} {:>12} {:>14}  result",
        "strategy", "written", "elapsed", "throughput"
    );

    for strategy in Strategy::ALL {
        let start = Instant::now();
        let result = strategy.run(source, destination, options);
        let elapsed = start.elapsed();

        match result {
            Ok(count) => {
                let exact = content_equals(source, destination)?;
                println!(
                    "{:<13} {:>14} {:>12} {:>14}  {}",
                    strategy.name(),
                    format!("{count} {}", strategy.unit()),
                    format_duration(elapsed),
                    format_speed(size, elapsed),
                    if exact { "exact" } else { "differs" }
                );
            }
            Err(e) if e.is_argument_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("{} failed: {}", strategy, e);
                println!("{:<13} failed: {}", strategy.name(), e);
            }
        }
    }

    Ok(())
}
