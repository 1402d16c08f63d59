//! segstream CLI
//!
//! Command-line editing of binary files. Every command opens the file
//! through one segmented stream and commits it once, so the file is
//! rewritten in a single pass however many edits are made.
//!
//! # Commands
//!
//! - `insert` - Insert bytes at an offset
//! - `remove` - Remove a byte range
//! - `write` - Overwrite (or extend) bytes at an offset
//! - `apply` - Run a JSON edit script
//! - `dump` - Hex dump a byte range

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::edit::{Edit, Payload};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Insert, remove and overwrite bytes anywhere in a file.
#[derive(Parser)]
#[command(name = "segstream")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the file to edit
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert bytes at an offset, shifting the rest of the file
    Insert {
        /// Offset to insert at
        #[arg(short, long)]
        offset: u64,

        /// Bytes to insert, as UTF-8 text
        #[arg(short, long, conflicts_with = "hex")]
        text: Option<String>,

        /// Bytes to insert, hex encoded
        #[arg(short = 'x', long)]
        hex: Option<String>,
    },

    /// Remove a byte range, shifting the rest of the file back
    Remove {
        /// Offset of the first byte to remove
        #[arg(short, long)]
        offset: u64,

        /// Number of bytes to remove
        #[arg(short, long)]
        length: u64,
    },

    /// Overwrite bytes at an offset, extending the file if needed
    Write {
        /// Offset to write at
        #[arg(short, long)]
        offset: u64,

        /// Bytes to write, as UTF-8 text
        #[arg(short, long, conflicts_with = "hex")]
        text: Option<String>,

        /// Bytes to write, hex encoded
        #[arg(short = 'x', long)]
        hex: Option<String>,
    },

    /// Apply a JSON edit script
    Apply {
        /// Script file: a JSON array of edit steps
        #[arg(short, long)]
        script: PathBuf,

        /// Dry run - show the result without writing the file
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Hex dump a byte range
    Dump {
        /// Start from this offset
        #[arg(short, long, default_value = "0")]
        offset: u64,

        /// Number of bytes to dump (default: to end of file)
        #[arg(short, long)]
        length: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Insert { offset, text, hex } => {
            let path = cli.path.ok_or("File path required for insert")?;
            let bytes = Payload::from_args(text, hex)?.into_bytes()?;
            commands::edit::run(&path, &[Edit::Insert { offset, bytes }])?;
        }
        Commands::Remove { offset, length } => {
            let path = cli.path.ok_or("File path required for remove")?;
            commands::edit::run(&path, &[Edit::Remove { offset, length }])?;
        }
        Commands::Write { offset, text, hex } => {
            let path = cli.path.ok_or("File path required for write")?;
            let bytes = Payload::from_args(text, hex)?.into_bytes()?;
            commands::edit::run(&path, &[Edit::Write { offset, bytes }])?;
        }
        Commands::Apply { script, dry_run } => {
            let path = cli.path.ok_or("File path required for apply")?;
            commands::apply::run(&path, &script, dry_run)?;
        }
        Commands::Dump {
            offset,
            length,
            format,
        } => {
            let path = cli.path.ok_or("File path required for dump")?;
            commands::dump::run(&path, offset, length, &format)?;
        }
        Commands::Version => {
            println!("segstream CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("segstream core v{}", segstream_core::VERSION);
        }
    }

    Ok(())
}
